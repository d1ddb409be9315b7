//! Word / Kanji of the Day reminder sync.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::daily::DailyPicker;
use crate::models::JlptLevel;
use crate::{AppError, Result};

use super::calendar::{CalendarClient, CalendarEvent, TaskItem};
use super::tokens::TokenManager;

/// Identifiers created by one sync.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Date the reminders were created for.
    pub date: Option<NaiveDate>,
    /// Calendar event ids.
    pub events_created: Vec<String>,
    /// Task ids.
    pub tasks_created: Vec<String>,
}

/// Creates calendar events (and optionally tasks) for the daily picks.
#[derive(Clone)]
pub struct ReminderSync {
    tokens: TokenManager,
    calendar: CalendarClient,
    picker: DailyPicker,
}

impl ReminderSync {
    /// Combine the token manager, API client and daily picker.
    #[must_use]
    pub fn new(tokens: TokenManager, calendar: CalendarClient, picker: DailyPicker) -> Self {
        Self {
            tokens,
            calendar,
            picker,
        }
    }

    /// Push the Word of the Day and Kanji of the Day for `date`.
    ///
    /// A pick missing for lack of data is skipped; when neither exists the
    /// call fails with `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if the user is not connected,
    /// `AppError::NotFound` if there is nothing to sync, or
    /// `AppError::Upstream` if a Google call fails.
    pub async fn sync(
        &self,
        user_id: &str,
        date: NaiveDate,
        level: Option<JlptLevel>,
        create_tasks: bool,
    ) -> Result<SyncReport> {
        let word = self.picker.word_of_the_day(date, level).await?;
        let kanji = self.picker.kanji_of_the_day(date, level).await?;
        if word.is_none() && kanji.is_none() {
            return Err(AppError::NotFound("no vocabulary or kanji to sync".into()));
        }

        let access_token = self.tokens.access_token(user_id).await?;
        let mut report = SyncReport {
            date: Some(date),
            ..SyncReport::default()
        };

        if let Some(verb) = word {
            let summary = format!("Word of the Day: {} ({})", verb.dictionary_form, verb.reading);
            let description = format!(
                "{} [{}] {}: {}",
                verb.dictionary_form, verb.romaji, verb.jlpt_level, verb.meaning
            );
            let event = CalendarEvent::all_day(
                summary.clone(),
                description.clone(),
                date,
                self.calendar.time_zone(),
            );
            report
                .events_created
                .push(self.calendar.insert_event(&access_token, &event).await?);
            if create_tasks {
                let task = TaskItem::due_on(summary, description, date);
                report
                    .tasks_created
                    .push(self.calendar.insert_task(&access_token, &task).await?);
            }
        }

        if let Some(entry) = kanji {
            let summary = format!("Kanji of the Day: {}", entry.character);
            let description = format!(
                "{} (on: {} / kun: {})",
                entry.meaning,
                entry.onyomi.join("、"),
                entry.kunyomi.join("、")
            );
            let event = CalendarEvent::all_day(
                summary.clone(),
                description.clone(),
                date,
                self.calendar.time_zone(),
            );
            report
                .events_created
                .push(self.calendar.insert_event(&access_token, &event).await?);
            if create_tasks {
                let task = TaskItem::due_on(summary, description, date);
                report
                    .tasks_created
                    .push(self.calendar.insert_task(&access_token, &task).await?);
            }
        }

        info!(
            user_id,
            %date,
            events = report.events_created.len(),
            tasks = report.tasks_created.len(),
            "daily reminders synced"
        );
        Ok(report)
    }
}
