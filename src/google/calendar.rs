//! Google Calendar v3 and Tasks v1 calls used for daily reminders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GoogleConfig;
use crate::{AppError, Result};

/// All-day calendar event.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Event title.
    pub summary: String,
    /// Event body.
    pub description: String,
    /// First day (inclusive).
    pub start: EventDate,
    /// Last day (exclusive).
    pub end: EventDate,
}

impl CalendarEvent {
    /// One-day event on `date` in `time_zone`.
    #[must_use]
    pub fn all_day(summary: String, description: String, date: NaiveDate, time_zone: &str) -> Self {
        let next = date.succ_opt().unwrap_or(date);
        Self {
            summary,
            description,
            start: EventDate {
                date,
                time_zone: time_zone.to_owned(),
            },
            end: EventDate {
                date: next,
                time_zone: time_zone.to_owned(),
            },
        }
    }
}

/// Date-only event boundary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventDate {
    /// Calendar date serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// IANA time zone name.
    pub time_zone: String,
}

/// Google Tasks entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskItem {
    /// Task title.
    pub title: String,
    /// Task notes.
    pub notes: String,
    /// Due date as RFC 3339 midnight UTC; Tasks ignores the time part.
    pub due: String,
}

impl TaskItem {
    /// Task due on `date`.
    #[must_use]
    pub fn due_on(title: String, notes: String, date: NaiveDate) -> Self {
        Self {
            title,
            notes,
            due: format!("{}T00:00:00.000Z", date.format("%Y-%m-%d")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedResource {
    id: String,
}

/// Client for the Calendar and Tasks REST APIs.
#[derive(Debug, Clone)]
pub struct CalendarClient {
    calendar_api_base: String,
    tasks_api_base: String,
    time_zone: String,
    http: reqwest::Client,
}

impl CalendarClient {
    /// Create a client for the endpoints in `config`.
    #[must_use]
    pub fn new(config: &GoogleConfig, http: reqwest::Client) -> Self {
        Self {
            calendar_api_base: config.calendar_api_base.trim_end_matches('/').to_owned(),
            tasks_api_base: config.tasks_api_base.trim_end_matches('/').to_owned(),
            time_zone: config.timezone.clone(),
            http,
        }
    }

    /// Time zone new events are created in.
    #[must_use]
    pub fn time_zone(&self) -> &str {
        &self.time_zone
    }

    /// Insert `event` into the user's primary calendar. Returns the event id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if Google rejects the token, or
    /// `AppError::Upstream` on any other failure.
    pub async fn insert_event(&self, access_token: &str, event: &CalendarEvent) -> Result<String> {
        let url = format!("{}/calendars/primary/events", self.calendar_api_base);
        let id = self.post_json(&url, access_token, event).await?;
        debug!(event_id = %id, summary = %event.summary, "calendar event created");
        Ok(id)
    }

    /// Insert `task` into the user's default task list. Returns the task id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if Google rejects the token, or
    /// `AppError::Upstream` on any other failure.
    pub async fn insert_task(&self, access_token: &str, task: &TaskItem) -> Result<String> {
        let url = format!("{}/lists/@default/tasks", self.tasks_api_base);
        let id = self.post_json(&url, access_token, task).await?;
        debug!(task_id = %id, title = %task.title, "task created");
        Ok(id)
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        access_token: &str,
        body: &T,
    ) -> Result<String> {
        let response = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized("google rejected the access token".into()));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("google api {status}: {text}")));
        }
        let created: CreatedResource = response.json().await?;
        Ok(created.id)
    }
}
