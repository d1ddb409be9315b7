//! Domain model module declarations.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AppError;

pub mod drill;
pub mod google;
pub mod grammar;
pub mod kanji;
pub mod sentence;
pub mod verb;

/// Japanese Language Proficiency Test level, N5 easiest to N1 hardest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JlptLevel {
    /// Advanced.
    N1,
    /// Upper intermediate.
    N2,
    /// Intermediate.
    N3,
    /// Upper beginner.
    N4,
    /// Beginner.
    N5,
}

impl JlptLevel {
    /// Canonical text form stored in the database.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N1 => "N1",
            Self::N2 => "N2",
            Self::N3 => "N3",
            Self::N4 => "N4",
            Self::N5 => "N5",
        }
    }
}

impl Display for JlptLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JlptLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N1" => Ok(Self::N1),
            "N2" => Ok(Self::N2),
            "N3" => Ok(Self::N3),
            "N4" => Ok(Self::N4),
            "N5" => Ok(Self::N5),
            other => Err(AppError::BadRequest(format!("invalid JLPT level: {other}"))),
        }
    }
}

/// Grammatical class of a drillable word.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum WordType {
    /// u-verb.
    Godan,
    /// ru-verb.
    Ichidan,
    /// する / くる and compounds.
    Irregular,
    /// い-adjective.
    IAdjective,
    /// な-adjective.
    NaAdjective,
}

impl WordType {
    /// Every word type, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Godan,
        Self::Ichidan,
        Self::Irregular,
        Self::IAdjective,
        Self::NaAdjective,
    ];

    /// Canonical text form stored in the database.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Godan => "godan",
            Self::Ichidan => "ichidan",
            Self::Irregular => "irregular",
            Self::IAdjective => "i-adjective",
            Self::NaAdjective => "na-adjective",
        }
    }

    /// Parse a comma-separated list such as `godan,ichidan`.
    ///
    /// Empty input yields every word type.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` on an unknown entry.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, AppError> {
        let mut types = Vec::new();
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let word_type = part.parse()?;
            if !types.contains(&word_type) {
                types.push(word_type);
            }
        }
        if types.is_empty() {
            types.extend(Self::ALL);
        }
        Ok(types)
    }
}

impl Display for WordType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WordType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "godan" => Ok(Self::Godan),
            "ichidan" => Ok(Self::Ichidan),
            "irregular" => Ok(Self::Irregular),
            "i-adjective" => Ok(Self::IAdjective),
            "na-adjective" => Ok(Self::NaAdjective),
            other => Err(AppError::BadRequest(format!("invalid word type: {other}"))),
        }
    }
}
