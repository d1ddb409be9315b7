#![forbid(unsafe_code)]

//! Japanese learning backend: grammar drills, conjugation validation,
//! cached kanji lookup, and Google Calendar reminders for the daily picks.

pub mod api;
pub mod config;
pub mod conjugation;
pub mod daily;
pub mod drill;
pub mod errors;
pub mod google;
pub mod kanji;
pub mod models;
pub mod persistence;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
