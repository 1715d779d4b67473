//! Error types for schedule-engine operations.
//!
//! Only the parsing boundary returns these. The evaluator itself degrades
//! malformed or missing data to "closed" / "no information" instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Malformed time: {0:?} (expected HH:MM)")]
    MalformedTime(String),

    #[error("Invalid weekday index: {0} (expected 0-6, 0 = Sunday)")]
    InvalidWeekday(i64),

    #[error("Missing weekday index")]
    MissingWeekday,

    #[error("Invalid schedule record: {0}")]
    InvalidRecord(String),
}

impl From<serde_json::Error> for ScheduleError {
    fn from(err: serde_json::Error) -> Self {
        ScheduleError::InvalidRecord(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
