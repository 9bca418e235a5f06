//! Errors returned by this crate

use uuid::Uuid;

use crate::date::CalendarDate;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A week grid was requested for a range that ends before it starts
    #[error("Invalid range: {start} is after {end}")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// Whole weeks around this date do not fit in the range of supported dates
    #[error("Weeks around {0} are out of the supported range of dates")]
    OutOfRange(CalendarDate),

    #[error("No task with id {0}")]
    NoSuchTask(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
