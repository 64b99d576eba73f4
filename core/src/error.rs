use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// A single day whose summed allocation would exceed 100%.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayOverload {
    pub date: NaiveDate,
    pub total_percent: u32,
}

#[derive(Error, Debug)]
pub enum StaffingError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("assignment covers non-working day {date}")]
    WeekendAssignment { date: NaiveDate },

    #[error("daily allocation exceeds 100% on {} day(s)", .days.len())]
    CapacityExceeded { days: Vec<DayOverload> },

    #[error("person '{person_id}' not found")]
    PersonNotFound { person_id: String },

    #[error("store write failed: {0}")]
    Write(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("import row rejected: {0}")]
    Import(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StaffingResult<T> = Result<T, StaffingError>;
