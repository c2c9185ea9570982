use chrono::NaiveDate;
use storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Unknown stats selector: {0}")]
    InvalidSelector(String),

    #[error("Window cannot be resolved: {0}")]
    InvalidWindow(String),
}

/// Why a custom range submission was rejected. Always recoverable: the session stays open.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeParseError {
    #[error("Expected two dates separated by a space, got {0} value(s)")]
    WrongArity(usize),

    #[error("'{0}' is not a date in YYYY-MM-DD format")]
    InvalidDate(String),

    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}
