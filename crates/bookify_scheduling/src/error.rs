// --- File: crates/bookify_scheduling/src/error.rs ---
use thiserror::Error;

/// Errors produced while parsing scheduling inputs or building the slot grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("Failed to parse date: {0}")]
    InvalidDate(String),
    #[error("Failed to parse time: {0}")]
    InvalidTime(String),
    #[error("Unknown timezone identifier: {0}")]
    InvalidTimezone(String),
    #[error("Local time does not exist in timezone: {0}")]
    NonexistentLocalTime(String),
    #[error("Invalid scheduling configuration: {0}")]
    InvalidConfig(String),
}
