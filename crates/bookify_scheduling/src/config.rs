// --- File: crates/bookify_scheduling/src/config.rs ---
use chrono::NaiveTime;

use crate::error::SchedulingError;

/// Working-day window and cadence for slot generation.
///
/// The grid runs from `work_start` up to (but excluding) `work_end` in
/// `slot_step_minutes` steps. The requested appointment duration affects the
/// conflict check only, never the grid itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingConfig {
    /// First candidate start time of the day (e.g. 9:00 AM)
    pub work_start: NaiveTime,
    /// End of the working day; no candidate starts at or after this time
    pub work_end: NaiveTime,
    /// Grid cadence in minutes between candidate starts
    pub slot_step_minutes: u32,
    /// Fuzzy-match tolerance for availability checks, in minutes
    pub tolerance_minutes: i64,
}

impl SchedulingConfig {
    /// Builds a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `SchedulingError::InvalidConfig` when the window is empty or
    /// reversed, the cadence is zero, or the tolerance is negative.
    pub fn new(
        work_start: NaiveTime,
        work_end: NaiveTime,
        slot_step_minutes: u32,
        tolerance_minutes: i64,
    ) -> Result<Self, SchedulingError> {
        if work_start >= work_end {
            return Err(SchedulingError::InvalidConfig(format!(
                "work window start {work_start} must be before end {work_end}"
            )));
        }
        if slot_step_minutes == 0 {
            return Err(SchedulingError::InvalidConfig(
                "slot step must be at least one minute".to_string(),
            ));
        }
        if tolerance_minutes < 0 {
            return Err(SchedulingError::InvalidConfig(format!(
                "tolerance must not be negative, got {tolerance_minutes}"
            )));
        }
        Ok(SchedulingConfig {
            work_start,
            work_end,
            slot_step_minutes,
            tolerance_minutes,
        })
    }
}

impl Default for SchedulingConfig {
    /// 9:00-17:00 working day, 30-minute cadence, 30-minute tolerance.
    fn default() -> Self {
        SchedulingConfig {
            work_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            work_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            slot_step_minutes: 30,
            tolerance_minutes: 30,
        }
    }
}
