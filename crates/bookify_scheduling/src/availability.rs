// --- File: crates/bookify_scheduling/src/availability.rs ---
use chrono::{DateTime, Utc};

use crate::slots::Slot;

/// Fuzzy availability test for a requested instant against the day's slots.
///
/// True iff some slot starts within `tolerance_minutes` of `preferred`,
/// boundary included: a slot exactly the tolerance away still matches. The
/// requested time does not have to sit on the slot grid.
pub fn is_time_available(
    preferred: DateTime<Utc>,
    slots: &[Slot],
    tolerance_minutes: i64,
) -> bool {
    let tolerance_seconds = tolerance_minutes * 60;
    slots
        .iter()
        .any(|slot| (slot.start - preferred).num_seconds().abs() <= tolerance_seconds)
}
