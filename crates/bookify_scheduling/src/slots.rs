// --- File: crates/bookify_scheduling/src/slots.rs ---
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::str::FromStr;
use tracing::debug;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::config::SchedulingConfig;
use crate::error::SchedulingError;

// --- Data Structures ---

/// A busy range taken from an external calendar event, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        BusyInterval { start, end }
    }

    /// Standard half-open interval overlap test against a candidate range.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end > self.start
    }
}

/// One bookable appointment start on the requested day.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// 24-hour wall clock start
    #[cfg_attr(feature = "openapi", schema(example = "14:30"))]
    pub time: String,
    /// 12-hour clock with AM/PM
    #[cfg_attr(feature = "openapi", schema(example = "2:30 PM"))]
    pub display_time: String,
    pub available: bool,
    /// Resolved start instant; internal, not part of the wire shape
    #[serde(skip)]
    pub start: DateTime<Utc>,
}

// --- Parsing Helpers ---

/// Parses a `YYYY-MM-DD` date string.
pub fn parse_date(value: &str) -> Result<NaiveDate, SchedulingError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| SchedulingError::InvalidDate(value.to_string()))
}

/// Parses a 24-hour `HH:MM` time string.
pub fn parse_time(value: &str) -> Result<NaiveTime, SchedulingError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| SchedulingError::InvalidTime(value.to_string()))
}

/// Resolves an IANA timezone identifier.
pub fn parse_timezone(value: &str) -> Result<Tz, SchedulingError> {
    Tz::from_str(value).map_err(|_| SchedulingError::InvalidTimezone(value.to_string()))
}

/// Resolves a wall-clock date and time in `tz` to a UTC instant.
///
/// Ambiguous local times (clocks rolled back) resolve to the earlier
/// occurrence. A wall-clock time skipped by a forward transition does not
/// exist and is an error.
pub fn local_instant(
    date: NaiveDate,
    time: NaiveTime,
    tz: &Tz,
) -> Result<DateTime<Utc>, SchedulingError> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|resolved| resolved.with_timezone(&Utc))
        .ok_or_else(|| SchedulingError::NonexistentLocalTime(format!("{date}T{time} in {tz}")))
}

// --- Slot Generation ---

/// Generates the available appointment slots for one day.
///
/// Candidate starts run through the configured working window at the
/// configured cadence, in the given timezone. A candidate is kept iff the
/// range `[start, start + duration)` overlaps no busy interval; unavailable
/// candidates are dropped rather than emitted as `available: false`.
///
/// The grid is never clipped at the end of the day: a duration longer than
/// the remaining window still generates the late candidates, so with the
/// default window a 60-minute appointment is still offered at 16:30, ending
/// 17:30.
///
/// # Errors
///
/// Returns `SchedulingError::InvalidTimezone` for an unrecognized timezone
/// identifier. Wall-clock candidates skipped by a DST transition are dropped,
/// not reported as errors.
// TODO: confirm with the booking owners whether late starts should clip at
// work_end before longer durations are exposed in the widget.
pub fn generate_available_slots(
    date: NaiveDate,
    busy: &[BusyInterval],
    duration_minutes: i64,
    timezone: &str,
    config: &SchedulingConfig,
) -> Result<Vec<Slot>, SchedulingError> {
    let tz = parse_timezone(timezone)?;
    let duration = Duration::minutes(duration_minutes);
    let step = Duration::minutes(i64::from(config.slot_step_minutes));

    debug!(
        "Generating slots for {} ({}) duration {}min against {} busy interval(s)",
        date,
        timezone,
        duration_minutes,
        busy.len()
    );

    let mut slots = Vec::new();
    let mut cursor = config.work_start;
    while cursor < config.work_end {
        if let Some(start) = tz
            .from_local_datetime(&date.and_time(cursor))
            .earliest()
            .map(|resolved| resolved.with_timezone(&Utc))
        {
            let end = start + duration;
            if busy.iter().all(|interval| !interval.overlaps(start, end)) {
                slots.push(Slot {
                    time: format!("{:02}:{:02}", cursor.hour(), cursor.minute()),
                    display_time: format_display_time(cursor),
                    available: true,
                    start,
                });
            }
        }
        // NaiveTime addition wraps at midnight; a wrap means the window is done
        let (next, wrapped) = cursor.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        cursor = next;
    }

    Ok(slots)
}

/// Formats a time on the 12-hour clock, hours 0 and 12 both reading "12".
pub fn format_display_time(time: NaiveTime) -> String {
    let hour = time.hour();
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, time.minute(), period)
}
