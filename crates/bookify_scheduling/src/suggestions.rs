// --- File: crates/bookify_scheduling/src/suggestions.rs ---
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::slots::Slot;

/// How many closest-slot suggestions are offered before falling back to
/// another day.
const MAX_SUGGESTIONS: usize = 3;

/// One ranked alternative offered when the requested time is taken.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[cfg_attr(feature = "openapi", schema(example = "10:00"))]
    pub time: String,
    #[cfg_attr(feature = "openapi", schema(example = "10:00 AM"))]
    pub display_time: String,
    /// Customer-facing phrasing, e.g. "How about 10:00 AM? (15 minutes later)"
    pub message: String,
    /// 1 = closest to the preferred time; the tomorrow fallback is always 4
    pub priority: u8,
    /// Set only on the tomorrow fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_day: Option<bool>,
}

/// Ranks the available slots by proximity to the preferred instant.
///
/// The closest three slots become suggestions with priorities 1..3; ties keep
/// chronological order, so the earlier slot wins. When fewer than three slots
/// are available at all, a fixed "book tomorrow instead" suggestion at
/// priority 4 is appended, on top of whatever closest slots exist. An empty
/// slot list therefore still yields the fallback.
pub fn suggest_alternatives(
    preferred_date: NaiveDate,
    preferred_instant: DateTime<Utc>,
    available: &[Slot],
) -> Vec<Suggestion> {
    let mut ranked: Vec<&Slot> = available.iter().collect();
    ranked.sort_by_key(|slot| (slot.start - preferred_instant).num_seconds().abs());

    let mut suggestions: Vec<Suggestion> = ranked
        .iter()
        .take(MAX_SUGGESTIONS)
        .enumerate()
        .map(|(rank, slot)| Suggestion {
            time: slot.time.clone(),
            display_time: slot.display_time.clone(),
            message: proximity_message(&slot.display_time, slot.start - preferred_instant),
            priority: rank as u8 + 1,
            alternative_day: None,
        })
        .collect();

    if available.len() < MAX_SUGGESTIONS {
        suggestions.push(tomorrow_suggestion(preferred_date));
    }

    suggestions
}

/// Phrases the distance between a slot and the preferred time.
///
/// Below an hour the wording is exact minutes; from an hour up it rounds to
/// whole hours. A slot strictly after the preferred time reads "later",
/// otherwise "earlier" (a perfect tie reads "earlier").
fn proximity_message(display_time: &str, diff: Duration) -> String {
    let diff_minutes = diff.num_minutes().abs();
    let direction = if diff > Duration::zero() {
        "later"
    } else {
        "earlier"
    };
    if diff_minutes < 60 {
        format!("How about {display_time}? ({diff_minutes} minutes {direction})")
    } else {
        let hours = (diff_minutes as f64 / 60.0).round() as i64;
        let unit = if hours > 1 { "hours" } else { "hour" };
        format!("How about {display_time}? ({hours} {unit} {direction})")
    }
}

fn tomorrow_suggestion(preferred_date: NaiveDate) -> Suggestion {
    let tomorrow = preferred_date + Duration::days(1);
    Suggestion {
        time: "09:00".to_string(),
        display_time: "9:00 AM".to_string(),
        message: format!(
            "We have more availability tomorrow ({}). Would you like to book for tomorrow?",
            format_short_date(tomorrow)
        ),
        priority: 4,
        alternative_day: Some(true),
    }
}

/// `M/D/YYYY` without zero padding, e.g. `6/11/2024`.
fn format_short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}
