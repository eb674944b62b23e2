//! On-disk document model
//!
//! The whole store is one JSON document. Every top-level field tolerates
//! absence so hand-edited or older files keep loading.

use bookify_common::services::StoredTokens;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Root of the data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataDocument {
    /// Per-bot widget overrides, keyed by bot id. Kept as raw JSON so the
    /// widget crate owns the field set.
    #[serde(default)]
    pub clients: HashMap<String, Value>,
    /// Google OAuth tokens, keyed by client id.
    #[serde(default)]
    pub google_tokens: HashMap<String, StoredTokens>,
    /// Booked appointments, oldest first.
    #[serde(default)]
    pub appointments: Vec<AppointmentRecord>,
}

/// A booked appointment. Serialized camelCase, matching what the widget
/// and any dashboard reading the file expect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    pub id: String,
    pub bot_id: String,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    /// "YYYY-MM-DD"
    pub appointment_date: String,
    /// "HH:MM"
    pub appointment_time: String,
    /// Always "confirmed" for records created by the booking flow.
    pub status: String,
    /// Calendar event id when the booking reached Google.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_event_id: Option<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Builds a fresh appointment id of the form `apt_{epoch_millis}_{suffix}`.
pub fn new_appointment_id() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("apt_{}_{}", Utc::now().timestamp_millis(), &suffix[..9])
}

/// Current time in the store's timestamp format (millisecond precision,
/// `Z` suffix).
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
