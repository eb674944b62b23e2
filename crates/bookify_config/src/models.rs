// --- File: crates/bookify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Google Calendar Config ---
// Holds non-secret Google OAuth config. Secret loaded directly from env var.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GcalConfig {
    pub client_id: Option<String>,    // Falls back to GOOGLE_CLIENT_ID
    pub redirect_uri: Option<String>, // Falls back to GOOGLE_REDIRECT_URI, then localhost
    pub calendar_id: Option<String>,  // Defaults to "primary"
    pub time_zone: Option<String>,    // IANA zone for the booking grid, defaults to UTC
    // Secret loaded directly from env var: GOOGLE_CLIENT_SECRET
}

// --- Booking Window Config ---
// Working hours and grid granularity for availability checks.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BookingConfig {
    pub work_start_time: Option<String>, // "HH:MM", defaults to "09:00"
    pub work_end_time: Option<String>,   // "HH:MM", defaults to "17:00"
    pub slot_step_minutes: Option<u32>,  // Defaults to 30
    pub tolerance_minutes: Option<i64>,  // Defaults to 30
}

// --- Storage Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    pub data_file: String, // e.g. "./bookify_data.json"
}

// --- Widget Config ---
// Deployment-level widget knobs. Per-bot appearance lives in the data file.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct WidgetConfig {
    pub default_bot_id: Option<String>, // Defaults to "default-bot"
    pub webhook_url: Option<String>,    // Advertised in bot config responses
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,
    #[serde(default)]
    pub use_widget: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub booking: Option<BookingConfig>,
    #[serde(default)]
    pub storage: Option<StorageConfig>,
    #[serde(default)]
    pub widget: Option<WidgetConfig>,
}
