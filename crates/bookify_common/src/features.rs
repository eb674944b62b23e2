// --- File: crates/bookify_common/src/features.rs ---
//! Feature flag handling for the Bookify application.
//!
//! Features are gated twice: at compile time with `#[cfg(feature = "...")]`
//! and at runtime from configuration values. A feature is live only when its
//! `use_*` flag is set AND its configuration section is present.
//!
//! ## Available Features
//!
//! - `gcal`: Google Calendar integration (OAuth, availability, event creation)
//! - `widget`: chat-widget configuration endpoint and booking webhook

use bookify_config::AppConfig;
use std::sync::Arc;

/// Check if a feature is enabled at runtime based on configuration.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `use_feature` - The configuration flag that enables the feature
/// * `feature_config` - The configuration section for the feature
///
/// # Returns
///
/// `true` if the feature is enabled, `false` otherwise
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the Google Calendar feature is enabled at runtime.
#[cfg(feature = "gcal")]
pub fn is_gcal_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_gcal, config.gcal.as_ref())
}

/// Check if the widget feature is enabled at runtime.
///
/// The widget section is optional even when the flag is set; defaults cover
/// every field, so only the flag matters here.
#[cfg(feature = "widget")]
pub fn is_widget_enabled(config: &Arc<AppConfig>) -> bool {
    config.use_widget
}
