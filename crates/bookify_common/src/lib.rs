// --- File: crates/bookify_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Feature flag handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    auth_error, config_error, external_service_error, internal_error, not_found, storage_error,
    validation_error, BookifyError, Context, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{
    api_error,
    client::{create_client, HTTP_CLIENT},
    IntoHttpResponse,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error};

// Re-export feature flag handling utilities for easier access
pub use features::is_feature_enabled;

// Conditionally re-export feature-specific functions
#[cfg(feature = "gcal")]
pub use features::is_gcal_enabled;

#[cfg(feature = "widget")]
pub use features::is_widget_enabled;
