// --- File: crates/bookify_gcal/src/lib.rs ---

// Declare modules within this crate
pub mod auth;
#[cfg(test)]
mod auth_test;
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod service;

// Re-export the pieces the backend and the widget crate wire together
pub use auth::OAuthClient;
pub use handlers::GcalState;
pub use logic::{service_error, GcalError};
pub use routes::routes;
pub use service::GoogleCalendarService;
