// --- File: crates/bookify_widget/src/lib.rs ---

// Declare modules within this crate
pub mod config;
pub mod doc;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod routes;

// Re-export the pieces the backend wires together
pub use config::{BotConfig, BotOverrides};
pub use handlers::WidgetState;
pub use logic::WidgetError;
pub use routes::routes;
