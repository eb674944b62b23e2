//! JSON document persistence for Bookify
//!
//! One small JSON file backs everything the server has to remember across
//! restarts: per-bot widget overrides, Google OAuth tokens keyed by client
//! id, and the list of booked appointments. Reads and writes go through an
//! in-process lock and every write replaces the file atomically, so the
//! document stays parseable even if the process dies mid-write.
//!
//! # Usage
//!
//! ```rust,no_run
//! use bookify_store::JsonStore;
//!
//! fn open_store() -> Result<JsonStore, Box<dyn std::error::Error>> {
//!     let store = JsonStore::open("./bookify_data.json")?;
//!     Ok(store)
//! }
//! ```

pub mod document;
pub mod error;
pub mod store;

#[cfg(test)]
mod store_test;

// Re-export the document model and store for ease of use
pub use document::{new_appointment_id, now_timestamp, AppointmentRecord, DataDocument};
pub use error::StoreError;
pub use store::{JsonStore, DEFAULT_DATA_FILE};
