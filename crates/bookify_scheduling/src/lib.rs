// --- File: crates/bookify_scheduling/src/lib.rs ---

// Declare modules within this crate
pub mod availability; // Fuzzy availability check
pub mod config; // Working-window configuration
pub mod error; // Error handling
pub mod slots; // Slot grid generation
pub mod suggestions; // Alternative-time ranking

#[cfg(test)]
mod availability_test;
#[cfg(test)]
mod slots_proptest;
#[cfg(test)]
mod suggestions_test;

// Re-export the core types and operations for easier access
pub use availability::is_time_available;
pub use config::SchedulingConfig;
pub use error::SchedulingError;
pub use slots::{
    generate_available_slots, local_instant, parse_date, parse_time, parse_timezone, BusyInterval,
    Slot,
};
pub use suggestions::{suggest_alternatives, Suggestion};
