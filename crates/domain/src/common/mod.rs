//! Common utility functions shared across the domain and the engine.
//!
//! Pure functions only: no side effects, no I/O, only chrono for datetime
//! handling.

pub mod datetime;
pub mod string;

// Re-export commonly used functions at crate root for convenience
pub use datetime::{parse_datetime, parse_lenient_date, parse_lenient_datetime};
pub use string::{none_if_blank, some_if_not_blank};
