//! Payment management engine library.
//!
//! This crate contains all server-side code for the payment ledger.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration over the repository ports
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Shared builders for unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
