//! SQLite persistence adapters
//!
//! Implements the repository ports on top of a shared sqlx pool.

mod connection;
mod evidence_repository;
mod payment_repository;

pub use connection::Database;
pub use evidence_repository::SqliteEvidenceRepo;
pub use payment_repository::SqlitePaymentRepo;
