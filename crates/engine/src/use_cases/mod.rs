//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area of the payment ledger.
//! Use cases depend only on port traits, so they are tested with mocks.

pub mod evidence;
pub mod health;
pub mod import;
pub mod payments;

pub use evidence::{EvidenceError, EvidenceUseCases};
pub use health::CheckDatabase;
pub use import::{ImportError, ImportPaymentsCsv};
pub use payments::{PaymentError, PaymentUseCases};
