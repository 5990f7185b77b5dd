//! Repository port traits for database access.

use async_trait::async_trait;
use chrono::NaiveDate;
use payment_domain::{Evidence, EvidenceId, Payment, PaymentId};

use super::error::RepoError;
use super::types::PaymentQuery;

// =============================================================================
// Payments
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepo: Send + Sync {
    // CRUD
    async fn insert(&self, payment: &Payment) -> Result<(), RepoError>;
    /// Inserts all payments atomically; returns how many were written.
    async fn insert_many(&self, payments: &[Payment]) -> Result<u64, RepoError>;
    async fn get(&self, id: PaymentId) -> Result<Option<Payment>, RepoError>;
    async fn save(&self, payment: &Payment) -> Result<(), RepoError>;
    /// Returns false when no payment had this id.
    async fn delete(&self, id: PaymentId) -> Result<bool, RepoError>;

    // Queries
    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>, RepoError>;
    async fn count(&self, query: &PaymentQuery) -> Result<u64, RepoError>;

    /// Moves non-completed payments to `due_now`/`overdue` relative to
    /// `today`; returns the number of rows changed.
    async fn refresh_statuses(&self, today: NaiveDate) -> Result<u64, RepoError>;

    // Attachments
    async fn set_evidence(&self, id: PaymentId, evidence_id: EvidenceId)
        -> Result<(), RepoError>;

    /// Round-trips to the database.
    async fn ping(&self) -> Result<(), RepoError>;
}

// =============================================================================
// Evidence files
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvidenceRepo: Send + Sync {
    async fn insert(&self, evidence: &Evidence) -> Result<(), RepoError>;
    async fn get(&self, id: EvidenceId) -> Result<Option<Evidence>, RepoError>;
}
