//! Payment operation errors.

use payment_domain::PaymentId;

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during payment operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment not found")]
    NotFound(PaymentId),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl PaymentError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
