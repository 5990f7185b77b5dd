//! Database connectivity check.

use std::sync::Arc;

use crate::infrastructure::ports::{PaymentRepo, RepoError};

pub struct CheckDatabase {
    payment_repo: Arc<dyn PaymentRepo>,
}

impl CheckDatabase {
    pub fn new(payment_repo: Arc<dyn PaymentRepo>) -> Self {
        Self { payment_repo }
    }

    pub async fn execute(&self) -> Result<(), RepoError> {
        self.payment_repo.ping().await.inspect_err(|e| {
            tracing::warn!(error = %e, "Database connectivity check failed");
        })
    }
}
