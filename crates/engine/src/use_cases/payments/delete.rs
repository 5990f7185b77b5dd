//! Delete payment use case.

use std::sync::Arc;

use payment_domain::PaymentId;

use crate::infrastructure::ports::PaymentRepo;

use super::error::PaymentError;

pub struct DeletePayment {
    payment_repo: Arc<dyn PaymentRepo>,
}

impl DeletePayment {
    pub fn new(payment_repo: Arc<dyn PaymentRepo>) -> Self {
        Self { payment_repo }
    }

    /// Deletes the payment; its evidence rows go with it.
    pub async fn execute(&self, id: PaymentId) -> Result<(), PaymentError> {
        if !self.payment_repo.delete(id).await? {
            return Err(PaymentError::NotFound(id));
        }

        tracing::info!(payment_id = %id, "Deleted payment");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockPaymentRepo;

    #[tokio::test]
    async fn deletes_existing_payment() {
        let id = PaymentId::new();
        let mut repo = MockPaymentRepo::new();
        repo.expect_delete()
            .withf(move |pid| *pid == id)
            .times(1)
            .returning(|_| Ok(true));

        let use_case = DeletePayment::new(Arc::new(repo));
        assert!(use_case.execute(id).await.is_ok());
    }

    #[tokio::test]
    async fn missing_payment_is_not_found() {
        let mut repo = MockPaymentRepo::new();
        repo.expect_delete().returning(|_| Ok(false));

        let use_case = DeletePayment::new(Arc::new(repo));
        let result = use_case.execute(PaymentId::new()).await;

        assert!(matches!(result, Err(PaymentError::NotFound(_))));
    }
}
