//! Create payment use case.

use std::sync::Arc;

use payment_domain::{NewPayment, Payment, PaymentId};

use crate::infrastructure::ports::PaymentRepo;

use super::error::PaymentError;

pub struct CreatePayment {
    payment_repo: Arc<dyn PaymentRepo>,
}

impl CreatePayment {
    pub fn new(payment_repo: Arc<dyn PaymentRepo>) -> Self {
        Self { payment_repo }
    }

    /// Records a new payment with its total computed; returns the new id.
    pub async fn execute(&self, new: NewPayment) -> Result<PaymentId, PaymentError> {
        let payment = Payment::new(PaymentId::new(), new);
        self.payment_repo.insert(&payment).await?;

        tracing::info!(
            payment_id = %payment.id,
            total_due = payment.total_due,
            "Created payment"
        );
        Ok(payment.id)
    }
}
