//! Update payment use case.

use std::sync::Arc;

use payment_domain::{PaymentId, PaymentUpdate};

use crate::infrastructure::ports::{EvidenceRepo, PaymentRepo};

use super::error::PaymentError;

/// Applies a partial update to a stored payment.
///
/// Moving a payment to `completed` requires the update to name an evidence
/// file that was uploaded for that payment.
pub struct UpdatePayment {
    payment_repo: Arc<dyn PaymentRepo>,
    evidence_repo: Arc<dyn EvidenceRepo>,
}

impl UpdatePayment {
    pub fn new(payment_repo: Arc<dyn PaymentRepo>, evidence_repo: Arc<dyn EvidenceRepo>) -> Self {
        Self {
            payment_repo,
            evidence_repo,
        }
    }

    pub async fn execute(&self, id: PaymentId, update: PaymentUpdate) -> Result<(), PaymentError> {
        if update.completes() && update.evidence_file_id.is_none() {
            return Err(PaymentError::invalid(
                "Evidence file is required for completed status",
            ));
        }

        let mut payment = self
            .payment_repo
            .get(id)
            .await?
            .ok_or(PaymentError::NotFound(id))?;

        if let Some(evidence_id) = update.evidence_file_id {
            let belongs = self
                .evidence_repo
                .get(evidence_id)
                .await?
                .is_some_and(|evidence| evidence.payment_id == id);
            if !belongs {
                return Err(PaymentError::invalid(
                    "Evidence file not found for this payment",
                ));
            }
        }

        payment.apply_update(update);
        self.payment_repo.save(&payment).await?;

        tracing::info!(
            payment_id = %id,
            status = %payment.payee_payment_status,
            "Updated payment"
        );
        Ok(())
    }
}
