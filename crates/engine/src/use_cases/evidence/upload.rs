//! Upload evidence use case.

use std::sync::Arc;

use payment_domain::{Evidence, EvidenceContentType, EvidenceId, PaymentId};

use crate::infrastructure::ports::{ClockPort, EvidenceRepo, PaymentRepo};

use super::EvidenceError;

/// Stores a proof-of-payment file and links it to its payment.
pub struct UploadEvidence {
    payment_repo: Arc<dyn PaymentRepo>,
    evidence_repo: Arc<dyn EvidenceRepo>,
    clock: Arc<dyn ClockPort>,
}

impl UploadEvidence {
    pub fn new(
        payment_repo: Arc<dyn PaymentRepo>,
        evidence_repo: Arc<dyn EvidenceRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            payment_repo,
            evidence_repo,
            clock,
        }
    }

    /// The content type is checked before the payment is looked up.
    pub async fn execute(
        &self,
        payment_id: PaymentId,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<EvidenceId, EvidenceError> {
        let content_type = content_type
            .parse::<EvidenceContentType>()
            .map_err(|e| EvidenceError::InvalidInput(e.detail()))?;

        if self.payment_repo.get(payment_id).await?.is_none() {
            return Err(EvidenceError::PaymentNotFound);
        }

        let evidence = Evidence::new(payment_id, filename, content_type, data, self.clock.now());
        self.evidence_repo.insert(&evidence).await?;
        self.payment_repo
            .set_evidence(payment_id, evidence.id)
            .await?;

        tracing::info!(
            payment_id = %payment_id,
            evidence_id = %evidence.id,
            content_type = %content_type,
            bytes = evidence.size(),
            "Attached evidence to payment"
        );
        Ok(evidence.id)
    }
}
