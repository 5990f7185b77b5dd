//! Download evidence use case.

use std::sync::Arc;

use payment_domain::{Evidence, PaymentId};

use crate::infrastructure::ports::{EvidenceRepo, PaymentRepo};

use super::EvidenceError;

pub struct DownloadEvidence {
    payment_repo: Arc<dyn PaymentRepo>,
    evidence_repo: Arc<dyn EvidenceRepo>,
}

impl DownloadEvidence {
    pub fn new(payment_repo: Arc<dyn PaymentRepo>, evidence_repo: Arc<dyn EvidenceRepo>) -> Self {
        Self {
            payment_repo,
            evidence_repo,
        }
    }

    /// Returns the evidence currently linked to the payment.
    ///
    /// A missing payment, a payment without evidence and a dangling link
    /// all report `EvidenceNotFound`.
    pub async fn execute(&self, payment_id: PaymentId) -> Result<Evidence, EvidenceError> {
        let evidence_id = self
            .payment_repo
            .get(payment_id)
            .await?
            .and_then(|payment| payment.evidence_file_id)
            .ok_or(EvidenceError::EvidenceNotFound)?;

        self.evidence_repo
            .get(evidence_id)
            .await?
            .ok_or(EvidenceError::EvidenceNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockEvidenceRepo, MockPaymentRepo};
    use crate::test_fixtures::payment;
    use chrono::Utc;
    use payment_domain::{EvidenceContentType, EvidenceId};

    #[tokio::test]
    async fn payment_without_evidence_is_not_found() {
        let owner = payment("Ada", "Lovelace", "ada@example.com");
        let mut payments = MockPaymentRepo::new();
        payments
            .expect_get()
            .returning(move |_| Ok(Some(owner.clone())));

        let use_case = DownloadEvidence::new(Arc::new(payments), Arc::new(MockEvidenceRepo::new()));
        let result = use_case.execute(PaymentId::new()).await;

        assert!(matches!(result, Err(EvidenceError::EvidenceNotFound)));
    }

    #[tokio::test]
    async fn missing_payment_is_reported_as_missing_evidence() {
        let mut payments = MockPaymentRepo::new();
        payments.expect_get().returning(|_| Ok(None));

        let use_case = DownloadEvidence::new(Arc::new(payments), Arc::new(MockEvidenceRepo::new()));
        let result = use_case.execute(PaymentId::new()).await;

        assert!(matches!(result, Err(EvidenceError::EvidenceNotFound)));
    }

    #[tokio::test]
    async fn dangling_link_is_not_found() {
        let mut owner = payment("Ada", "Lovelace", "ada@example.com");
        owner.attach_evidence(EvidenceId::new());
        let mut payments = MockPaymentRepo::new();
        payments
            .expect_get()
            .returning(move |_| Ok(Some(owner.clone())));
        let mut evidence_repo = MockEvidenceRepo::new();
        evidence_repo.expect_get().returning(|_| Ok(None));

        let use_case = DownloadEvidence::new(Arc::new(payments), Arc::new(evidence_repo));
        let result = use_case.execute(PaymentId::new()).await;

        assert!(matches!(result, Err(EvidenceError::EvidenceNotFound)));
    }

    #[tokio::test]
    async fn returns_linked_evidence() {
        let mut owner = payment("Ada", "Lovelace", "ada@example.com");
        let evidence = Evidence::new(
            owner.id,
            "receipt.pdf",
            EvidenceContentType::Pdf,
            vec![1, 2, 3],
            Utc::now(),
        );
        owner.attach_evidence(evidence.id);
        let evidence_id = evidence.id;

        let mut payments = MockPaymentRepo::new();
        let payment_id = owner.id;
        payments
            .expect_get()
            .returning(move |_| Ok(Some(owner.clone())));
        let mut evidence_repo = MockEvidenceRepo::new();
        evidence_repo
            .expect_get()
            .withf(move |id| *id == evidence_id)
            .returning(move |_| Ok(Some(evidence.clone())));

        let use_case = DownloadEvidence::new(Arc::new(payments), Arc::new(evidence_repo));
        let found = use_case.execute(payment_id).await.unwrap();

        assert_eq!(found.filename, "receipt.pdf");
        assert_eq!(found.data, vec![1, 2, 3]);
    }
}
