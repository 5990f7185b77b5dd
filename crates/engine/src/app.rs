//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    persistence::{Database, SqliteEvidenceRepo, SqlitePaymentRepo},
    ports::{ClockPort, EvidenceRepo, PaymentRepo},
};
use crate::use_cases::{
    self,
    evidence::{DownloadEvidence, UploadEvidence},
    payments::{CreatePayment, DeletePayment, ListPayments, UpdatePayment},
};

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub payments: use_cases::PaymentUseCases,
    pub evidence: use_cases::EvidenceUseCases,
    pub import: Arc<use_cases::ImportPaymentsCsv>,
    pub health: Arc<use_cases::CheckDatabase>,
}

impl App {
    /// Wires the SQLite repositories into every use case.
    pub fn new(db: &Database, clock: Arc<dyn ClockPort>) -> Self {
        let payment_repo: Arc<dyn PaymentRepo> = Arc::new(SqlitePaymentRepo::new(db));
        let evidence_repo: Arc<dyn EvidenceRepo> = Arc::new(SqliteEvidenceRepo::new(db));
        Self::from_ports(payment_repo, evidence_repo, clock)
    }

    pub fn from_ports(
        payment_repo: Arc<dyn PaymentRepo>,
        evidence_repo: Arc<dyn EvidenceRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let payments = use_cases::PaymentUseCases::new(
            Arc::new(ListPayments::new(payment_repo.clone(), clock.clone())),
            Arc::new(CreatePayment::new(payment_repo.clone())),
            Arc::new(UpdatePayment::new(
                payment_repo.clone(),
                evidence_repo.clone(),
            )),
            Arc::new(DeletePayment::new(payment_repo.clone())),
        );

        let evidence = use_cases::EvidenceUseCases::new(
            Arc::new(UploadEvidence::new(
                payment_repo.clone(),
                evidence_repo.clone(),
                clock,
            )),
            Arc::new(DownloadEvidence::new(payment_repo.clone(), evidence_repo)),
        );

        Self {
            use_cases: UseCases {
                payments,
                evidence,
                import: Arc::new(use_cases::ImportPaymentsCsv::new(payment_repo.clone())),
                health: Arc::new(use_cases::CheckDatabase::new(payment_repo)),
            },
        }
    }
}
