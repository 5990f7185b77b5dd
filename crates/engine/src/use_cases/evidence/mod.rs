//! Evidence file use cases.

mod download;
mod upload;

use std::sync::Arc;

use crate::infrastructure::ports::RepoError;

pub use download::DownloadEvidence;
pub use upload::UploadEvidence;

/// Errors that can occur while attaching or fetching evidence.
#[derive(Debug, thiserror::Error)]
pub enum EvidenceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Payment not found")]
    PaymentNotFound,
    #[error("Evidence file not found")]
    EvidenceNotFound,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Container for evidence use cases.
pub struct EvidenceUseCases {
    pub upload: Arc<UploadEvidence>,
    pub download: Arc<DownloadEvidence>,
}

impl EvidenceUseCases {
    pub fn new(upload: Arc<UploadEvidence>, download: Arc<DownloadEvidence>) -> Self {
        Self { upload, download }
    }
}
