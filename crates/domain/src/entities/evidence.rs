//! Evidence entity - a proof-of-payment file attached to a payment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::{EvidenceId, PaymentId};

/// The file types accepted as payment evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvidenceContentType {
    #[serde(rename = "application/pdf")]
    Pdf,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg")]
    Jpeg,
}

impl EvidenceContentType {
    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for EvidenceContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

impl FromStr for EvidenceContentType {
    type Err = DomainError;

    /// Parameters such as `; charset=` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let essence = s.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/pdf" => Ok(Self::Pdf),
            "image/png" => Ok(Self::Png),
            "image/jpeg" => Ok(Self::Jpeg),
            _ => Err(DomainError::validation("File type not allowed")),
        }
    }
}

/// An uploaded evidence file.
#[derive(Debug, Clone, PartialEq)]
pub struct Evidence {
    pub id: EvidenceId,
    pub payment_id: PaymentId,
    pub filename: String,
    pub content_type: EvidenceContentType,
    pub data: Vec<u8>,
    pub uploaded_at: DateTime<Utc>,
}

impl Evidence {
    pub fn new(
        payment_id: PaymentId,
        filename: impl Into<String>,
        content_type: EvidenceContentType,
        data: Vec<u8>,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EvidenceId::new(),
            payment_id,
            filename: filename.into(),
            content_type,
            data,
            uploaded_at,
        }
    }

    /// Filename for the `Content-Disposition` header; spaces become `_`.
    pub fn attachment_filename(&self) -> String {
        self.filename.replace(' ', "_")
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}
