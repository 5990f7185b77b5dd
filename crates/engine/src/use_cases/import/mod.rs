//! Bulk CSV import of payments.

mod normalize;

use std::sync::Arc;

use payment_domain::{Payment, PaymentId};

use crate::infrastructure::ports::{PaymentRepo, RepoError};

pub use normalize::parse_csv;

/// Errors raised while importing a CSV file.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Row {row}: {message}")]
    Malformed { row: usize, message: String },
    #[error("Row {row}: {column}: {message}")]
    InvalidField {
        row: usize,
        column: &'static str,
        message: String,
    },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl ImportError {
    pub(crate) fn malformed(row: usize, message: impl ToString) -> Self {
        Self::Malformed {
            row,
            message: message.to_string(),
        }
    }

    pub(crate) fn invalid_field(
        row: usize,
        column: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            row,
            column,
            message: message.into(),
        }
    }
}

/// Imports every row of a CSV export, all or nothing.
pub struct ImportPaymentsCsv {
    payment_repo: Arc<dyn PaymentRepo>,
}

impl ImportPaymentsCsv {
    pub fn new(payment_repo: Arc<dyn PaymentRepo>) -> Self {
        Self { payment_repo }
    }

    /// Returns the number of payments inserted.
    pub async fn execute(&self, filename: &str, bytes: &[u8]) -> Result<u64, ImportError> {
        if !filename.to_ascii_lowercase().ends_with(".csv") {
            return Err(ImportError::InvalidInput("File must be a CSV".to_string()));
        }

        let rows = parse_csv(bytes)?;
        if rows.is_empty() {
            return Err(ImportError::InvalidInput("CSV file has no rows".to_string()));
        }

        let payments: Vec<Payment> = rows
            .into_iter()
            .map(|new| Payment::new(PaymentId::new(), new))
            .collect();
        let inserted = self.payment_repo.insert_many(&payments).await?;

        tracing::info!(filename, inserted, "Imported payments from CSV");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockPaymentRepo;

    const CSV: &str = "payee_first_name,payee_last_name,payee_payment_status,\
payee_added_date_utc,payee_due_date,payee_address_line_1,payee_city,payee_country,\
payee_postal_code,payee_phone_number,payee_email,currency,discount_percent,tax_percent,due_amount\n\
Ada,Lovelace,pending,2024-01-15,2024-02-01,1 Main St,London,GB,SW1A 1AA,+442079460000,ada@example.com,GBP,10,20,250\n\
Alan,Turing,,2024-01-16,2024-03-01,2 Main St,Wilmslow,GB,SK9 1AA,+441625000000,alan@example.com,GBP,,,80\n";

    #[tokio::test]
    async fn rejects_non_csv_filename_without_touching_repo() {
        let use_case = ImportPaymentsCsv::new(Arc::new(MockPaymentRepo::new()));

        let err = use_case.execute("payments.xlsx", CSV.as_bytes()).await.unwrap_err();

        assert_eq!(err.to_string(), "File must be a CSV");
    }

    #[tokio::test]
    async fn inserts_all_rows_with_totals() {
        let mut repo = MockPaymentRepo::new();
        repo.expect_insert_many()
            .withf(|payments| {
                payments.len() == 2
                    && payments[0].total_due == 270.0
                    && payments[1].total_due == 80.0
            })
            .times(1)
            .returning(|payments| Ok(payments.len() as u64));

        let use_case = ImportPaymentsCsv::new(Arc::new(repo));
        let inserted = use_case.execute("export.csv", CSV.as_bytes()).await.unwrap();

        assert_eq!(inserted, 2);
    }

    #[tokio::test]
    async fn invalid_row_aborts_whole_import() {
        let broken = CSV.replace(",80\n", ",eighty\n");
        let mut repo = MockPaymentRepo::new();
        repo.expect_insert_many().never();

        let use_case = ImportPaymentsCsv::new(Arc::new(repo));
        let err = use_case.execute("export.csv", broken.as_bytes()).await.unwrap_err();

        assert!(matches!(
            err,
            ImportError::InvalidField {
                row: 2,
                column: "due_amount",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn header_only_file_is_rejected() {
        let header = CSV.lines().next().unwrap();
        let use_case = ImportPaymentsCsv::new(Arc::new(MockPaymentRepo::new()));

        let err = use_case.execute("empty.csv", header.as_bytes()).await.unwrap_err();

        assert!(matches!(err, ImportError::InvalidInput(_)));
    }
}
