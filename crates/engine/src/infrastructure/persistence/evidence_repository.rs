//! Evidence file storage in SQLite.

use async_trait::async_trait;
use chrono::SecondsFormat;
use payment_domain::common::parse_datetime;
use payment_domain::{Evidence, EvidenceContentType, EvidenceId, PaymentId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::connection::Database;
use crate::infrastructure::ports::{EvidenceRepo, RepoError};

const TABLE: &str = "evidence";

pub struct SqliteEvidenceRepo {
    pool: SqlitePool,
}

impl SqliteEvidenceRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

fn row_to_evidence(row: &SqliteRow) -> Result<Evidence, RepoError> {
    let get_text = |name: &str| -> Result<String, RepoError> {
        row.try_get(name)
            .map_err(|e| RepoError::corrupt(TABLE, format!("{}: {}", name, e)))
    };

    let id = get_text("id")?
        .parse::<EvidenceId>()
        .map_err(|e| RepoError::corrupt(TABLE, e))?;
    let payment_id = get_text("payment_id")?
        .parse::<PaymentId>()
        .map_err(|e| RepoError::corrupt(TABLE, e))?;
    let content_type = get_text("content_type")?
        .parse::<EvidenceContentType>()
        .map_err(|e| RepoError::corrupt(TABLE, e))?;
    let uploaded_at = parse_datetime(&get_text("uploaded_at")?)
        .map_err(|e| RepoError::corrupt(TABLE, format!("uploaded_at: {}", e)))?;
    let data: Vec<u8> = row
        .try_get("data")
        .map_err(|e| RepoError::corrupt(TABLE, format!("data: {}", e)))?;

    Ok(Evidence {
        id,
        payment_id,
        filename: get_text("filename")?,
        content_type,
        data,
        uploaded_at,
    })
}

#[async_trait]
impl EvidenceRepo for SqliteEvidenceRepo {
    async fn insert(&self, evidence: &Evidence) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO evidence (id, payment_id, filename, content_type, data, uploaded_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(evidence.id.to_string())
        .bind(evidence.payment_id.to_string())
        .bind(evidence.filename.as_str())
        .bind(evidence.content_type.as_mime())
        .bind(evidence.data.as_slice())
        .bind(
            evidence
                .uploaded_at
                .to_rfc3339_opts(SecondsFormat::Micros, true),
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("evidence.insert", e))?;

        tracing::debug!(
            evidence_id = %evidence.id,
            payment_id = %evidence.payment_id,
            bytes = evidence.size(),
            "Stored evidence file"
        );
        Ok(())
    }

    async fn get(&self, id: EvidenceId) -> Result<Option<Evidence>, RepoError> {
        let row = sqlx::query(
            "SELECT id, payment_id, filename, content_type, data, uploaded_at \
             FROM evidence WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("evidence.get", e))?;

        row.as_ref().map(row_to_evidence).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::payment;
    use crate::infrastructure::persistence::SqlitePaymentRepo;
    use crate::infrastructure::ports::PaymentRepo;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn stores_and_loads_binary_content() {
        let db = Database::in_memory().await.unwrap();
        let payments = SqlitePaymentRepo::new(&db);
        let repo = SqliteEvidenceRepo::new(&db);
        let owner = payment("Ada", "Lovelace", "ada@example.com");
        payments.insert(&owner).await.unwrap();

        let evidence = Evidence::new(
            owner.id,
            "receipt scan.pdf",
            EvidenceContentType::Pdf,
            vec![0x25, 0x50, 0x44, 0x46, 0x00, 0xff],
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        );
        repo.insert(&evidence).await.unwrap();

        let loaded = repo.get(evidence.id).await.unwrap();
        assert_eq!(loaded, Some(evidence));
    }

    #[tokio::test]
    async fn unknown_id_returns_none() {
        let db = Database::in_memory().await.unwrap();
        let repo = SqliteEvidenceRepo::new(&db);
        assert!(repo.get(EvidenceId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn evidence_requires_existing_payment() {
        let db = Database::in_memory().await.unwrap();
        let repo = SqliteEvidenceRepo::new(&db);
        let orphan = Evidence::new(
            PaymentId::new(),
            "x.png",
            EvidenceContentType::Png,
            vec![1, 2, 3],
            Utc::now(),
        );
        assert!(repo.insert(&orphan).await.is_err());
    }

    #[tokio::test]
    async fn deleting_payment_removes_its_evidence() {
        let db = Database::in_memory().await.unwrap();
        let payments = SqlitePaymentRepo::new(&db);
        let repo = SqliteEvidenceRepo::new(&db);
        let owner = payment("Ada", "Lovelace", "ada@example.com");
        payments.insert(&owner).await.unwrap();
        let evidence = Evidence::new(
            owner.id,
            "photo.jpg",
            EvidenceContentType::Jpeg,
            vec![0xff, 0xd8],
            Utc::now(),
        );
        repo.insert(&evidence).await.unwrap();

        payments.delete(owner.id).await.unwrap();

        assert!(repo.get(evidence.id).await.unwrap().is_none());
    }
}
