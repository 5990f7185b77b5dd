//! SQLite connection management

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

/// Shared SQLite connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects to `url` and creates the schema if it does not exist yet.
    pub async fn connect(url: &str) -> Result<Self, RepoError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| RepoError::database("connect", e))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        let db = Self { pool };
        db.initialize_schema().await?;
        tracing::info!("Connected to SQLite at {}", url);
        Ok(db)
    }

    /// Private in-memory database; a single connection keeps it alive.
    pub async fn in_memory() -> Result<Self, RepoError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RepoError::database("connect", e))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        let db = Self { pool };
        db.initialize_schema().await?;
        Ok(db)
    }

    /// Get a reference to the pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the database schema (tables and indexes)
    pub async fn initialize_schema(&self) -> Result<(), RepoError> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS payments (
                id TEXT PRIMARY KEY NOT NULL,
                payee_first_name TEXT NOT NULL,
                payee_last_name TEXT NOT NULL,
                payee_payment_status TEXT NOT NULL,
                payee_added_date_utc TEXT NOT NULL,
                payee_due_date TEXT NOT NULL,
                payee_address_line_1 TEXT NOT NULL,
                payee_address_line_2 TEXT,
                payee_city TEXT NOT NULL,
                payee_country TEXT NOT NULL,
                payee_province_or_state TEXT,
                payee_postal_code TEXT NOT NULL,
                payee_phone_number TEXT NOT NULL,
                payee_email TEXT NOT NULL,
                currency TEXT NOT NULL,
                discount_percent REAL,
                tax_percent REAL,
                due_amount REAL NOT NULL,
                total_due REAL NOT NULL,
                evidence_file_id TEXT,
                search_text TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_payments_status ON payments (payee_payment_status)",
            "CREATE INDEX IF NOT EXISTS idx_payments_due_date ON payments (payee_due_date)",
            "CREATE INDEX IF NOT EXISTS idx_payments_added ON payments (payee_added_date_utc, id)",
            r#"
            CREATE TABLE IF NOT EXISTS evidence (
                id TEXT PRIMARY KEY NOT NULL,
                payment_id TEXT NOT NULL REFERENCES payments (id) ON DELETE CASCADE,
                filename TEXT NOT NULL,
                content_type TEXT NOT NULL,
                data BLOB NOT NULL,
                uploaded_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_evidence_payment ON evidence (payment_id)",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| RepoError::database("initialize_schema", e))?;
        }

        tracing::debug!("Database schema initialized");
        Ok(())
    }
}
