//! Payment repository backed by SQLite.

use async_trait::async_trait;
use chrono::{NaiveDate, SecondsFormat};
use payment_domain::common::parse_datetime;
use payment_domain::{
    AddressText, Amount, CountryCode, CurrencyCode, DiscountPercent, EmailAddress, EvidenceId,
    Payment, PaymentId, PaymentStatus, PersonName, PhoneNumber, TaxPercent,
};
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool};

use super::connection::Database;
use crate::infrastructure::ports::{PaymentQuery, PaymentRepo, RepoError};

const TABLE: &str = "payments";

const COLUMNS: &str = "id, payee_first_name, payee_last_name, payee_payment_status, \
    payee_added_date_utc, payee_due_date, payee_address_line_1, payee_address_line_2, \
    payee_city, payee_country, payee_province_or_state, payee_postal_code, \
    payee_phone_number, payee_email, currency, discount_percent, tax_percent, \
    due_amount, total_due, evidence_file_id";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Keeps a search term from matching across two fields.
const SEARCH_FIELD_SEPARATOR: char = '\u{1f}';

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

pub struct SqlitePaymentRepo {
    pool: SqlitePool,
}

impl SqlitePaymentRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

fn insert_query(payment: &Payment) -> SqliteQuery<'_> {
    let sql = "INSERT INTO payments (id, payee_first_name, payee_last_name, payee_payment_status, \
        payee_added_date_utc, payee_due_date, payee_address_line_1, payee_address_line_2, \
        payee_city, payee_country, payee_province_or_state, payee_postal_code, \
        payee_phone_number, payee_email, currency, discount_percent, tax_percent, \
        due_amount, total_due, evidence_file_id, search_text) \
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
    sqlx::query(sql)
        .bind(payment.id.to_string())
        .bind(payment.payee_first_name.as_str())
        .bind(payment.payee_last_name.as_str())
        .bind(payment.payee_payment_status.as_str())
        .bind(format_timestamp(payment))
        .bind(payment.payee_due_date.format(DATE_FORMAT).to_string())
        .bind(payment.payee_address_line_1.as_str())
        .bind(payment.payee_address_line_2.as_deref())
        .bind(payment.payee_city.as_str())
        .bind(payment.payee_country.as_str())
        .bind(payment.payee_province_or_state.as_deref())
        .bind(payment.payee_postal_code.as_str())
        .bind(payment.payee_phone_number.as_str())
        .bind(payment.payee_email.as_str())
        .bind(payment.currency.as_str())
        .bind(payment.discount_percent.map(DiscountPercent::value))
        .bind(payment.tax_percent.map(TaxPercent::value))
        .bind(payment.due_amount.value())
        .bind(payment.total_due)
        .bind(payment.evidence_file_id.map(|id| id.to_string()))
        .bind(search_text(payment))
}

/// Lower-cased names and email for searching. SQLite only folds ASCII case,
/// so folding happens here with full Unicode rules.
fn search_text(payment: &Payment) -> String {
    format!(
        "{}{SEARCH_FIELD_SEPARATOR}{}{SEARCH_FIELD_SEPARATOR}{}",
        payment.payee_first_name.as_str(),
        payment.payee_last_name.as_str(),
        payment.payee_email.as_str()
    )
    .to_lowercase()
}

/// Fixed-width UTC timestamps so text order matches time order.
fn format_timestamp(payment: &Payment) -> String {
    payment
        .payee_added_date_utc
        .to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// WHERE clause and its bind values, in order.
fn filter_clause(query: &PaymentQuery) -> (String, Vec<String>) {
    let mut clauses = Vec::new();
    let mut binds = Vec::new();

    if let Some(status) = query.status {
        clauses.push("payee_payment_status = ?".to_string());
        binds.push(status.as_str().to_string());
    }

    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        clauses.push("search_text LIKE ? ESCAPE '\\'".to_string());
        binds.push(format!("%{}%", escape_like(&search.to_lowercase())));
    }

    if clauses.is_empty() {
        (String::new(), binds)
    } else {
        (format!(" WHERE {}", clauses.join(" AND ")), binds)
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, RepoError>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepoError::corrupt(TABLE, format!("{}: {}", name, e)))
}

fn corrupt(field: &str) -> impl Fn(payment_domain::DomainError) -> RepoError + '_ {
    move |e| RepoError::corrupt(TABLE, format!("{}: {}", field, e))
}

fn row_to_payment(row: &SqliteRow) -> Result<Payment, RepoError> {
    let id: String = column(row, "id")?;
    let status: String = column(row, "payee_payment_status")?;
    let added: String = column(row, "payee_added_date_utc")?;
    let due: String = column(row, "payee_due_date")?;
    let evidence: Option<String> = column(row, "evidence_file_id")?;

    Ok(Payment {
        id: id.parse::<PaymentId>().map_err(corrupt("id"))?,
        payee_first_name: PersonName::new(column::<String>(row, "payee_first_name")?)
            .map_err(corrupt("payee_first_name"))?,
        payee_last_name: PersonName::new(column::<String>(row, "payee_last_name")?)
            .map_err(corrupt("payee_last_name"))?,
        payee_payment_status: status
            .parse::<PaymentStatus>()
            .map_err(corrupt("payee_payment_status"))?,
        payee_added_date_utc: parse_datetime(&added)
            .map_err(|e| RepoError::corrupt(TABLE, format!("payee_added_date_utc: {}", e)))?,
        payee_due_date: NaiveDate::parse_from_str(&due, DATE_FORMAT)
            .map_err(|e| RepoError::corrupt(TABLE, format!("payee_due_date: {}", e)))?,
        payee_address_line_1: AddressText::new(column::<String>(row, "payee_address_line_1")?)
            .map_err(corrupt("payee_address_line_1"))?,
        payee_address_line_2: column(row, "payee_address_line_2")?,
        payee_city: AddressText::new(column::<String>(row, "payee_city")?)
            .map_err(corrupt("payee_city"))?,
        payee_country: CountryCode::new(column::<String>(row, "payee_country")?)
            .map_err(corrupt("payee_country"))?,
        payee_province_or_state: column(row, "payee_province_or_state")?,
        payee_postal_code: AddressText::new(column::<String>(row, "payee_postal_code")?)
            .map_err(corrupt("payee_postal_code"))?,
        payee_phone_number: PhoneNumber::new(column::<String>(row, "payee_phone_number")?)
            .map_err(corrupt("payee_phone_number"))?,
        payee_email: EmailAddress::new(column::<String>(row, "payee_email")?)
            .map_err(corrupt("payee_email"))?,
        currency: CurrencyCode::new(column::<String>(row, "currency")?)
            .map_err(corrupt("currency"))?,
        discount_percent: column::<Option<f64>>(row, "discount_percent")?
            .map(DiscountPercent::new)
            .transpose()
            .map_err(corrupt("discount_percent"))?,
        tax_percent: column::<Option<f64>>(row, "tax_percent")?
            .map(TaxPercent::new)
            .transpose()
            .map_err(corrupt("tax_percent"))?,
        due_amount: Amount::new(column::<f64>(row, "due_amount")?)
            .map_err(corrupt("due_amount"))?,
        total_due: column(row, "total_due")?,
        evidence_file_id: evidence
            .map(|raw| raw.parse::<EvidenceId>())
            .transpose()
            .map_err(corrupt("evidence_file_id"))?,
    })
}

#[async_trait]
impl PaymentRepo for SqlitePaymentRepo {
    async fn insert(&self, payment: &Payment) -> Result<(), RepoError> {
        insert_query(payment)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("payments.insert", e))?;
        Ok(())
    }

    async fn insert_many(&self, payments: &[Payment]) -> Result<u64, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("payments.insert_many", e))?;

        let mut inserted = 0;
        for payment in payments {
            let result = insert_query(payment)
                .execute(&mut *tx)
                .await
                .map_err(|e| RepoError::database("payments.insert_many", e))?;
            inserted += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("payments.insert_many", e))?;
        Ok(inserted)
    }

    async fn get(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let sql = format!("SELECT {} FROM payments WHERE id = ?", COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("payments.get", e))?;

        row.as_ref().map(row_to_payment).transpose()
    }

    async fn save(&self, payment: &Payment) -> Result<(), RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE payments SET
                payee_first_name = ?, payee_last_name = ?, payee_payment_status = ?,
                payee_added_date_utc = ?, payee_due_date = ?, payee_address_line_1 = ?,
                payee_address_line_2 = ?, payee_city = ?, payee_country = ?,
                payee_province_or_state = ?, payee_postal_code = ?, payee_phone_number = ?,
                payee_email = ?, currency = ?, discount_percent = ?, tax_percent = ?,
                due_amount = ?, total_due = ?, evidence_file_id = ?, search_text = ?
            WHERE id = ?
            "#,
        )
        .bind(payment.payee_first_name.as_str())
        .bind(payment.payee_last_name.as_str())
        .bind(payment.payee_payment_status.as_str())
        .bind(format_timestamp(payment))
        .bind(payment.payee_due_date.format(DATE_FORMAT).to_string())
        .bind(payment.payee_address_line_1.as_str())
        .bind(payment.payee_address_line_2.as_deref())
        .bind(payment.payee_city.as_str())
        .bind(payment.payee_country.as_str())
        .bind(payment.payee_province_or_state.as_deref())
        .bind(payment.payee_postal_code.as_str())
        .bind(payment.payee_phone_number.as_str())
        .bind(payment.payee_email.as_str())
        .bind(payment.currency.as_str())
        .bind(payment.discount_percent.map(DiscountPercent::value))
        .bind(payment.tax_percent.map(TaxPercent::value))
        .bind(payment.due_amount.value())
        .bind(payment.total_due)
        .bind(payment.evidence_file_id.map(|id| id.to_string()))
        .bind(search_text(payment))
        .bind(payment.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("payments.save", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Payment", payment.id));
        }
        Ok(())
    }

    async fn delete(&self, id: PaymentId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("payments.delete", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>, RepoError> {
        let (filter, binds) = filter_clause(query);
        let sql = format!(
            "SELECT {} FROM payments{} ORDER BY payee_added_date_utc, id LIMIT ? OFFSET ?",
            COLUMNS, filter
        );

        let mut q = sqlx::query(&sql);
        for value in binds {
            q = q.bind(value);
        }
        let rows = q
            .bind(to_i64(query.limit))
            .bind(to_i64(query.offset))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("payments.list", e))?;

        rows.iter().map(row_to_payment).collect()
    }

    async fn count(&self, query: &PaymentQuery) -> Result<u64, RepoError> {
        let (filter, binds) = filter_clause(query);
        let sql = format!("SELECT COUNT(*) AS total FROM payments{}", filter);

        let mut q = sqlx::query(&sql);
        for value in binds {
            q = q.bind(value);
        }
        let row = q
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("payments.count", e))?;

        let total: i64 = column(&row, "total")?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn refresh_statuses(&self, today: NaiveDate) -> Result<u64, RepoError> {
        let today = today.format(DATE_FORMAT).to_string();

        let due_now = sqlx::query(
            "UPDATE payments SET payee_payment_status = 'due_now' \
             WHERE payee_due_date = ? AND payee_payment_status NOT IN ('completed', 'due_now')",
        )
        .bind(&today)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("payments.refresh_statuses", e))?;

        let overdue = sqlx::query(
            "UPDATE payments SET payee_payment_status = 'overdue' \
             WHERE payee_due_date < ? AND payee_payment_status NOT IN ('completed', 'overdue')",
        )
        .bind(&today)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("payments.refresh_statuses", e))?;

        Ok(due_now.rows_affected() + overdue.rows_affected())
    }

    async fn set_evidence(
        &self,
        id: PaymentId,
        evidence_id: EvidenceId,
    ) -> Result<(), RepoError> {
        let result = sqlx::query("UPDATE payments SET evidence_file_id = ? WHERE id = ?")
            .bind(evidence_id.to_string())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("payments.set_evidence", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Payment", id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("ping", e))?;
        Ok(())
    }
}
