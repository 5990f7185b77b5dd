//! CSV row normalization.
//!
//! Spreadsheet exports are looser than the JSON API: dates come in several
//! shapes, percentages may be blank and the status column may be empty.
//! Everything is coerced into a [`NewPayment`] here so the stored rows obey
//! the same rules as payments created through the API.

use payment_domain::common::{parse_lenient_date, parse_lenient_datetime, some_if_not_blank};
use payment_domain::{
    AddressText, Amount, CountryCode, CurrencyCode, DiscountPercent, DomainError, EmailAddress,
    NewPayment, PaymentStatus, PersonName, PhoneNumber, TaxPercent,
};
use serde::Deserialize;

use super::ImportError;

/// One CSV record, keyed by header name.
#[derive(Debug, Deserialize)]
struct CsvRow {
    payee_first_name: String,
    payee_last_name: String,
    #[serde(default)]
    payee_payment_status: Option<String>,
    payee_added_date_utc: String,
    payee_due_date: String,
    payee_address_line_1: String,
    #[serde(default)]
    payee_address_line_2: Option<String>,
    payee_city: String,
    payee_country: String,
    #[serde(default)]
    payee_province_or_state: Option<String>,
    payee_postal_code: String,
    payee_phone_number: String,
    payee_email: String,
    currency: String,
    #[serde(default)]
    discount_percent: Option<String>,
    #[serde(default)]
    tax_percent: Option<String>,
    due_amount: String,
}

/// Parses CSV bytes into validated payments, failing on the first bad row.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<NewPayment>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut payments = Vec::new();
    for (index, record) in reader.deserialize::<CsvRow>().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| ImportError::malformed(row, e))?;
        payments.push(normalize(row, record)?);
    }
    Ok(payments)
}

fn normalize(row: usize, r: CsvRow) -> Result<NewPayment, ImportError> {
    let field = |column: &'static str| {
        move |e: DomainError| ImportError::invalid_field(row, column, e.detail())
    };

    let payee_payment_status = match some_if_not_blank(r.payee_payment_status) {
        Some(raw) => raw
            .parse::<PaymentStatus>()
            .map_err(field("payee_payment_status"))?,
        None => PaymentStatus::Pending,
    };

    let payee_added_date_utc = parse_lenient_datetime(&r.payee_added_date_utc).ok_or_else(|| {
        ImportError::invalid_field(
            row,
            "payee_added_date_utc",
            format!("'{}' is not a date or timestamp", r.payee_added_date_utc),
        )
    })?;
    let payee_due_date = parse_lenient_date(&r.payee_due_date).ok_or_else(|| {
        ImportError::invalid_field(
            row,
            "payee_due_date",
            format!("'{}' is not a date", r.payee_due_date),
        )
    })?;

    let due_amount = r.due_amount.parse::<f64>().map_err(|_| {
        ImportError::invalid_field(
            row,
            "due_amount",
            format!("'{}' is not a number", r.due_amount),
        )
    })?;

    Ok(NewPayment {
        payee_first_name: PersonName::new(r.payee_first_name).map_err(field("payee_first_name"))?,
        payee_last_name: PersonName::new(r.payee_last_name).map_err(field("payee_last_name"))?,
        payee_payment_status,
        payee_added_date_utc,
        payee_due_date,
        payee_address_line_1: AddressText::new(r.payee_address_line_1)
            .map_err(field("payee_address_line_1"))?,
        payee_address_line_2: some_if_not_blank(r.payee_address_line_2),
        payee_city: AddressText::new(r.payee_city).map_err(field("payee_city"))?,
        payee_country: CountryCode::new(r.payee_country).map_err(field("payee_country"))?,
        payee_province_or_state: some_if_not_blank(r.payee_province_or_state),
        payee_postal_code: AddressText::new(r.payee_postal_code)
            .map_err(field("payee_postal_code"))?,
        payee_phone_number: PhoneNumber::new(r.payee_phone_number)
            .map_err(field("payee_phone_number"))?,
        payee_email: EmailAddress::new(r.payee_email).map_err(field("payee_email"))?,
        currency: CurrencyCode::new(r.currency).map_err(field("currency"))?,
        discount_percent: Some(
            DiscountPercent::new(percent_or_zero(r.discount_percent))
                .map_err(field("discount_percent"))?,
        ),
        tax_percent: Some(
            TaxPercent::new(percent_or_zero(r.tax_percent)).map_err(field("tax_percent"))?,
        ),
        due_amount: Amount::new(due_amount).map_err(field("due_amount"))?,
    })
}

/// Blank or non-numeric percentages count as zero.
fn percent_or_zero(raw: Option<String>) -> f64 {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
