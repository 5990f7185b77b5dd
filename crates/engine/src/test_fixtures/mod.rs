//! Shared builders for tests.

use chrono::{NaiveDate, TimeZone, Utc};
use payment_domain::{
    AddressText, Amount, CountryCode, CurrencyCode, EmailAddress, NewPayment, Payment,
    PaymentId, PaymentStatus, PersonName, PhoneNumber,
};

/// A pending 100.00 GBP payment due on 2024-02-01.
pub fn new_payment(first: &str, last: &str, email: &str) -> NewPayment {
    NewPayment {
        payee_first_name: PersonName::new(first).unwrap(),
        payee_last_name: PersonName::new(last).unwrap(),
        payee_payment_status: PaymentStatus::Pending,
        payee_added_date_utc: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        payee_due_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        payee_address_line_1: AddressText::new("1 Main Street").unwrap(),
        payee_address_line_2: None,
        payee_city: AddressText::new("London").unwrap(),
        payee_country: CountryCode::new("GB").unwrap(),
        payee_province_or_state: None,
        payee_postal_code: AddressText::new("SW1A 1AA").unwrap(),
        payee_phone_number: PhoneNumber::new("+442079460000").unwrap(),
        payee_email: EmailAddress::new(email).unwrap(),
        currency: CurrencyCode::new("GBP").unwrap(),
        discount_percent: None,
        tax_percent: None,
        due_amount: Amount::new(100.0).unwrap(),
    }
}

pub fn payment(first: &str, last: &str, email: &str) -> Payment {
    Payment::new(PaymentId::new(), new_payment(first, last, email))
}

pub fn payment_due(due: NaiveDate) -> Payment {
    let mut p = payment("Due", "Payee", "due@example.com");
    p.payee_due_date = due;
    p
}

/// JSON body accepted by `POST /payments`.
pub fn new_payment_json() -> serde_json::Value {
    serde_json::json!({
        "payee_first_name": "Ada",
        "payee_last_name": "Lovelace",
        "payee_payment_status": "pending",
        "payee_added_date_utc": "2024-01-15T10:30:00Z",
        "payee_due_date": "2024-02-01",
        "payee_address_line_1": "12 St James's Square",
        "payee_city": "London",
        "payee_country": "GB",
        "payee_postal_code": "SW1Y 4JH",
        "payee_phone_number": "+442079460000",
        "payee_email": "ada@example.com",
        "currency": "GBP",
        "discount_percent": 10.0,
        "tax_percent": 20.0,
        "due_amount": 250.0
    })
}
