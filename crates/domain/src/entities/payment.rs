//! Payment entity - an amount owed to a payee, due on a given date

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::none_if_blank;
use crate::value_objects::{
    calculate_total_due, AddressText, Amount, CountryCode, CurrencyCode, DiscountPercent,
    EmailAddress, PersonName, PhoneNumber, TaxPercent,
};
use crate::{EvidenceId, PaymentId, PaymentStatus};

/// A payment owed to a payee.
///
/// Field names follow the wire format used by the management UI, so this
/// type is serialized as-is in API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: PaymentId,
    pub payee_first_name: PersonName,
    pub payee_last_name: PersonName,
    pub payee_payment_status: PaymentStatus,
    pub payee_added_date_utc: DateTime<Utc>,
    pub payee_due_date: NaiveDate,
    pub payee_address_line_1: AddressText,
    pub payee_address_line_2: Option<String>,
    pub payee_city: AddressText,
    pub payee_country: CountryCode,
    pub payee_province_or_state: Option<String>,
    pub payee_postal_code: AddressText,
    pub payee_phone_number: PhoneNumber,
    pub payee_email: EmailAddress,
    pub currency: CurrencyCode,
    pub discount_percent: Option<DiscountPercent>,
    pub tax_percent: Option<TaxPercent>,
    pub due_amount: Amount,
    pub total_due: f64,
    pub evidence_file_id: Option<EvidenceId>,
}

/// Everything needed to record a new payment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewPayment {
    pub payee_first_name: PersonName,
    pub payee_last_name: PersonName,
    pub payee_payment_status: PaymentStatus,
    #[serde(deserialize_with = "lenient::datetime")]
    pub payee_added_date_utc: DateTime<Utc>,
    #[serde(deserialize_with = "lenient::date")]
    pub payee_due_date: NaiveDate,
    pub payee_address_line_1: AddressText,
    #[serde(default)]
    pub payee_address_line_2: Option<String>,
    pub payee_city: AddressText,
    pub payee_country: CountryCode,
    #[serde(default)]
    pub payee_province_or_state: Option<String>,
    pub payee_postal_code: AddressText,
    pub payee_phone_number: PhoneNumber,
    pub payee_email: EmailAddress,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub discount_percent: Option<DiscountPercent>,
    #[serde(default)]
    pub tax_percent: Option<TaxPercent>,
    pub due_amount: Amount,
}

/// A partial change to a payment; `None` leaves the field untouched.
///
/// For the optional address fields an empty string clears the value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaymentUpdate {
    pub payee_first_name: Option<PersonName>,
    pub payee_last_name: Option<PersonName>,
    pub payee_payment_status: Option<PaymentStatus>,
    #[serde(deserialize_with = "lenient::option_datetime")]
    pub payee_added_date_utc: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::option_date")]
    pub payee_due_date: Option<NaiveDate>,
    pub payee_address_line_1: Option<AddressText>,
    pub payee_address_line_2: Option<String>,
    pub payee_city: Option<AddressText>,
    pub payee_country: Option<CountryCode>,
    pub payee_province_or_state: Option<String>,
    pub payee_postal_code: Option<AddressText>,
    pub payee_phone_number: Option<PhoneNumber>,
    pub payee_email: Option<EmailAddress>,
    pub currency: Option<CurrencyCode>,
    pub discount_percent: Option<DiscountPercent>,
    pub tax_percent: Option<TaxPercent>,
    pub due_amount: Option<Amount>,
    pub evidence_file_id: Option<EvidenceId>,
}

impl PaymentUpdate {
    /// True when this update moves the payment to `completed`.
    pub fn completes(&self) -> bool {
        self.payee_payment_status
            .is_some_and(|status| status.is_completed())
    }
}

impl Payment {
    pub fn new(id: PaymentId, new: NewPayment) -> Self {
        let mut payment = Self {
            id,
            payee_first_name: new.payee_first_name,
            payee_last_name: new.payee_last_name,
            payee_payment_status: new.payee_payment_status,
            payee_added_date_utc: new.payee_added_date_utc,
            payee_due_date: new.payee_due_date,
            payee_address_line_1: new.payee_address_line_1,
            payee_address_line_2: new.payee_address_line_2.as_deref().and_then(optional_text),
            payee_city: new.payee_city,
            payee_country: new.payee_country,
            payee_province_or_state: new
                .payee_province_or_state
                .as_deref()
                .and_then(optional_text),
            payee_postal_code: new.payee_postal_code,
            payee_phone_number: new.payee_phone_number,
            payee_email: new.payee_email,
            currency: new.currency,
            discount_percent: new.discount_percent,
            tax_percent: new.tax_percent,
            due_amount: new.due_amount,
            total_due: 0.0,
            evidence_file_id: None,
        };
        payment.recompute_total_due();
        payment
    }

    /// Amount owed after discount and tax, rounded to cents.
    pub fn compute_total_due(&self) -> f64 {
        calculate_total_due(
            self.due_amount.value(),
            self.discount_percent.map(DiscountPercent::value),
            self.tax_percent.map(TaxPercent::value),
        )
    }

    pub fn recompute_total_due(&mut self) {
        self.total_due = self.compute_total_due();
    }

    pub fn apply_update(&mut self, update: PaymentUpdate) {
        if let Some(v) = update.payee_first_name {
            self.payee_first_name = v;
        }
        if let Some(v) = update.payee_last_name {
            self.payee_last_name = v;
        }
        if let Some(v) = update.payee_payment_status {
            self.payee_payment_status = v;
        }
        if let Some(v) = update.payee_added_date_utc {
            self.payee_added_date_utc = v;
        }
        if let Some(v) = update.payee_due_date {
            self.payee_due_date = v;
        }
        if let Some(v) = update.payee_address_line_1 {
            self.payee_address_line_1 = v;
        }
        if let Some(v) = update.payee_address_line_2 {
            self.payee_address_line_2 = optional_text(&v);
        }
        if let Some(v) = update.payee_city {
            self.payee_city = v;
        }
        if let Some(v) = update.payee_country {
            self.payee_country = v;
        }
        if let Some(v) = update.payee_province_or_state {
            self.payee_province_or_state = optional_text(&v);
        }
        if let Some(v) = update.payee_postal_code {
            self.payee_postal_code = v;
        }
        if let Some(v) = update.payee_phone_number {
            self.payee_phone_number = v;
        }
        if let Some(v) = update.payee_email {
            self.payee_email = v;
        }
        if let Some(v) = update.currency {
            self.currency = v;
        }
        if let Some(v) = update.discount_percent {
            self.discount_percent = Some(v);
        }
        if let Some(v) = update.tax_percent {
            self.tax_percent = Some(v);
        }
        if let Some(v) = update.due_amount {
            self.due_amount = v;
        }
        if let Some(v) = update.evidence_file_id {
            self.evidence_file_id = Some(v);
        }
        self.recompute_total_due();
    }

    pub fn attach_evidence(&mut self, evidence_id: EvidenceId) {
        self.evidence_file_id = Some(evidence_id);
    }
}

fn optional_text(value: &str) -> Option<String> {
    none_if_blank(value).map(str::to_string)
}

/// Deserializers accepting either a full timestamp or a bare date.
mod lenient {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    use crate::common::{parse_lenient_date, parse_lenient_datetime};

    pub fn datetime<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_lenient_datetime(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid datetime '{}'", raw)))
    }

    pub fn date<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse_lenient_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date '{}'", raw)))
    }

    pub fn option_datetime<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(raw) => parse_lenient_datetime(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid datetime '{}'", raw))),
        }
    }

    pub fn option_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(raw) => parse_lenient_date(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date '{}'", raw))),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn new_payment_json() -> serde_json::Value {
        json!({
            "payee_first_name": "Ada",
            "payee_last_name": "Lovelace",
            "payee_payment_status": "pending",
            "payee_added_date_utc": "2024-01-15T10:30:00Z",
            "payee_due_date": "2024-02-01T00:00:00Z",
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

    fn sample_payment() -> Payment {
        let new: NewPayment = serde_json::from_value(new_payment_json()).unwrap();
        Payment::new(PaymentId::new(), new)
    }

    #[test]
    fn new_payment_computes_total_due() {
        let payment = sample_payment();
        // 250 * 0.9 * 1.2
        assert_eq!(payment.total_due, 270.0);
        assert_eq!(
            payment.payee_due_date,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
        assert!(payment.evidence_file_id.is_none());
    }

    #[test]
    fn new_payment_rejects_bad_phone() {
        let mut body = new_payment_json();
        body["payee_phone_number"] = json!("020 7946 0000");
        let err = serde_json::from_value::<NewPayment>(body).unwrap_err();
        assert!(err.to_string().contains("E.164"));
    }

    #[test]
    fn new_payment_rejects_unknown_status() {
        let mut body = new_payment_json();
        body["payee_payment_status"] = json!("paid");
        assert!(serde_json::from_value::<NewPayment>(body).is_err());
    }

    #[test]
    fn new_payment_requires_due_amount() {
        let mut body = new_payment_json();
        body.as_object_mut().unwrap().remove("due_amount");
        assert!(serde_json::from_value::<NewPayment>(body).is_err());
    }

    #[test]
    fn blank_optional_address_lines_are_dropped() {
        let mut body = new_payment_json();
        body["payee_address_line_2"] = json!("  ");
        let new: NewPayment = serde_json::from_value(body).unwrap();
        let payment = Payment::new(PaymentId::new(), new);
        assert_eq!(payment.payee_address_line_2, None);
    }

    #[test]
    fn serializes_id_as_underscore_id() {
        let payment = sample_payment();
        let value = serde_json::to_value(&payment).unwrap();
        assert_eq!(value["_id"], json!(payment.id.to_string()));
        assert_eq!(value["payee_due_date"], json!("2024-02-01"));
        assert_eq!(value["payee_payment_status"], json!("pending"));
    }

    #[test]
    fn update_only_touches_supplied_fields() {
        let mut payment = sample_payment();
        let update: PaymentUpdate = serde_json::from_value(json!({
            "payee_city": "Cambridge",
            "due_amount": 100.0
        }))
        .unwrap();

        payment.apply_update(update);

        assert_eq!(payment.payee_city.as_str(), "Cambridge");
        assert_eq!(payment.payee_first_name.as_str(), "Ada");
        assert_eq!(payment.total_due, 108.0);
    }

    #[test]
    fn update_with_empty_string_clears_optional_line() {
        let mut payment = sample_payment();
        payment.payee_province_or_state = Some("Greater London".to_string());
        payment.apply_update(PaymentUpdate {
            payee_province_or_state: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(payment.payee_province_or_state, None);
    }

    #[test]
    fn update_completes_detection() {
        let update: PaymentUpdate =
            serde_json::from_value(json!({ "payee_payment_status": "completed" })).unwrap();
        assert!(update.completes());
        assert!(!PaymentUpdate::default().completes());
    }

    #[test]
    fn update_accepts_bare_due_date() {
        let update: PaymentUpdate =
            serde_json::from_value(json!({ "payee_due_date": "2024-03-31" })).unwrap();
        assert_eq!(
            update.payee_due_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
        );
    }
}
