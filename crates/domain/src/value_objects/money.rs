//! Monetary amounts, percentages and the total-due calculation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A non-negative, finite amount in the payment's currency.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::validation("Due amount must be a finite number"));
        }
        if value < 0.0 {
            return Err(DomainError::validation("Due amount must not be negative"));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> f64 {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Discount rate in percent, `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DiscountPercent(f64);

impl DiscountPercent {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(DomainError::validation(
                "Discount percent must be between 0 and 100",
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for DiscountPercent {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiscountPercent> for f64 {
    fn from(percent: DiscountPercent) -> f64 {
        percent.0
    }
}

/// Tax rate in percent, `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TaxPercent(f64);

impl TaxPercent {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::validation("Tax percent must not be negative"));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for TaxPercent {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaxPercent> for f64 {
    fn from(percent: TaxPercent) -> f64 {
        percent.0
    }
}

/// Rounds to two decimal places; exact ties go to the even cent.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Amount owed after applying the discount first and the tax second.
///
/// Missing percentages count as zero.
///
/// ```
/// use payment_domain::value_objects::calculate_total_due;
///
/// assert_eq!(calculate_total_due(200.0, Some(10.0), Some(5.0)), 189.0);
/// assert_eq!(calculate_total_due(99.99, None, None), 99.99);
/// ```
pub fn calculate_total_due(
    due_amount: f64,
    discount_percent: Option<f64>,
    tax_percent: Option<f64>,
) -> f64 {
    let after_discount = due_amount * (1.0 - discount_percent.unwrap_or(0.0) / 100.0);
    let total = after_discount * (1.0 + tax_percent.unwrap_or(0.0) / 100.0);
    round_to_cents(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_rejects_negative_and_nan() {
        assert!(Amount::new(0.0).is_ok());
        assert!(Amount::new(-0.01).is_err());
        assert!(Amount::new(f64::NAN).is_err());
        assert!(Amount::new(f64::INFINITY).is_err());
    }

    #[test]
    fn discount_bounds_are_inclusive() {
        assert!(DiscountPercent::new(0.0).is_ok());
        assert!(DiscountPercent::new(100.0).is_ok());
        assert!(DiscountPercent::new(100.5).is_err());
        assert!(DiscountPercent::new(-1.0).is_err());
    }

    #[test]
    fn tax_has_no_upper_bound() {
        assert!(TaxPercent::new(250.0).is_ok());
        assert!(TaxPercent::new(-0.5).is_err());
    }

    #[test]
    fn total_due_applies_discount_then_tax() {
        // 1000 * 0.85 = 850, * 1.13 = 960.5
        assert_eq!(calculate_total_due(1000.0, Some(15.0), Some(13.0)), 960.5);
    }

    #[test]
    fn total_due_rounds_to_cents() {
        // 10 * (1 - 1/3 %) = 9.9666..
        assert_eq!(calculate_total_due(10.0, Some(1.0 / 3.0), None), 9.97);
    }

    #[test]
    fn exact_half_cents_round_to_even() {
        assert_eq!(calculate_total_due(10.125, None, None), 10.12);
        assert_eq!(calculate_total_due(10.375, None, None), 10.38);
        assert_eq!(round_to_cents(0.625), 0.62);
        assert_eq!(round_to_cents(0.875), 0.88);
    }

    #[test]
    fn full_discount_is_free() {
        assert_eq!(calculate_total_due(500.0, Some(100.0), Some(20.0)), 0.0);
    }

    #[test]
    fn deserialization_validates_range() {
        let bad: Result<DiscountPercent, _> = serde_json::from_str("120.0");
        assert!(bad.is_err());
        let ok: TaxPercent = serde_json::from_str("7.5").unwrap();
        assert_eq!(ok.value(), 7.5);
    }
}
