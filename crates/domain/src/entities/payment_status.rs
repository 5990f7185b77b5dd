//! Payment lifecycle status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Where a payment stands relative to its due date.
///
/// `DueNow` and `Overdue` are derived from the due date whenever the
/// payment list is read; `Completed` is terminal and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Completed,
    DueNow,
    Overdue,
    Pending,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Completed,
        PaymentStatus::DueNow,
        PaymentStatus::Overdue,
        PaymentStatus::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::DueNow => "due_now",
            Self::Overdue => "overdue",
            Self::Pending => "pending",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// The status this payment should have on `today`.
    pub fn refreshed(self, due_date: NaiveDate, today: NaiveDate) -> Self {
        if self.is_completed() {
            return self;
        }
        if due_date == today {
            Self::DueNow
        } else if due_date < today {
            Self::Overdue
        } else {
            self
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "completed" => Ok(Self::Completed),
            "due_now" => Ok(Self::DueNow),
            "overdue" => Ok(Self::Overdue),
            "pending" => Ok(Self::Pending),
            other => Err(DomainError::parse(format!(
                "Unknown payment status '{}', expected one of completed, due_now, overdue, pending",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn round_trips_through_wire_names() {
        for status in PaymentStatus::ALL {
            assert_eq!(status.as_str().parse::<PaymentStatus>().unwrap(), status);
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn rejects_unknown_status() {
        assert!("paid".parse::<PaymentStatus>().is_err());
        assert!("Completed".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn due_today_becomes_due_now() {
        let today = date(2024, 5, 10);
        assert_eq!(
            PaymentStatus::Pending.refreshed(today, today),
            PaymentStatus::DueNow
        );
    }

    #[test]
    fn past_due_becomes_overdue() {
        let today = date(2024, 5, 10);
        assert_eq!(
            PaymentStatus::DueNow.refreshed(date(2024, 5, 9), today),
            PaymentStatus::Overdue
        );
    }

    #[test]
    fn future_due_is_unchanged() {
        let today = date(2024, 5, 10);
        assert_eq!(
            PaymentStatus::Pending.refreshed(date(2024, 6, 1), today),
            PaymentStatus::Pending
        );
    }

    #[test]
    fn completed_is_never_recomputed() {
        let today = date(2024, 5, 10);
        assert_eq!(
            PaymentStatus::Completed.refreshed(date(2020, 1, 1), today),
            PaymentStatus::Completed
        );
    }
}
