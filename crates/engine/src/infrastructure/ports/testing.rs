//! Testability port for injecting time.

use chrono::{DateTime, NaiveDate, Utc};

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date used for due-date comparisons (UTC).
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
