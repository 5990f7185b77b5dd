//! Helper types for port operations.

use payment_domain::PaymentStatus;

/// Filter and page selection for payment listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentQuery {
    /// Exact status match.
    pub status: Option<PaymentStatus>,
    /// Case-insensitive substring over first name, last name and e-mail.
    pub search: Option<String>,
    pub offset: u64,
    pub limit: u64,
}

impl PaymentQuery {
    /// Builds a query for 1-based `page` of size `limit`.
    pub fn page(page: u64, limit: u64) -> Self {
        Self {
            offset: page.saturating_sub(1).saturating_mul(limit),
            limit,
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: Option<PaymentStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        let q = PaymentQuery::page(1, 10);
        assert_eq!(q.offset, 0);
        assert_eq!(q.limit, 10);
    }

    #[test]
    fn later_pages_skip_previous_rows() {
        assert_eq!(PaymentQuery::page(3, 25).offset, 50);
    }

    #[test]
    fn page_arithmetic_saturates() {
        assert_eq!(PaymentQuery::page(u64::MAX, u64::MAX).offset, u64::MAX);
    }
}
