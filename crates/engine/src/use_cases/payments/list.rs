//! List payments use case.

use std::sync::Arc;

use payment_domain::{Payment, PaymentStatus};
use serde::Serialize;

use crate::infrastructure::ports::{ClockPort, PaymentQuery, PaymentRepo};

use super::error::PaymentError;

/// One page of payments plus the number matching the filter overall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentPage {
    pub total: u64,
    pub data: Vec<Payment>,
}

/// Lists payments after bringing their time-dependent statuses up to date.
pub struct ListPayments {
    payment_repo: Arc<dyn PaymentRepo>,
    clock: Arc<dyn ClockPort>,
}

impl ListPayments {
    pub fn new(payment_repo: Arc<dyn PaymentRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            payment_repo,
            clock,
        }
    }

    /// `page` is 1-based; both `page` and `limit` must be at least 1.
    pub async fn execute(
        &self,
        page: u64,
        limit: u64,
        status: Option<PaymentStatus>,
        search: Option<String>,
    ) -> Result<PaymentPage, PaymentError> {
        if page == 0 {
            return Err(PaymentError::invalid("page must be greater than 0"));
        }
        if limit == 0 {
            return Err(PaymentError::invalid("limit must be greater than 0"));
        }

        let today = self.clock.today();
        let refreshed = self.payment_repo.refresh_statuses(today).await?;
        if refreshed > 0 {
            tracing::info!(count = refreshed, %today, "Refreshed payment statuses");
        }

        let query = PaymentQuery::page(page, limit)
            .with_status(status)
            .with_search(search);
        let total = self.payment_repo.count(&query).await?;
        let mut data = self.payment_repo.list(&query).await?;
        for payment in &mut data {
            payment.recompute_total_due();
        }

        Ok(PaymentPage { total, data })
    }
}
