//! Payment use cases.
//!
//! CRUD over the payment ledger plus the status-refreshing listing.

mod create;
mod delete;
mod error;
mod list;
mod update;

use std::sync::Arc;

pub use create::CreatePayment;
pub use delete::DeletePayment;
pub use error::PaymentError;
pub use list::{ListPayments, PaymentPage};
pub use update::UpdatePayment;

/// Container for payment use cases.
pub struct PaymentUseCases {
    pub list: Arc<ListPayments>,
    pub create: Arc<CreatePayment>,
    pub update: Arc<UpdatePayment>,
    pub delete: Arc<DeletePayment>,
}

impl PaymentUseCases {
    pub fn new(
        list: Arc<ListPayments>,
        create: Arc<CreatePayment>,
        update: Arc<UpdatePayment>,
        delete: Arc<DeletePayment>,
    ) -> Self {
        Self {
            list,
            create,
            update,
            delete,
        }
    }
}
