//! Domain entities - Core business objects with identity

mod evidence;
mod payment;
mod payment_status;

pub use evidence::{Evidence, EvidenceContentType};
pub use payment::{NewPayment, Payment, PaymentUpdate};
pub use payment_status::PaymentStatus;
