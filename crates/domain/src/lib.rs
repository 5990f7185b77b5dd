pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

// Re-export all entities
pub use entities::{
    Evidence, EvidenceContentType, NewPayment, Payment, PaymentStatus, PaymentUpdate,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{EvidenceId, PaymentId};

// Re-export value objects
pub use value_objects::{
    calculate_total_due, AddressText, Amount, CountryCode, CurrencyCode, DiscountPercent,
    EmailAddress, PersonName, PhoneNumber, TaxPercent,
};
