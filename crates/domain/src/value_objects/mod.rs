//! Value objects - Immutable objects defined by their attributes

mod codes;
mod contact;
mod money;
mod names;

pub use codes::{CountryCode, CurrencyCode};
pub use contact::{EmailAddress, PhoneNumber};
pub use money::{calculate_total_due, round_to_cents, Amount, DiscountPercent, TaxPercent};
pub use names::{AddressText, PersonName};
