//! Data models for camp registrations.
//!
//! - `MemberRecord`: one registrant as exchanged with the member store
//! - `Numeric`: tagged value for the numeric fields carried as text
//! - `Gender`, `PaymentMethod`: the closed choice lists of the form

pub mod member;
pub mod numeric;

pub use member::{Gender, MemberId, MemberRecord, PaymentMethod};
pub use numeric::{format_number, Numeric};
