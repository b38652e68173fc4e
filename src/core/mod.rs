//! Core SEPA direct-debit types, field validation, and the message builder.
//!
//! Entities validate themselves on construction; an invalid `Presenter`,
//! `Creditor`, `Debtor` or `Payment` cannot exist.

mod builder;
mod error;
pub mod ids;
mod options;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use options::*;
pub use types::*;
pub use validation::*;
