//! # adeudo
//!
//! SEPA Direct Debit for Spanish banks: field-level validation of the
//! parties and collections, and generation of ISO 20022 `pain.008.001.02`
//! customer direct-debit initiation messages.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use adeudo::core::*;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let debtor = Arc::new(
//!     Debtor::new("Cliente Ejemplo", "ES7620770024003102575766", "BSCHESMMXXX").unwrap(),
//! );
//!
//! let xml = DirectDebitBuilder::new()
//!     .presenter(Presenter::new("ES00-COMPANY123-12345678X", "Mi Empresa S.L.", "0182").unwrap())
//!     .creditor(
//!         Creditor::new(
//!             "ES00-COMPANY123-12345678X",
//!             NaiveDate::from_ymd_opt(2030, 1, 10).unwrap(),
//!             "Mi Empresa S.L.",
//!             "ES9121000418450200051332",
//!             "BBVAESMMXXX",
//!             "ES50000B01958115",
//!         )
//!         .unwrap(),
//!     )
//!     .add_payment(
//!         Payment::new(
//!             debtor,
//!             "MANDATE-123456",
//!             NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
//!             SequenceType::Recurring,
//!             "INV-2023-001",
//!             dec!(150.50),
//!             "Factura enero 2023",
//!         )
//!         .unwrap(),
//!     )
//!     .generate_xml()
//!     .unwrap();
//!
//! assert!(xml.contains("<NbOfTxs>1</NbOfTxs>"));
//! assert!(xml.contains("<CtrlSum>150.50</CtrlSum>"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Entities, field validation, message builder |
//! | `pain008` (default) | `pain.008.001.02` XML generation |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "pain008")]
pub mod pain008;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
