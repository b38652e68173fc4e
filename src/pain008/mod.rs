//! ISO 20022 `pain.008.001.02` generation.
//!
//! Renders a validated [`DirectDebit`](crate::core::DirectDebit) as a
//! Customer Direct Debit Initiation document. The element order and value
//! formats are fixed; the writer does no validation of its own.
//!
//! # Example
//!
//! ```no_run
//! use adeudo::core::*;
//! use adeudo::pain008;
//!
//! let message: DirectDebit = todo!(); // build via DirectDebitBuilder
//! let xml = pain008::to_pain008_xml(&message).unwrap();
//! ```

mod document;
pub(crate) mod xml_utils;

pub use document::to_pain008_xml;
pub use xml_utils::{format_amount, format_date, format_date_time};

/// Target namespace of the `pain.008.001.02` schema.
pub const PAIN008_NAMESPACE: &str = "urn:iso:std:iso:20022:tech:xsd:pain.008.001.02";

/// XML Schema instance namespace.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// `xsi:schemaLocation` value: namespace followed by the XSD file name.
pub const PAIN008_SCHEMA_LOCATION: &str =
    "urn:iso:std:iso:20022:tech:xsd:pain.008.001.02 pain.008.001.02.xsd";

/// Fixed codes written into every message.
pub mod codes {
    /// `PmtMtd`: direct debit.
    pub const PAYMENT_METHOD: &str = "DD";
    /// `SvcLvl/Cd`.
    pub const SERVICE_LEVEL: &str = "SEPA";
    /// `LclInstrm/Cd`: core scheme.
    pub const LOCAL_INSTRUMENT: &str = "CORE";
    /// `PmtTpInf/SeqTp` of the single payment-information block.
    pub const SEQUENCE_TYPE: &str = "RCUR";
    /// `InstdAmt/@Ccy`.
    pub const CURRENCY: &str = "EUR";
    /// `DbtrAgt/FinInstnId/Othr/Id` when the debtor agent is not given.
    pub const NOT_PROVIDED: &str = "NOTPROVIDED";
}
