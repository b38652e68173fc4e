use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use super::error::SepaError;
use super::ids;
use super::types::*;
use super::validation::MAX_IDENTIFIER_LEN;

/// Largest tolerated gap between the running control sum and a fresh sum.
pub const CONTROL_SUM_TOLERANCE: Decimal = dec!(0.001);

/// Builder for a direct-debit message.
///
/// The message id and creation timestamp are fixed when the builder is
/// created. Payments are only ever appended; the transaction count and the
/// control sum are kept up to date on every [`add_payment`](Self::add_payment).
///
/// ```
/// use std::sync::Arc;
/// use adeudo::core::*;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let debtor = Arc::new(Debtor::new("Cliente Ejemplo", "ES7620770024003102575766", "BSCHESMMXXX").unwrap());
/// let message = DirectDebitBuilder::new()
///     .presenter(Presenter::new("ES00-COMPANY123-12345678X", "Mi Empresa S.L.", "0182").unwrap())
///     .creditor(Creditor::new(
///         "ES00-COMPANY123-12345678X",
///         NaiveDate::from_ymd_opt(2030, 1, 10).unwrap(),
///         "Mi Empresa S.L.",
///         "ES9121000418450200051332",
///         "BBVAESMMXXX",
///         "ES50000B01958115",
///     ).unwrap())
///     .add_payment(Payment::new(
///         debtor,
///         "MANDATE-123456",
///         NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
///         SequenceType::Recurring,
///         "INV-2023-001",
///         dec!(150.50),
///         "Factura enero 2023",
///     ).unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(message.number_of_transactions(), 1);
/// assert_eq!(message.control_sum(), dec!(150.50));
/// ```
#[derive(Debug, Clone)]
pub struct DirectDebitBuilder {
    message_id: String,
    creation_date_time: DateTime<Utc>,
    payment_info_id: String,
    presenter: Option<Presenter>,
    creditor: Option<Creditor>,
    payments: Vec<Payment>,
    number_of_transactions: usize,
    control_sum: Decimal,
}

impl Default for DirectDebitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectDebitBuilder {
    /// Start a message stamped with the current UTC time and a generated id.
    pub fn new() -> Self {
        let now = Utc::now();
        Self::new_unchecked(ids::generate_message_id(now.naive_utc()), now)
    }

    /// Start a message with a caller-chosen identity, for reproducible output.
    pub fn with_identity(
        message_id: impl Into<String>,
        creation_date_time: DateTime<Utc>,
    ) -> Result<Self, SepaError> {
        let message_id = message_id.into();
        if message_id.trim().is_empty() {
            return Err(SepaError::Builder("Message ID is required".into()));
        }
        if message_id.chars().count() > MAX_IDENTIFIER_LEN {
            return Err(SepaError::Builder(
                "Message ID must be 35 characters or less".into(),
            ));
        }
        Ok(Self::new_unchecked(message_id, creation_date_time))
    }

    fn new_unchecked(message_id: String, creation_date_time: DateTime<Utc>) -> Self {
        Self {
            message_id,
            creation_date_time,
            payment_info_id: ids::generate_payment_info_id(),
            presenter: None,
            creditor: None,
            payments: Vec::new(),
            number_of_transactions: 0,
            control_sum: Decimal::ZERO,
        }
    }

    pub fn presenter(mut self, presenter: Presenter) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn creditor(mut self, creditor: Creditor) -> Self {
        self.creditor = Some(creditor);
        self
    }

    /// Override the generated payment-information id (`PmtInfId`).
    pub fn payment_info_id(mut self, id: impl Into<String>) -> Self {
        self.payment_info_id = id.into();
        self
    }

    /// Append a payment. Insertion order is the transaction order in the XML.
    pub fn add_payment(mut self, payment: Payment) -> Self {
        self.number_of_transactions += 1;
        self.control_sum += payment.amount();
        debug!(
            message_id = %self.message_id,
            end_to_end_id = payment.end_to_end_id(),
            amount = %payment.amount(),
            transactions = self.number_of_transactions,
            "payment added"
        );
        self.payments.push(payment);
        self
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn creation_date_time(&self) -> DateTime<Utc> {
        self.creation_date_time
    }

    pub fn number_of_transactions(&self) -> usize {
        self.number_of_transactions
    }

    /// Running sum of all added payment amounts.
    pub fn control_sum(&self) -> Decimal {
        self.control_sum
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Check completeness and aggregates, producing a message ready to serialize.
    pub fn build(self) -> Result<DirectDebit, SepaError> {
        let presenter = self
            .presenter
            .ok_or_else(|| SepaError::Builder("Presenter data is required".into()))?;
        let creditor = self
            .creditor
            .ok_or_else(|| SepaError::Builder("Creditor data is required".into()))?;

        if self.payments.is_empty() {
            return Err(SepaError::Builder(
                "At least one payment is required".into(),
            ));
        }

        let calculated: Decimal = self.payments.iter().map(Payment::amount).sum();
        if (calculated - self.control_sum).abs() > CONTROL_SUM_TOLERANCE
            || self.number_of_transactions != self.payments.len()
        {
            warn!(
                message_id = %self.message_id,
                running = %self.control_sum,
                calculated = %calculated,
                "control sum mismatch"
            );
            return Err(SepaError::Builder(
                "Control sum does not match payments sum".into(),
            ));
        }

        debug!(
            message_id = %self.message_id,
            transactions = self.number_of_transactions,
            control_sum = %self.control_sum,
            "direct debit message built"
        );

        Ok(DirectDebit {
            message_id: self.message_id,
            creation_date_time: self.creation_date_time,
            payment_info_id: self.payment_info_id,
            presenter,
            creditor,
            payments: self.payments,
            number_of_transactions: self.number_of_transactions,
            control_sum: self.control_sum,
        })
    }

    /// Build and render the `pain.008.001.02` document.
    #[cfg(feature = "pain008")]
    pub fn generate_xml(self) -> Result<String, SepaError> {
        let message = self.build()?;
        crate::pain008::to_pain008_xml(&message)
    }
}

/// A complete, validated direct-debit message.
///
/// Only [`DirectDebitBuilder::build`] creates these, so a `DirectDebit` always
/// has a presenter, a creditor, at least one payment, and aggregates that match
/// its payments.
#[derive(Debug, Clone)]
pub struct DirectDebit {
    message_id: String,
    creation_date_time: DateTime<Utc>,
    payment_info_id: String,
    presenter: Presenter,
    creditor: Creditor,
    payments: Vec<Payment>,
    number_of_transactions: usize,
    control_sum: Decimal,
}

impl DirectDebit {
    /// `MsgId`.
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// `CreDtTm`.
    pub fn creation_date_time(&self) -> DateTime<Utc> {
        self.creation_date_time
    }

    /// `PmtInfId`.
    pub fn payment_info_id(&self) -> &str {
        &self.payment_info_id
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub fn creditor(&self) -> &Creditor {
        &self.creditor
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// `NbOfTxs`.
    pub fn number_of_transactions(&self) -> usize {
        self.number_of_transactions
    }

    /// `CtrlSum`.
    pub fn control_sum(&self) -> Decimal {
        self.control_sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn presenter() -> Presenter {
        Presenter::new("ES00-COMPANY123-12345678X", "Mi Empresa S.L.", "0182").unwrap()
    }

    fn creditor() -> Creditor {
        Creditor::new(
            "ES00-COMPANY123-12345678X",
            date(2030, 1, 10),
            "Mi Empresa S.L.",
            "ES9121000418450200051332",
            "BBVAESMMXXX",
            "ES50000B01958115",
        )
        .unwrap()
    }

    fn payment(amount: Decimal) -> Payment {
        let debtor =
            Debtor::new("Cliente Ejemplo", "ES7620770024003102575766", "BSCHESMMXXX").unwrap();
        Payment::new(
            Arc::new(debtor),
            "MANDATE-123456",
            date(2023, 1, 15),
            SequenceType::Recurring,
            "INV-2023-001",
            amount,
            "Factura",
        )
        .unwrap()
    }

    #[test]
    fn aggregates_track_payments() {
        let builder = DirectDebitBuilder::new()
            .add_payment(payment(dec!(150.50)))
            .add_payment(payment(dec!(200.00)));
        assert_eq!(builder.number_of_transactions(), 2);
        assert_eq!(builder.payments().len(), 2);
        assert_eq!(builder.control_sum(), dec!(350.50));
    }

    #[test]
    fn missing_parts_reported_in_order() {
        let err = DirectDebitBuilder::new().build().unwrap_err();
        assert_eq!(err.message(), "Presenter data is required");

        let err = DirectDebitBuilder::new()
            .presenter(presenter())
            .build()
            .unwrap_err();
        assert_eq!(err.message(), "Creditor data is required");

        let err = DirectDebitBuilder::new()
            .presenter(presenter())
            .creditor(creditor())
            .build()
            .unwrap_err();
        assert_eq!(err.message(), "At least one payment is required");
    }

    #[test]
    fn drifted_control_sum_rejected() {
        let mut builder = DirectDebitBuilder::new()
            .presenter(presenter())
            .creditor(creditor())
            .add_payment(payment(dec!(10)));
        builder.control_sum += dec!(0.01);
        let err = builder.build().unwrap_err();
        assert_eq!(err.message(), "Control sum does not match payments sum");
    }

    #[test]
    fn drift_within_tolerance_accepted() {
        let mut builder = DirectDebitBuilder::new()
            .presenter(presenter())
            .creditor(creditor())
            .add_payment(payment(dec!(10)));
        builder.control_sum += dec!(0.0005);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn identity_is_fixed_at_construction() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        let builder = DirectDebitBuilder::with_identity("MSG-001", ts).unwrap();
        let id = builder.message_id().to_string();
        let msg = builder
            .presenter(presenter())
            .creditor(creditor())
            .payment_info_id("PMT-FIXED")
            .add_payment(payment(dec!(1)))
            .build()
            .unwrap();
        assert_eq!(msg.message_id(), id);
        assert_eq!(msg.creation_date_time(), ts);
        assert_eq!(msg.payment_info_id(), "PMT-FIXED");
    }

    #[test]
    fn identity_rejects_bad_message_id() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        assert!(DirectDebitBuilder::with_identity("", ts).is_err());
        assert!(DirectDebitBuilder::with_identity("M".repeat(36), ts).is_err());
    }

    #[test]
    fn generated_identity() {
        let builder = DirectDebitBuilder::new();
        assert!(builder.message_id().starts_with("SEPA-"));
        let msg = builder
            .presenter(presenter())
            .creditor(creditor())
            .add_payment(payment(dec!(1)))
            .build()
            .unwrap();
        assert!(msg.payment_info_id().starts_with("PMT-"));
    }
}
