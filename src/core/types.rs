use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::{SepaError, ValidationError};
use super::options::ValidationOptions;
use super::validation::{self, PartyRole};

/// Initiating party of the message (the company presenting the file to its bank).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presenter {
    identifier: String,
    name: String,
    bbva_office: String,
}

impl Presenter {
    /// Validates identifier, name and office code, in that order.
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        bbva_office: impl Into<String>,
    ) -> Result<Self, SepaError> {
        let identifier = identifier.into();
        let name = name.into();
        let bbva_office = bbva_office.into();

        validation::validate_presenter_identifier(&identifier)?;
        validation::validate_name(&name, PartyRole::Presenter)?;
        validation::validate_office_code(&bbva_office)?;

        Ok(Self {
            identifier,
            name,
            bbva_office,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Four-digit office code of the presenting bank branch.
    pub fn bbva_office(&self) -> &str {
        &self.bbva_office
    }
}

/// Creditor collecting the direct debits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Creditor {
    identifier: String,
    collection_date: NaiveDate,
    name: String,
    iban: String,
    bic: String,
    scheme_id: String,
}

impl Creditor {
    /// Construct with [`ValidationOptions::default`].
    pub fn new(
        identifier: impl Into<String>,
        collection_date: NaiveDate,
        name: impl Into<String>,
        iban: &str,
        bic: &str,
        scheme_id: impl Into<String>,
    ) -> Result<Self, SepaError> {
        Self::with_options(
            identifier,
            collection_date,
            name,
            iban,
            bic,
            scheme_id,
            &ValidationOptions::default(),
        )
    }

    /// Validates identifier → collection date (if enabled) → name → IBAN →
    /// BIC → scheme id. IBAN and BIC are stored normalized.
    pub fn with_options(
        identifier: impl Into<String>,
        collection_date: NaiveDate,
        name: impl Into<String>,
        iban: &str,
        bic: &str,
        scheme_id: impl Into<String>,
        options: &ValidationOptions,
    ) -> Result<Self, SepaError> {
        let identifier = identifier.into();
        let name = name.into();
        let scheme_id = scheme_id.into();

        validation::validate_creditor_identifier(&identifier)?;
        if options.require_future_collection_date {
            validation::validate_collection_date(collection_date, options.today())?;
        }
        validation::validate_name(&name, PartyRole::Creditor)?;
        let iban = validation::validate_iban(iban, PartyRole::Creditor, options)?;
        let bic = validation::validate_bic(bic, PartyRole::Creditor)?;
        validation::validate_scheme_id(&scheme_id)?;

        Ok(Self {
            identifier,
            collection_date,
            name,
            iban,
            bic,
            scheme_id,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Requested collection date (`ReqdColltnDt`).
    pub fn collection_date(&self) -> NaiveDate {
        self.collection_date
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn iban(&self) -> &str {
        &self.iban
    }

    pub fn bic(&self) -> &str {
        &self.bic
    }

    /// Creditor scheme identifier (`CdtrSchmeId`).
    pub fn scheme_id(&self) -> &str {
        &self.scheme_id
    }
}

/// Account holder being debited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Debtor {
    name: String,
    iban: String,
    bic: String,
}

impl Debtor {
    /// Construct with [`ValidationOptions::default`].
    pub fn new(name: impl Into<String>, iban: &str, bic: &str) -> Result<Self, SepaError> {
        Self::with_options(name, iban, bic, &ValidationOptions::default())
    }

    pub fn with_options(
        name: impl Into<String>,
        iban: &str,
        bic: &str,
        options: &ValidationOptions,
    ) -> Result<Self, SepaError> {
        let name = name.into();

        validation::validate_name(&name, PartyRole::Debtor)?;
        let iban = validation::validate_iban(iban, PartyRole::Debtor, options)?;
        let bic = validation::validate_bic(bic, PartyRole::Debtor)?;

        Ok(Self { name, iban, bic })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn iban(&self) -> &str {
        &self.iban
    }

    pub fn bic(&self) -> &str {
        &self.bic
    }
}

/// ISO 20022 `SequenceType1Code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SequenceType {
    /// RCUR: recurring collection.
    #[serde(rename = "RCUR")]
    Recurring,
    /// OOFF: one-off collection.
    #[serde(rename = "OOFF")]
    OneOff,
    /// FRST: first collection of a series.
    #[serde(rename = "FRST")]
    First,
    /// FNAL: final collection of a series.
    #[serde(rename = "FNAL")]
    Final,
}

impl SequenceType {
    pub const ALL: [SequenceType; 4] = [Self::Recurring, Self::OneOff, Self::First, Self::Final];

    /// Four-letter ISO 20022 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Recurring => "RCUR",
            Self::OneOff => "OOFF",
            Self::First => "FRST",
            Self::Final => "FNAL",
        }
    }

    /// Parse from the ISO 20022 code string.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl fmt::Display for SequenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SequenceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| {
            let codes: Vec<&str> = Self::ALL.iter().map(|t| t.code()).collect();
            ValidationError::new(
                "payment.sequence_type",
                format!("Invalid sequence type. Must be one of: {}", codes.join(", ")),
            )
        })
    }
}

/// A single direct-debit collection against a debtor's mandate.
///
/// The debtor is shared, so one account holder can back many payments
/// without being copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    debtor: Arc<Debtor>,
    mandate_id: String,
    mandate_date: NaiveDate,
    sequence_type: SequenceType,
    end_to_end_id: String,
    amount: Decimal,
    concept: String,
}

impl Payment {
    /// Construct with [`ValidationOptions::default`].
    pub fn new(
        debtor: Arc<Debtor>,
        mandate_id: impl Into<String>,
        mandate_date: NaiveDate,
        sequence_type: SequenceType,
        end_to_end_id: impl Into<String>,
        amount: Decimal,
        concept: impl Into<String>,
    ) -> Result<Self, SepaError> {
        Self::with_options(
            debtor,
            mandate_id,
            mandate_date,
            sequence_type,
            end_to_end_id,
            amount,
            concept,
            &ValidationOptions::default(),
        )
    }

    /// Validates mandate id → mandate date → end-to-end id → amount → concept.
    #[allow(clippy::too_many_arguments)]
    pub fn with_options(
        debtor: Arc<Debtor>,
        mandate_id: impl Into<String>,
        mandate_date: NaiveDate,
        sequence_type: SequenceType,
        end_to_end_id: impl Into<String>,
        amount: Decimal,
        concept: impl Into<String>,
        options: &ValidationOptions,
    ) -> Result<Self, SepaError> {
        let mandate_id = mandate_id.into();
        let end_to_end_id = end_to_end_id.into();
        let concept = concept.into();

        validation::validate_reference(&mandate_id, "payment.mandate_id", "Mandate ID")?;
        validation::validate_mandate_date(mandate_date, options.today())?;
        validation::validate_reference(&end_to_end_id, "payment.end_to_end_id", "End-to-end ID")?;
        validation::validate_amount(amount)?;
        validation::validate_concept(&concept)?;

        Ok(Self {
            debtor,
            mandate_id,
            mandate_date,
            sequence_type,
            end_to_end_id,
            amount,
            concept,
        })
    }

    pub fn debtor(&self) -> &Debtor {
        &self.debtor
    }

    /// The shared handle to the debtor.
    pub fn debtor_arc(&self) -> &Arc<Debtor> {
        &self.debtor
    }

    pub fn mandate_id(&self) -> &str {
        &self.mandate_id
    }

    /// Date the mandate was signed (`DtOfSgntr`).
    pub fn mandate_date(&self) -> NaiveDate {
        self.mandate_date
    }

    pub fn sequence_type(&self) -> SequenceType {
        self.sequence_type
    }

    pub fn end_to_end_id(&self) -> &str {
        &self.end_to_end_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Unstructured remittance text; may be empty.
    pub fn concept(&self) -> &str {
        &self.concept
    }
}
