//! Field-level validation rules.
//!
//! Every check is a pure function of its input and fails with the first
//! violated rule. Entity constructors call these in a fixed order, so the
//! error a caller sees is deterministic.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::options::ValidationOptions;

/// Maximum length of identifiers (ISO 20022 `Max35Text`).
pub const MAX_IDENTIFIER_LEN: usize = 35;
/// Maximum length of party names.
pub const MAX_NAME_LEN: usize = 70;
/// Maximum length of unstructured remittance information.
pub const MAX_CONCEPT_LEN: usize = 640;
/// Largest amount a single collection may carry.
pub const MAX_AMOUNT: Decimal = dec!(999999999.99);

/// Mandates signed before the SEPA migration cannot be collected.
pub static SEPA_MIGRATION_DATE: Lazy<NaiveDate> = Lazy::new(|| {
    NaiveDate::from_ymd_opt(2009, 10, 31).expect("2009-10-31 is a valid calendar date")
});

static CREDITOR_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ES[0-9]{2}(-?[A-Z0-9]+)+$").expect("Failed to compile CREDITOR_ID_REGEX")
});

static PRESENTER_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ES[A-Z0-9-]+$").expect("Failed to compile PRESENTER_ID_REGEX")
});

static DEBTOR_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9 áéíóúÁÉÍÓÚñÑüÜ'.,-]+$").expect("Failed to compile DEBTOR_NAME_REGEX")
});

static IBAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z0-9]{1,30}$").expect("Failed to compile IBAN_REGEX")
});

static SPANISH_IBAN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ES[0-9]{22}$").expect("Failed to compile SPANISH_IBAN_REGEX"));

static BIC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{6}[A-Z0-9]{2}([A-Z0-9]{3})?$").expect("Failed to compile BIC_REGEX")
});

static OFFICE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("Failed to compile OFFICE_REGEX"));

static REFERENCE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9-]+$").expect("Failed to compile REFERENCE_REGEX"));

/// The party a name, IBAN or BIC belongs to. Drives field paths and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    Presenter,
    Creditor,
    Debtor,
}

impl PartyRole {
    /// Human-readable label used in error messages ("Creditor").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Presenter => "Presenter",
            Self::Creditor => "Creditor",
            Self::Debtor => "Debtor",
        }
    }

    fn field(&self, name: &str) -> String {
        format!("{}.{name}", self.label().to_lowercase())
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// C0 control characters other than tab, LF and CR cannot appear in XML 1.0.
fn has_forbidden_control(value: &str) -> bool {
    value
        .chars()
        .any(|c| c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r'))
}

/// Creditor identifier: `ES`, two check digits, then alphanumeric groups
/// separated by single hyphens (e.g. "ES00-COMPANY123-12345678X").
pub fn validate_creditor_identifier(identifier: &str) -> Result<(), ValidationError> {
    let field = "creditor.identifier";
    if identifier.is_empty() {
        return Err(ValidationError::new(field, "Creditor identifier is required"));
    }
    if char_len(identifier) > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::new(
            field,
            "Creditor identifier must be 35 characters or less",
        ));
    }
    if !CREDITOR_ID_REGEX.is_match(identifier) {
        return Err(ValidationError::new(
            field,
            "Creditor identifier must follow format ESXX-SUFIJO-NIF or similar",
        ));
    }
    Ok(())
}

/// Presenter identifier: `ES` followed by uppercase alphanumerics or hyphens.
pub fn validate_presenter_identifier(identifier: &str) -> Result<(), ValidationError> {
    let field = "presenter.identifier";
    if identifier.is_empty() {
        return Err(ValidationError::new(field, "Presenter identifier is required"));
    }
    if char_len(identifier) > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::new(
            field,
            "Presenter identifier must be 35 characters or less",
        ));
    }
    if !PRESENTER_ID_REGEX.is_match(identifier) {
        return Err(ValidationError::new(
            field,
            "Presenter identifier must start with ES followed by alphanumeric characters or hyphens",
        ));
    }
    Ok(())
}

/// Party name: non-blank and at most 70 characters. Debtor names are further
/// restricted to the SEPA Latin charset with Spanish accents.
pub fn validate_name(name: &str, role: PartyRole) -> Result<(), ValidationError> {
    let field = role.field("name");
    let label = role.label();
    if name.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{label} name is required")));
    }
    if char_len(name) > MAX_NAME_LEN {
        return Err(ValidationError::new(
            field,
            format!("{label} name must be 70 characters or less"),
        ));
    }
    if role == PartyRole::Debtor && !DEBTOR_NAME_REGEX.is_match(name) {
        return Err(ValidationError::new(
            field,
            "Debtor name contains invalid characters",
        ));
    }
    if has_forbidden_control(name) {
        return Err(ValidationError::new(
            field,
            format!("{label} name contains control characters"),
        ));
    }
    Ok(())
}

/// Validate an IBAN and return it in compact form (spaces removed).
///
/// Spanish IBANs must be exactly 24 characters. Debtor IBANs must also pass
/// the mod-97 check when [`ValidationOptions::strict_iban_checksum`] is set;
/// presenter and creditor accounts are only checked for shape.
pub fn validate_iban(
    iban: &str,
    role: PartyRole,
    options: &ValidationOptions,
) -> Result<String, ValidationError> {
    let field = role.field("iban");
    let compact: String = iban.chars().filter(|c| *c != ' ').collect();

    if compact.is_empty() {
        return Err(ValidationError::new(
            field,
            format!("{} IBAN is required", role.label()),
        ));
    }
    if !IBAN_REGEX.is_match(&compact) {
        return Err(ValidationError::new(field, "Invalid IBAN format"));
    }
    if compact.starts_with("ES") {
        if !SPANISH_IBAN_REGEX.is_match(&compact) {
            return Err(ValidationError::new(
                field,
                "Spanish IBAN must be 24 characters long",
            ));
        }
        if role == PartyRole::Debtor
            && options.strict_iban_checksum
            && !is_valid_iban_checksum(&compact)
        {
            return Err(ValidationError::new(field, "Invalid IBAN checksum"));
        }
    }
    Ok(compact)
}

/// ISO 7064 MOD97-10 check as used by IBAN.
///
/// The first four characters move to the end, letters become two-digit
/// numbers (A=10 … Z=35), and the digit string must leave remainder 1.
/// Expects a compact, uppercase IBAN; any other character fails the check.
pub fn is_valid_iban_checksum(iban: &str) -> bool {
    if iban.len() < 5 || !iban.is_ascii() {
        return false;
    }
    let (head, tail) = iban.split_at(4);
    let mut remainder: u32 = 0;
    for c in tail.chars().chain(head.chars()) {
        match c {
            '0'..='9' => {
                remainder = (remainder * 10 + c as u32 - '0' as u32) % 97;
            }
            'A'..='Z' => {
                let value = c as u32 - 'A' as u32 + 10;
                remainder = (remainder * 10 + value / 10) % 97;
                remainder = (remainder * 10 + value % 10) % 97;
            }
            _ => return false,
        }
    }
    remainder == 1
}

/// Validate a BIC/SWIFT code (8 or 11 characters) and return it normalized:
/// spaces removed, uppercase.
pub fn validate_bic(bic: &str, role: PartyRole) -> Result<String, ValidationError> {
    let field = role.field("bic");
    let normalized: String = bic
        .chars()
        .filter(|c| *c != ' ')
        .collect::<String>()
        .to_uppercase();

    if normalized.is_empty() {
        return Err(ValidationError::new(
            field,
            format!("{} BIC is required", role.label()),
        ));
    }
    if !BIC_REGEX.is_match(&normalized) {
        return Err(ValidationError::new(
            field,
            "Invalid BIC format. Must be 8 or 11 characters",
        ));
    }
    Ok(normalized)
}

/// Four-digit bank office code; `0000` and `9999` are reserved.
pub fn validate_office_code(office: &str) -> Result<(), ValidationError> {
    if !OFFICE_REGEX.is_match(office) || office == "0000" || office == "9999" {
        return Err(ValidationError::new(
            "presenter.bbva_office",
            "BBVA office must be a 4-digit number between 0001 and 9998",
        ));
    }
    Ok(())
}

/// Creditor scheme identifier: non-empty, at most 35 characters.
pub fn validate_scheme_id(scheme_id: &str) -> Result<(), ValidationError> {
    let field = "creditor.scheme_id";
    if scheme_id.trim().is_empty() {
        return Err(ValidationError::new(
            field,
            "Creditor scheme identifier is required",
        ));
    }
    if char_len(scheme_id) > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::new(
            field,
            "Creditor scheme identifier must be 35 characters or less",
        ));
    }
    if has_forbidden_control(scheme_id) {
        return Err(ValidationError::new(
            field,
            "Creditor scheme identifier contains control characters",
        ));
    }
    Ok(())
}

/// Collection date must be strictly after `today`.
pub fn validate_collection_date(date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if date <= today {
        return Err(ValidationError::new(
            "creditor.collection_date",
            "Collection date must be in the future",
        ));
    }
    Ok(())
}

/// Mandate signature date: not after `today`, not before the SEPA migration.
pub fn validate_mandate_date(date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    let field = "payment.mandate_date";
    if date > today {
        return Err(ValidationError::new(
            field,
            "Mandate date cannot be in the future",
        ));
    }
    if date < *SEPA_MIGRATION_DATE {
        return Err(ValidationError::new(
            field,
            "Mandate date cannot be before 31.10.2009",
        ));
    }
    Ok(())
}

/// Mandate ids and end-to-end ids: 1-35 characters of `[A-Z0-9-]`.
///
/// `label` is the human name of the reference ("Mandate ID", "End-to-end ID").
pub fn validate_reference(value: &str, field: &str, label: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(field, format!("{label} is required")));
    }
    if char_len(value) > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::new(
            field,
            format!("{label} must be 35 characters or less"),
        ));
    }
    if !REFERENCE_REGEX.is_match(value) {
        return Err(ValidationError::new(
            field,
            format!(
                "{label} contains invalid characters. Only letters, numbers and hyphens are allowed"
            ),
        ));
    }
    Ok(())
}

/// Collection amount: positive, capped, and with at most two decimals.
pub fn validate_amount(amount: Decimal) -> Result<(), ValidationError> {
    let field = "payment.amount";
    if amount <= Decimal::ZERO {
        return Err(ValidationError::new(field, "Amount must be greater than 0"));
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::new(
            field,
            "Amount exceeds maximum allowed value",
        ));
    }
    if amount.round_dp(2) != amount {
        return Err(ValidationError::new(
            field,
            "Amount must have no more than 2 decimal places",
        ));
    }
    Ok(())
}

/// Remittance concept: may be empty, at most 640 characters.
pub fn validate_concept(concept: &str) -> Result<(), ValidationError> {
    let field = "payment.concept";
    if char_len(concept) > MAX_CONCEPT_LEN {
        return Err(ValidationError::new(
            field,
            "Concept must be 640 characters or less",
        ));
    }
    if has_forbidden_control(concept) {
        return Err(ValidationError::new(field, "Concept contains control characters"));
    }
    Ok(())
}
