use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Caller-controlled validation switches.
///
/// Nothing here is read from the environment: an embedding application that
/// wants a lenient "testing" mode builds the options itself and passes them
/// to the entity constructors.
///
/// ```
/// use adeudo::core::ValidationOptions;
///
/// let opts = ValidationOptions::default();
/// assert!(opts.strict_iban_checksum);
/// assert!(!opts.require_future_collection_date);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Enforce the ISO 7064 mod-97 check on Spanish debtor IBANs.
    pub strict_iban_checksum: bool,
    /// Reject creditors whose collection date is not strictly after today.
    pub require_future_collection_date: bool,
    /// Date used as "today" by date rules. `None` means the local calendar date.
    pub reference_date: Option<NaiveDate>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            strict_iban_checksum: true,
            require_future_collection_date: false,
            reference_date: None,
        }
    }
}

impl ValidationOptions {
    /// Options with the IBAN checksum disabled, for fixtures built from
    /// synthetic account numbers.
    pub fn lenient() -> Self {
        Self {
            strict_iban_checksum: false,
            ..Self::default()
        }
    }

    /// Pin "today" to a fixed date.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// The date rules compare against.
    pub fn today(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_date_overrides_clock() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let opts = ValidationOptions::default().with_reference_date(d);
        assert_eq!(opts.today(), d);
    }

    #[test]
    fn lenient_only_disables_checksum() {
        let opts = ValidationOptions::lenient();
        assert!(!opts.strict_iban_checksum);
        assert!(!opts.require_future_collection_date);
        assert_eq!(opts.reference_date, None);
    }
}
