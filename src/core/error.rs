use thiserror::Error;

/// Errors that can occur while constructing entities or generating a message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SepaError {
    /// A field of an entity violated its format rule.
    #[error("validation failed: {0}")]
    Validation(ValidationError),

    /// The message is incomplete or its aggregates are inconsistent.
    #[error("builder error: {0}")]
    Builder(String),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),
}

impl SepaError {
    /// The rule-specific message, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(e) => &e.message,
            Self::Builder(msg) | Self::Xml(msg) => msg,
        }
    }
}

impl From<ValidationError> for SepaError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "debtor.iban").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
