use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinsightError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Unknown catalog: {0} (expected basic, applied or advanced)")]
    UnknownCatalog(String),

    #[error(transparent)]
    Classification(#[from] ClassificationError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FinsightError {
    fn from(e: serde_json::Error) -> Self {
        FinsightError::SerializationError(e.to_string())
    }
}

/// Why a single metric could not be computed from the supplied record.
///
/// A `DataError` never aborts a catalog run; the runner turns it into an
/// `unavailable` result for that metric only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("missing input field `{0}`")]
    MissingField(&'static str),

    #[error("zero denominator in {context}")]
    ZeroDenominator { context: &'static str },

    #[error("{context} is undefined: {reason}")]
    Undefined {
        context: &'static str,
        reason: String,
    },

    #[error("numeric overflow in {context}")]
    Overflow { context: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    #[error("benchmark must be positive to classify by ratio (got {benchmark})")]
    NonPositiveBenchmark { benchmark: Decimal },
}
