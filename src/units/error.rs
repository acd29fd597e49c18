use thiserror::Error;

/// Result type for unit and quantity operations
pub type Result<T> = std::result::Result<T, UnitError>;

/// Errors raised while parsing, normalizing or combining quantities
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Malformed unit string, quantity literal or expression
    #[error("Parse error in '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Symbol not present in the registry used for normalization
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Operation requires matching units
    #[error("Incompatible units: '{left}' and '{right}'")]
    IncompatibleUnits { left: String, right: String },

    /// A unit exponent left the `i32` range during arithmetic
    #[error("Exponent overflow for unit: {0}")]
    ExponentOverflow(String),

    /// Custom unit definition rejected while building a registry
    #[error("Invalid definition for unit '{symbol}': {reason}")]
    InvalidDefinition { symbol: String, reason: String },
}

impl UnitError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        UnitError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn incompatible(left: impl ToString, right: impl ToString) -> Self {
        UnitError::IncompatibleUnits {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}
