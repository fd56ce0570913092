//! Error types for the Optima core.
//!
//! The calculation engine degrades to sentinel values instead of failing on
//! incomplete input, so these errors surface mostly at the edges: parsing
//! dates and validating fee profiles.

use rust_decimal::Decimal;
use thiserror::Error;

/// A specialized Result type for Optima core operations.
pub type OptimaResult<T> = Result<T, OptimaError>;

/// The main error type for Optima core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimaError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A fee profile field violates its invariant.
    #[error("Invalid institution field '{field}': {reason}")]
    InvalidInstitution {
        /// Name of the offending field.
        field: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// A negative rate or fee was supplied.
    #[error("Negative value for '{field}': {value}")]
    NegativeValue {
        /// Name of the offending field.
        field: String,
        /// The negative value.
        value: Decimal,
    },
}

impl OptimaError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid institution error.
    #[must_use]
    pub fn invalid_institution(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInstitution {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
