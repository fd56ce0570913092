//! Error types for the calculation engine.
//!
//! Incomplete titles never produce errors; they degrade to zero-valued
//! results. The errors here are business-rule rejections and bad input at
//! the assembler boundary.

use optima_core::error::OptimaError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by the calculation engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// The operation's final net is zero or negative and cannot be saved.
    #[error("final net {final_net} must be positive to save the operation")]
    NonPositiveNet {
        /// The computed final net.
        final_net: Decimal,
    },

    /// Invalid input parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Error from the core types.
    #[error(transparent)]
    Core(#[from] OptimaError),
}

impl EngineError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_non_positive_net_display() {
        let err = EngineError::NonPositiveNet {
            final_net: dec!(-12.5),
        };
        assert_eq!(
            err.to_string(),
            "final net -12.5 must be positive to save the operation"
        );
    }

    #[test]
    fn test_from_core() {
        let err: EngineError = OptimaError::invalid_date("bad").into();
        assert!(matches!(err, EngineError::Core(_)));
        assert_eq!(err.to_string(), "Invalid date: bad");
    }
}
