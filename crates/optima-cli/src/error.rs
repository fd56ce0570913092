//! CLI error types.

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// No institution matches the given id or name.
    #[error("Unknown institution: {0}")]
    UnknownInstitution(String),

    /// The registry is empty and no institution was named.
    #[error("No institutions registered. Add one with `optima institution add`.")]
    NoInstitutions,

    /// No saved operation has the given id.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// The business guard refused to save the operation.
    #[error("Cannot save operation: final net {0} is not positive")]
    SaveRejected(Decimal),

    /// Input file extension is neither .toml nor .json.
    #[error("Unsupported input format: {}. Use a .toml or .json file.", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Input file could not be parsed.
    #[error("Cannot parse {}: {message}", path.display())]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
