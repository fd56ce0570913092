//! CLI command implementations.

pub mod compare;
pub mod config;
pub mod history;
pub mod holidays;
pub mod institution;
pub mod settle;
pub mod simulate;

// Re-export submodules for convenience
pub use compare::CompareArgs;
pub use config::ConfigArgs;
pub use history::HistoryArgs;
pub use holidays::HolidaysArgs;
pub use institution::InstitutionArgs;
pub use settle::SettleArgs;
pub use simulate::SimulateArgs;

use std::path::{Path, PathBuf};

use optima_core::types::{Date, FinancialInstitution};
use optima_storage::{InMemoryStorage, RedbStorage, StorageAdapter};
use serde::de::DeserializeOwned;

use crate::cli::OutputFormat;
use crate::config::{AppConfig, StorageBackend};
use crate::error::{CliError, CliResult};

/// Settings shared by every command.
pub struct Context {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Where the configuration lives (whether or not it exists yet).
    pub config_path: PathBuf,
    /// Effective output format.
    pub format: OutputFormat,
    /// Storage path from `--data`.
    pub data_path: Option<PathBuf>,
}

impl Context {
    /// Opens the configured storage backend.
    pub fn open_storage(&self) -> anyhow::Result<Box<dyn StorageAdapter>> {
        match self.config.storage_backend {
            StorageBackend::Memory => Ok(Box::new(InMemoryStorage::new())),
            StorageBackend::Redb => {
                let path = self
                    .data_path
                    .clone()
                    .unwrap_or_else(|| self.config.storage_path());
                tracing::debug!("opening storage at {}", path.display());
                Ok(Box::new(RedbStorage::open(path)?))
            }
        }
    }

    /// Picks the institution for a command.
    ///
    /// An explicit key wins, then the configured default, then the first
    /// registered profile.
    pub fn resolve_institution(
        &self,
        storage: &dyn StorageAdapter,
        explicit: Option<&str>,
    ) -> anyhow::Result<FinancialInstitution> {
        let key = explicit.or(self.config.default_institution.as_deref());
        match key {
            Some(key) => storage
                .find_institution(key)?
                .ok_or_else(|| CliError::UnknownInstitution(key.to_string()).into()),
            None => storage
                .load_institutions()?
                .into_iter()
                .next()
                .ok_or_else(|| CliError::NoInstitutions.into()),
        }
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Reads a `.toml` or `.json` file into `T`.
pub fn load_input<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let content = std::fs::read_to_string(path)?;
    let parse_error = |message: String| CliError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match extension.as_deref() {
        Some("toml") => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
        _ => Err(CliError::UnsupportedFormat(path.to_path_buf())),
    }
}
