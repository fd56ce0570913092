//! Application configuration.
//!
//! Loaded from TOML. Lookup order is an explicit `--config` path (or the
//! `OPTIMA_CONFIG` variable, which clap folds into the same flag), then
//! `<config_dir>/optima/config.toml`. A missing file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Which storage backend to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Embedded redb database file.
    #[default]
    Redb,
    /// Process-local storage, discarded on exit.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Redb => write!(f, "redb"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// CLI configuration file contents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storage backend.
    pub storage_backend: StorageBackend,
    /// Database path; `<config_dir>/optima/optima.redb` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
    /// Institution id used when a command names none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_institution: Option<String>,
    /// Output format used when `--format` is absent.
    pub default_format: OutputFormat,
    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl AppConfig {
    /// Loads the configuration from `path`, or defaults if the file is absent.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolved database path.
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| app_dir().join("optima.redb"))
    }
}

/// Picks the config file path: explicit first, then the per-user default.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| app_dir().join("config.toml"), Path::to_path_buf)
}

fn app_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map_or_else(|| PathBuf::from("."), |dir| dir.join("optima"))
}
