//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::commands::{
    CompareArgs, ConfigArgs, HistoryArgs, HolidaysArgs, InstitutionArgs, SettleArgs,
    SimulateArgs,
};

/// Optima - Receivables advance simulation and audit
#[derive(Parser)]
#[command(name = "optima")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(long, global = true, env = "OPTIMA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Storage path, overriding the configured one
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Simulate an advance operation from a scenario file
    Simulate(SimulateArgs),

    /// Reconcile predicted nets against realized settlements
    Compare(CompareArgs),

    /// Manage institution fee profiles
    Institution(InstitutionArgs),

    /// Browse saved operations
    History(HistoryArgs),

    /// List national holidays
    Holidays(HolidaysArgs),

    /// Project the settlement date of a due date
    Settle(SettleArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the headline value)
    Minimal,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Minimal => "minimal",
        };
        f.write_str(label)
    }
}
