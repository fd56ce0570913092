//! Config command implementation.
//!
//! Inspects or creates the CLI configuration file.

use anyhow::Result;
use clap::{Args, Subcommand};
use optima_storage::StorageStats;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::config::AppConfig;
use crate::output::{print_header, print_info, print_json, print_output, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show configuration file location
    Path,

    /// Check the storage backend and count stored records
    Storage,

    /// Write a default configuration file
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Path => execute_path(ctx),
        ConfigCommand::Storage => execute_storage(ctx),
        ConfigCommand::Init(init_args) => execute_init(init_args, ctx),
    }
}

/// Show current configuration.
fn execute_show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    match ctx.format {
        OutputFormat::Json => print_json(config)?,
        OutputFormat::Minimal => print!("{}", toml::to_string_pretty(config)?),
        OutputFormat::Table | OutputFormat::Csv => {
            let results = vec![
                KeyValue::new("storage_backend", config.storage_backend.to_string()),
                KeyValue::new(
                    "storage_path",
                    ctx.data_path
                        .clone()
                        .unwrap_or_else(|| config.storage_path())
                        .display()
                        .to_string(),
                ),
                KeyValue::new(
                    "default_institution",
                    config.default_institution.clone().unwrap_or_default(),
                ),
                KeyValue::new("default_format", config.default_format.to_string()),
                KeyValue::new("log_filter", config.log_filter.clone().unwrap_or_default()),
            ];
            if ctx.format == OutputFormat::Table {
                print_header("Current Configuration");
            }
            print_output(&results, ctx.format)?;
        }
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(ctx: &Context) -> Result<()> {
    if ctx.format == OutputFormat::Minimal {
        println!("{}", ctx.config_path.display());
        return Ok(());
    }
    print_info(&format!("Config file: {}", ctx.config_path.display()));
    if ctx.config_path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct StorageStatus {
    backend: &'static str,
    healthy: bool,
    #[serde(flatten)]
    stats: StorageStats,
}

/// Report backend health and record counts.
fn execute_storage(ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let status = StorageStatus {
        backend: storage.backend_name(),
        healthy: storage.is_healthy(),
        stats: storage.stats()?,
    };

    match ctx.format {
        OutputFormat::Json => print_json(&status)?,
        OutputFormat::Minimal => {
            println!("{}", if status.healthy { "ok" } else { "unhealthy" });
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let results = vec![
                KeyValue::new("backend", status.backend),
                KeyValue::new("healthy", status.healthy.to_string()),
                KeyValue::new("institutions", status.stats.institution_count.to_string()),
                KeyValue::new("operations", status.stats.operation_count.to_string()),
                KeyValue::new(
                    "file_size_bytes",
                    status
                        .stats
                        .file_size_bytes
                        .map(|size| size.to_string())
                        .unwrap_or_default(),
                ),
            ];
            if ctx.format == OutputFormat::Table {
                print_header("Storage");
            }
            print_output(&results, ctx.format)?;
        }
    }

    Ok(())
}

/// Write the default configuration.
fn execute_init(args: InitArgs, ctx: &Context) -> Result<()> {
    if ctx.config_path.exists() && !args.force {
        print_warning(&format!(
            "{} already exists, use --force to overwrite",
            ctx.config_path.display()
        ));
        return Ok(());
    }

    AppConfig::default().save_to(&ctx.config_path)?;
    print_success(&format!("Wrote {}", ctx.config_path.display()));
    Ok(())
}
