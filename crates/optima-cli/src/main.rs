//! Optima CLI - Receivables advance simulation and audit.
//!
//! # Usage
//!
//! ```bash
//! # Price a scenario against the default institution
//! optima simulate --input scenario.toml
//!
//! # Price and save it to history
//! optima simulate --input scenario.toml --institution "Banco Exemplo S.A." --save
//!
//! # Reconcile against what the bank credited
//! optima compare --input realized.json
//!
//! # When does a title due on Good Friday settle with one day of float?
//! optima settle --due 2026-04-03 --float 1
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use config::{resolve_config_path, AppConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = AppConfig::load_from(&config_path)?;
    init_logging(cli.verbose, config.log_filter.as_deref());
    tracing::debug!("using configuration at {}", config_path.display());

    let ctx = Context {
        format: cli.format.unwrap_or(config.default_format),
        config,
        config_path,
        data_path: cli.data,
    };

    // Execute command
    match cli.command {
        Commands::Simulate(args) => commands::simulate::execute(args, &ctx)?,
        Commands::Compare(args) => commands::compare::execute(args, &ctx)?,
        Commands::Institution(args) => commands::institution::execute(args, &ctx)?,
        Commands::History(args) => commands::history::execute(args, &ctx)?,
        Commands::Holidays(args) => commands::holidays::execute(args, &ctx)?,
        Commands::Settle(args) => commands::settle::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so table and JSON output stay clean.
fn init_logging(verbose: u8, configured: Option<&str>) {
    let fallback = match verbose {
        0 => configured.unwrap_or("warn"),
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
