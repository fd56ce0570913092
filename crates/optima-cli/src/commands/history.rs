//! History command implementation.
//!
//! Browses and prunes saved operations.

use anyhow::Result;
use clap::{Args, Subcommand};
use optima_core::types::Operation;
use optima_engine::HistorySummary;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::output::{money, percent, print_header, print_json, print_output, print_success, KeyValue};

/// Arguments for the history command.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommand,
}

/// History subcommands.
#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List saved operations, newest first
    List(FilterArgs),

    /// Show one saved operation
    Show(IdArgs),

    /// Delete a saved operation
    Delete(IdArgs),

    /// Volume and cost statistics
    Summary(FilterArgs),
}

/// Institution filter.
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Only operations with this exact institution name
    #[arg(long)]
    pub institution: Option<String>,
}

/// Operation id argument.
#[derive(Args, Debug)]
pub struct IdArgs {
    /// Operation id
    pub id: String,
}

#[derive(Debug, Serialize, Tabled)]
struct OperationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Institution")]
    institution: String,
    #[tabled(rename = "Titles")]
    titles: usize,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

impl From<&Operation> for OperationRow {
    fn from(op: &Operation) -> Self {
        Self {
            id: op.id.clone(),
            saved: op.date.format("%Y-%m-%d %H:%M").to_string(),
            institution: op.institution_name.clone(),
            titles: op.titles_count,
            gross: money(op.gross_total),
            net: money(op.net_total),
            cost: percent(op.effective_cost_pct()),
        }
    }
}

/// Execute the history command.
pub fn execute(args: HistoryArgs, ctx: &Context) -> Result<()> {
    match args.command {
        HistoryCommand::List(filter) => execute_list(filter, ctx),
        HistoryCommand::Show(id_args) => execute_show(id_args, ctx),
        HistoryCommand::Delete(id_args) => execute_delete(id_args, ctx),
        HistoryCommand::Summary(filter) => execute_summary(filter, ctx),
    }
}

fn execute_list(filter: FilterArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let operations: Vec<Operation> = storage
        .load_operations()?
        .into_iter()
        .filter(|op| {
            filter
                .institution
                .as_deref()
                .map_or(true, |name| op.institution_name == name)
        })
        .collect();

    match ctx.format {
        OutputFormat::Json => print_json(&operations)?,
        OutputFormat::Minimal => {
            for op in &operations {
                println!("{}", op.id);
            }
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<OperationRow> = operations.iter().map(OperationRow::from).collect();
            if ctx.format == OutputFormat::Table {
                print_header("Saved Operations");
            }
            print_output(&rows, ctx.format)?;
        }
    }
    Ok(())
}

fn execute_show(args: IdArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let operation = storage
        .get_operation(&args.id)?
        .ok_or_else(|| CliError::UnknownOperation(args.id.clone()))?;

    match ctx.format {
        OutputFormat::Json => print_json(&operation)?,
        OutputFormat::Minimal => println!("{}", money(operation.net_total)),
        OutputFormat::Table | OutputFormat::Csv => {
            let details = &operation.details;
            let rows = vec![
                KeyValue::new("ID", operation.id.clone()),
                KeyValue::new("Saved", operation.date.to_rfc3339()),
                KeyValue::new(
                    "Operation Date",
                    operation
                        .reference_date
                        .map_or_else(|| "-".to_string(), |d| d.to_string()),
                ),
                KeyValue::new("Institution", operation.institution_name.clone()),
                KeyValue::new("Titles", operation.titles_count.to_string()),
                KeyValue::from_money("Gross", operation.gross_total),
                KeyValue::from_money("Discount Total", operation.discount_total),
                KeyValue::from_money("Net", operation.net_total),
                KeyValue::from_money("Fixed Fees", details.fixed_fees),
                KeyValue::from_money("Repurchases", details.repurchase_total),
                KeyValue::from_money("Extra Fees", details.extra_fees_total),
                KeyValue::new("Discount Method", details.discount_method.to_string()),
            ];
            if ctx.format == OutputFormat::Table {
                print_header("Operation");
            }
            print_output(&rows, ctx.format)?;
        }
    }
    Ok(())
}

fn execute_delete(args: IdArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    if !storage.delete_operation(&args.id)? {
        return Err(CliError::UnknownOperation(args.id).into());
    }
    if ctx.format == OutputFormat::Table {
        print_success(&format!("Deleted operation {}", args.id));
    }
    Ok(())
}

fn execute_summary(filter: FilterArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let operations = storage.load_operations()?;
    let summary = HistorySummary::from_operations(&operations, filter.institution.as_deref());

    match ctx.format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Minimal => println!("{}", summary.operations),
        OutputFormat::Table | OutputFormat::Csv => {
            let rows = vec![
                KeyValue::new(
                    "Institution",
                    summary.institution.clone().unwrap_or_else(|| "all".to_string()),
                ),
                KeyValue::new("Operations", summary.operations.to_string()),
                KeyValue::from_money("Gross Volume", summary.gross_volume),
                KeyValue::from_money("Net Volume", summary.net_volume),
                KeyValue::from_money("Average Net", summary.average_net),
                KeyValue::new("Average Cost", percent(summary.average_cost_pct)),
            ];
            if ctx.format == OutputFormat::Table {
                print_header("History Summary");
            }
            print_output(&rows, ctx.format)?;
        }
    }
    Ok(())
}
