//! Compare command implementation.
//!
//! Reprices titles and reconciles them against the nets the institution
//! actually credited.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use optima_core::types::{lenient_date, Date};
use optima_engine::{compare, Comparison, ComparisonRow, RealizedTitle, ReconciliationStatus};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{load_input, parse_date, Context};
use crate::output::{money, print_header, print_json, print_output, KeyValue};

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Comparison file (.toml or .json) with realized nets per title
    #[arg(short, long)]
    pub input: PathBuf,

    /// Institution id or name, overriding the comparison file
    #[arg(long)]
    pub institution: Option<String>,

    /// Operation date (YYYY-MM-DD), overriding the comparison file
    #[arg(long)]
    pub date: Option<String>,
}

/// Contents of a comparison file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparisonInput {
    /// Operation date the titles were advanced on.
    #[serde(with = "lenient_date")]
    pub operation_date: Option<Date>,
    /// Institution id or name.
    pub institution: Option<String>,
    /// Titles with their realized nets.
    pub titles: Vec<RealizedTitle>,
}

#[derive(Debug, Serialize, Tabled)]
struct Row {
    #[tabled(rename = "Title")]
    id: String,
    #[tabled(rename = "Payer")]
    payer: String,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Predicted")]
    predicted: String,
    #[tabled(rename = "Realized")]
    realized: String,
    #[tabled(rename = "Diff")]
    diff: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&ComparisonRow> for Row {
    fn from(row: &ComparisonRow) -> Self {
        Self {
            id: row.title_id.clone(),
            payer: row.payer.clone(),
            gross: money(row.gross_value),
            predicted: money(row.predicted_net),
            realized: money(row.realized_net),
            diff: money(row.diff),
            status: row.status.to_string(),
        }
    }
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, ctx: &Context) -> Result<()> {
    let mut input: ComparisonInput = load_input(&args.input)?;
    if let Some(ref date) = args.date {
        input.operation_date = Some(parse_date(date)?);
    }
    if input.operation_date.is_none() {
        input.operation_date = Some(Date::today());
    }

    let storage = ctx.open_storage()?;
    let explicit = args.institution.as_deref().or(input.institution.as_deref());
    let institution = ctx.resolve_institution(storage.as_ref(), explicit)?;

    let comparison = compare(&input.titles, input.operation_date, &institution);
    render(&comparison, ctx.format)
}

fn render(comparison: &Comparison, format: OutputFormat) -> Result<()> {
    let rows: Vec<Row> = comparison.rows.iter().map(Row::from).collect();
    let overall = comparison.overall_status();

    match format {
        OutputFormat::Table => {
            print_header("Reconciliation");
            print_output(&rows, format)?;

            let totals = comparison.totals;
            print_header("Totals");
            print_output(
                &[
                    KeyValue::from_money("Gross", totals.gross),
                    KeyValue::from_money("Predicted", totals.predicted),
                    KeyValue::from_money("Realized", totals.realized),
                    KeyValue::from_money("Diff", totals.diff),
                    KeyValue::new(
                        "Reconciled",
                        format!(
                            "{} of {}",
                            comparison.count(ReconciliationStatus::Reconciled),
                            comparison.rows.len()
                        ),
                    ),
                ],
                format,
            )?;

            let label = overall.to_string();
            let styled = match overall {
                ReconciliationStatus::Reconciled => label.green(),
                ReconciliationStatus::Unfavorable => label.red(),
                ReconciliationStatus::Favorable => label.yellow(),
                ReconciliationStatus::Pending => label.dimmed(),
            };
            println!("\nOverall: {styled}");
        }
        OutputFormat::Json => print_json(comparison)?,
        OutputFormat::Csv => print_output(&rows, format)?,
        OutputFormat::Minimal => println!("{overall}"),
    }
    Ok(())
}
