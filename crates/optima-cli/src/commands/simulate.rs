//! Simulate command implementation.
//!
//! Prices a scenario file against one institution and optionally saves the
//! resulting operation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use optima_core::types::{CalculationResult, Date, RepurchaseItem};
use optima_engine::{assemble, EngineError, Simulation, SimulationInput};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{load_input, parse_date, Context};
use crate::error::CliError;
use crate::output::{money, percent, print_header, print_json, print_output, print_success, KeyValue};

/// Arguments for the simulate command.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Scenario file (.toml or .json)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Institution id or name, overriding the scenario file
    #[arg(long)]
    pub institution: Option<String>,

    /// Operation date (YYYY-MM-DD), overriding the scenario file
    #[arg(long)]
    pub date: Option<String>,

    /// Persist the operation to history
    #[arg(long)]
    pub save: bool,
}

/// One priced title.
#[derive(Debug, Serialize, Tabled)]
struct TitleRow {
    #[tabled(rename = "Title")]
    id: String,
    #[tabled(rename = "Payer")]
    payer: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Settles")]
    settles: String,
    #[tabled(rename = "Days")]
    days: String,
    #[tabled(rename = "Charged")]
    charged: String,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Discount")]
    discount: String,
    #[tabled(rename = "Ad Valorem")]
    ad_valorem: String,
    #[tabled(rename = "IOF")]
    iof: String,
    #[tabled(rename = "Fees")]
    fees: String,
    #[tabled(rename = "Net")]
    net: String,
}

impl From<&CalculationResult> for TitleRow {
    fn from(r: &CalculationResult) -> Self {
        let date = |d: Option<Date>| d.map_or_else(|| "-".to_string(), |d| d.to_string());
        Self {
            id: r.title_id.clone(),
            payer: r.payer.clone(),
            due: date(r.due_date),
            settles: date(r.settlement_date),
            days: r.days.to_string(),
            charged: r.calculation_days.to_string(),
            gross: money(r.gross_value),
            discount: money(r.discount_value),
            ad_valorem: money(r.ad_valorem_value),
            iof: money(r.iof_value),
            fees: money(r.ticket_fee_value + r.serasa_fee_value + r.signature_fee_value),
            net: money(r.net_value),
        }
    }
}

/// One repurchased title.
#[derive(Debug, Serialize, Tabled)]
struct RepurchaseRow {
    #[tabled(rename = "Title")]
    id: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Late")]
    days_late: i64,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Penalty")]
    penalty: String,
    #[tabled(rename = "Mora")]
    mora: String,
    #[tabled(rename = "Total")]
    total: String,
}

impl From<&RepurchaseItem> for RepurchaseRow {
    fn from(item: &RepurchaseItem) -> Self {
        Self {
            id: item.id.clone(),
            due: item.due_date.map_or_else(|| "-".to_string(), |d| d.to_string()),
            days_late: item.days_late,
            value: money(item.value),
            interest: money(item.interest_fee),
            penalty: money(item.penalty_fee),
            mora: money(item.mora_fee),
            total: money(item.total),
        }
    }
}

/// Execute the simulate command.
pub fn execute(args: SimulateArgs, ctx: &Context) -> Result<()> {
    let mut input: SimulationInput = load_input(&args.input)?;
    if let Some(ref date) = args.date {
        input.operation_date = Some(parse_date(date)?);
    }
    if input.operation_date.is_none() {
        tracing::debug!("no operation date given, using today");
        input.operation_date = Some(Date::today());
    }

    let storage = ctx.open_storage()?;
    let explicit = args.institution.as_deref().or(input.institution.as_deref());
    let institution = ctx.resolve_institution(storage.as_ref(), explicit)?;
    tracing::info!(
        "simulating {} titles against '{}'",
        input.titles.len(),
        institution.name
    );

    let simulation = assemble(&input, &institution);
    render(&simulation, ctx.format)?;

    if args.save {
        let operation = match simulation.into_operation() {
            Ok(operation) => operation,
            Err(EngineError::NonPositiveNet { final_net }) => {
                return Err(CliError::SaveRejected(final_net).into())
            }
            Err(e) => return Err(e.into()),
        };
        storage.save_operation(&operation)?;
        if ctx.format == OutputFormat::Table {
            print_success(&format!("Saved operation {}", operation.id));
        } else {
            eprintln!("saved operation {}", operation.id);
        }
    }

    Ok(())
}

fn summary(simulation: &Simulation) -> Vec<KeyValue> {
    let totals = &simulation.totals;
    let cost = if totals.gross.is_zero() {
        Decimal::ZERO
    } else {
        simulation.discount_total() / totals.gross * Decimal::ONE_HUNDRED
    };

    let mut rows = vec![
        KeyValue::new("Institution", simulation.institution_name.clone()),
        KeyValue::new(
            "Operation Date",
            simulation
                .operation_date
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
        ),
        KeyValue::new("Titles", simulation.titles_count.to_string()),
        KeyValue::from_money("Gross", totals.gross),
        KeyValue::from_money("Discount", totals.discount),
        KeyValue::from_money("Ad Valorem", totals.ad_valorem),
        KeyValue::from_money("IOF", totals.iof),
        KeyValue::from_money("Per-Title Fees", totals.ticket + totals.serasa + totals.signature),
        KeyValue::from_money("Net of Titles", totals.net),
        KeyValue::from_money("Fixed Fees (TAC + Transfer)", simulation.fixed_fees),
    ];
    if !simulation.repurchase.is_empty() {
        rows.push(KeyValue::from_money("Repurchases", simulation.repurchase.grand_total));
    }
    if !simulation.extra_fees.is_empty() {
        rows.push(KeyValue::from_money("Extra Fees", simulation.extra_fees_total));
    }
    rows.push(KeyValue::from_money("Final Net", simulation.final_net));
    rows.push(KeyValue::new("Effective Cost", percent(cost)));
    rows
}

fn render(simulation: &Simulation, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let titles: Vec<TitleRow> = simulation.results.iter().map(TitleRow::from).collect();
            print_header("Titles");
            print_output(&titles, format)?;

            if !simulation.repurchase.is_empty() {
                let items: Vec<RepurchaseRow> = simulation
                    .repurchase
                    .items
                    .iter()
                    .map(RepurchaseRow::from)
                    .collect();
                print_header("Repurchases");
                print_output(&items, format)?;
            }

            print_header("Summary");
            print_output(&summary(simulation), format)?;
        }
        OutputFormat::Json => print_json(simulation)?,
        OutputFormat::Csv => {
            let titles: Vec<TitleRow> = simulation.results.iter().map(TitleRow::from).collect();
            print_output(&titles, format)?;
        }
        OutputFormat::Minimal => println!("{}", money(simulation.final_net)),
    }
    Ok(())
}
