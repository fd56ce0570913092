//! Settle command implementation.
//!
//! Projects when funds for a due date actually settle.

use anyhow::Result;
use clap::Args;
use optima_core::calendars::{Calendar, NationalCalendar};
use optima_engine::discount::calendar_span;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, Context};
use crate::output::{print_header, print_json, print_output, KeyValue};

/// Arguments for the settle command.
#[derive(Args, Debug)]
pub struct SettleArgs {
    /// Due date (YYYY-MM-DD)
    #[arg(short, long)]
    pub due: String,

    /// Business days of settlement float
    #[arg(long, default_value = "0")]
    pub float: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Settlement {
    due_date: String,
    due_is_business_day: bool,
    working_days_float: u32,
    settlement_date: String,
    days_added: i64,
}

/// Execute the settle command.
pub fn execute(args: SettleArgs, ctx: &Context) -> Result<()> {
    let due = parse_date(&args.due)?;
    let (start, end) = calendar_span(due, args.float);
    let calendar = NationalCalendar::cached(start, end);
    let settlement = calendar.project_settlement(due, args.float);

    let result = Settlement {
        due_date: due.to_string(),
        due_is_business_day: calendar.is_business_day(due),
        working_days_float: args.float,
        settlement_date: settlement.to_string(),
        days_added: due.days_between(&settlement),
    };

    match ctx.format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Minimal => println!("{}", result.settlement_date),
        OutputFormat::Table | OutputFormat::Csv => {
            let rows = vec![
                KeyValue::new("Due Date", result.due_date.clone()),
                KeyValue::new(
                    "Due Is Business Day",
                    if result.due_is_business_day { "yes" } else { "no" },
                ),
                KeyValue::new("Float", result.working_days_float.to_string()),
                KeyValue::new("Settlement Date", result.settlement_date.clone()),
                KeyValue::new("Days Added", result.days_added.to_string()),
            ];
            if ctx.format == OutputFormat::Table {
                print_header("Settlement Projection");
            }
            print_output(&rows, ctx.format)?;
        }
    }
    Ok(())
}
