//! Holidays command implementation.

use anyhow::Result;
use clap::Args;
use optima_core::calendars::named_holidays_for_year;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_output};

/// Arguments for the holidays command.
#[derive(Args, Debug)]
pub struct HolidaysArgs {
    /// First year
    #[arg(short, long)]
    pub year: i32,

    /// Last year (inclusive), defaults to the first
    #[arg(long)]
    pub to: Option<i32>,
}

#[derive(Debug, Serialize, Tabled)]
struct HolidayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Weekday")]
    weekday: String,
    #[tabled(rename = "Holiday")]
    name: String,
}

/// Execute the holidays command.
pub fn execute(args: HolidaysArgs, ctx: &Context) -> Result<()> {
    let end = args.to.unwrap_or(args.year);
    let (start, end) = if end < args.year {
        (end, args.year)
    } else {
        (args.year, end)
    };

    let rows: Vec<HolidayRow> = (start..=end)
        .flat_map(named_holidays_for_year)
        .map(|(date, name)| HolidayRow {
            date: date.to_string(),
            weekday: date.weekday().to_string(),
            name: name.to_string(),
        })
        .collect();

    match ctx.format {
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", row.date);
            }
        }
        _ => {
            if ctx.format == OutputFormat::Table {
                print_header(&format!("National Holidays {start}-{end}"));
            }
            print_output(&rows, ctx.format)?;
        }
    }
    Ok(())
}
