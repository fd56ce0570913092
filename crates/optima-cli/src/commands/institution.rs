//! Institution command implementation.
//!
//! Lists, inspects, adds and removes fee profiles.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use optima_core::types::{DiscountMethod, FinancialInstitution};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{load_input, Context};
use crate::error::CliError;
use crate::output::{money, print_header, print_json, print_output, print_success, KeyValue};

/// Arguments for the institution command.
#[derive(Args, Debug)]
pub struct InstitutionArgs {
    #[command(subcommand)]
    pub command: InstitutionCommand,
}

/// Institution subcommands.
#[derive(Subcommand, Debug)]
pub enum InstitutionCommand {
    /// List registered institutions
    List,

    /// Show one institution's fee profile
    Show(ShowArgs),

    /// Add or replace an institution from a profile file
    Add(AddArgs),

    /// Remove an institution
    Remove(RemoveArgs),
}

/// Arguments for show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Institution id or name
    pub key: String,
}

/// Arguments for add subcommand.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Profile file (.toml or .json)
    #[arg(long)]
    pub file: PathBuf,

    /// Override the discount method in the file (linear, compound)
    #[arg(long)]
    pub method: Option<DiscountMethod>,
}

/// Arguments for remove subcommand.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Institution id
    pub id: String,
}

#[derive(Debug, Serialize, Tabled)]
struct InstitutionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Monthly %")]
    monthly_rate: String,
    #[tabled(rename = "Ad Valorem %")]
    ad_valorem: String,
    #[tabled(rename = "Min Days")]
    min_days: u32,
    #[tabled(rename = "Float")]
    float: u32,
    #[tabled(rename = "Method")]
    method: String,
}

impl From<&FinancialInstitution> for InstitutionRow {
    fn from(i: &FinancialInstitution) -> Self {
        Self {
            id: i.id.clone(),
            name: i.name.clone(),
            monthly_rate: i.monthly_rate.normalize().to_string(),
            ad_valorem: i.ad_valorem.normalize().to_string(),
            min_days: i.min_days,
            float: i.working_days_float,
            method: i.discount_method.to_string(),
        }
    }
}

/// Execute the institution command.
pub fn execute(args: InstitutionArgs, ctx: &Context) -> Result<()> {
    match args.command {
        InstitutionCommand::List => execute_list(ctx),
        InstitutionCommand::Show(show_args) => execute_show(show_args, ctx),
        InstitutionCommand::Add(add_args) => execute_add(add_args, ctx),
        InstitutionCommand::Remove(remove_args) => execute_remove(remove_args, ctx),
    }
}

fn execute_list(ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let institutions = storage.load_institutions()?;

    match ctx.format {
        OutputFormat::Json => print_json(&institutions)?,
        OutputFormat::Minimal => {
            for i in &institutions {
                println!("{}", i.id);
            }
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<InstitutionRow> = institutions.iter().map(InstitutionRow::from).collect();
            if ctx.format == OutputFormat::Table {
                print_header("Institutions");
            }
            print_output(&rows, ctx.format)?;
        }
    }
    Ok(())
}

fn execute_show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let institution = storage
        .find_institution(&args.key)?
        .ok_or_else(|| CliError::UnknownInstitution(args.key.clone()))?;

    match ctx.format {
        OutputFormat::Json => print_json(&institution)?,
        OutputFormat::Minimal => println!("{}", institution.id),
        OutputFormat::Table | OutputFormat::Csv => {
            let pct = |v: Decimal| format!("{}%", v.normalize());
            let rows = vec![
                KeyValue::new("ID", institution.id.clone()),
                KeyValue::new("Name", institution.name.clone()),
                KeyValue::new("Monthly Rate", pct(institution.monthly_rate)),
                KeyValue::new("Ad Valorem", pct(institution.ad_valorem)),
                KeyValue::new("IOF Fixed", pct(institution.iof_fixed)),
                KeyValue::new("IOF Daily", pct(institution.iof_daily)),
                KeyValue::from_money("TAC", institution.tac),
                KeyValue::from_money("Transfer Fee", institution.transfer_fee),
                KeyValue::from_money("Ticket Fee", institution.ticket_fee),
                KeyValue::from_money("Serasa Fee", institution.serasa_fee),
                KeyValue::from_money("Signature Fee", institution.signature_fee),
                KeyValue::new("Repurchase Rate", pct(institution.repurchase_rate)),
                KeyValue::new("Repurchase Penalty", pct(institution.repurchase_penalty)),
                KeyValue::new("Repurchase Mora", pct(institution.repurchase_mora)),
                KeyValue::new("Min Days", institution.min_days.to_string()),
                KeyValue::new("Settlement Float", institution.working_days_float.to_string()),
                KeyValue::new("Discount Method", institution.discount_method.to_string()),
                KeyValue::new("Observations", institution.observations.clone()),
            ];
            if ctx.format == OutputFormat::Table {
                print_header(&institution.name);
            }
            print_output(&rows, ctx.format)?;
        }
    }
    Ok(())
}

fn execute_add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut institution: FinancialInstitution = load_input(&args.file)?;
    if let Some(method) = args.method {
        institution.discount_method = method;
    }

    let storage = ctx.open_storage()?;
    let stored = storage.upsert_institution(institution)?;
    tracing::info!("stored institution {} ({})", stored.id, stored.name);

    match ctx.format {
        OutputFormat::Json => print_json(&stored)?,
        OutputFormat::Minimal | OutputFormat::Csv => println!("{}", stored.id),
        OutputFormat::Table => print_success(&format!(
            "Stored '{}' with id {} (fixed fees {})",
            stored.name,
            stored.id,
            money(stored.fixed_fees())
        )),
    }
    Ok(())
}

fn execute_remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    if !storage.delete_institution(&args.id)? {
        return Err(CliError::UnknownInstitution(args.id).into());
    }
    if ctx.format == OutputFormat::Table {
        print_success(&format!("Removed institution {}", args.id));
    }
    Ok(())
}
