//! Operation assembler.
//!
//! Combines per-title totals, repurchases, the institution's fixed fees and
//! manual extra fees into the final net credit, then shapes the result into
//! a persistable [`Operation`].

use chrono::{DateTime, Utc};
use optima_core::types::{
    lenient_date, CalculationResult, Date, DiscountMethod, ExtraFee, FinancialInstitution,
    Operation, OperationDetails, Title, Totals, OPERATION_DETAILS_VERSION,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::discount::compute_titles;
use crate::error::{EngineError, EngineResult};
use crate::repurchase::{summarize_repurchases, RepurchaseSummary};
use crate::totals::aggregate;

/// Everything a simulation needs besides the institution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationInput {
    /// Operation (reference) date.
    #[serde(with = "lenient_date")]
    pub operation_date: Option<Date>,
    /// Institution id or name, resolved by the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Titles offered for advance.
    pub titles: Vec<Title>,
    /// Overdue titles being bought back.
    pub repurchases: Vec<Title>,
    /// Manual deductions.
    pub extra_fees: Vec<ExtraFee>,
}

impl SimulationInput {
    /// Creates an input for the given operation date.
    #[must_use]
    pub fn new(operation_date: Date) -> Self {
        Self {
            operation_date: Some(operation_date),
            ..Self::default()
        }
    }

    /// Adds a title.
    pub fn with_title(mut self, title: Title) -> Self {
        self.titles.push(title);
        self
    }

    /// Adds a repurchase.
    pub fn with_repurchase(mut self, title: Title) -> Self {
        self.repurchases.push(title);
        self
    }

    /// Adds an extra fee.
    pub fn with_extra_fee(mut self, fee: ExtraFee) -> Self {
        self.extra_fees.push(fee);
        self
    }
}

/// A fully computed, not yet saved simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulation {
    /// Operation (reference) date.
    #[serde(with = "lenient_date")]
    pub operation_date: Option<Date>,
    /// Institution name snapshot.
    pub institution_name: String,
    /// Per-title results in input order.
    pub results: Vec<CalculationResult>,
    /// Totals across titles.
    pub totals: Totals,
    /// Repurchases and their aggregate.
    pub repurchase: RepurchaseSummary,
    /// TAC plus transfer fee.
    pub fixed_fees: Decimal,
    /// Manual deductions.
    pub extra_fees: Vec<ExtraFee>,
    /// Sum of manual deductions.
    pub extra_fees_total: Decimal,
    /// `totals.net − fixed_fees − repurchase.grand_total − extra_fees_total`.
    pub final_net: Decimal,
    /// Number of titles, including those not yet computable.
    pub titles_count: usize,
    /// Settlement float applied.
    pub working_days_float: u32,
    /// Discount formula applied.
    pub discount_method: DiscountMethod,
}

/// Computes a full simulation against one institution.
///
/// Nothing is persisted; the result is assembled entirely in memory.
#[must_use]
pub fn assemble(input: &SimulationInput, institution: &FinancialInstitution) -> Simulation {
    let results = compute_titles(&input.titles, input.operation_date, institution);
    let totals = aggregate(&results);
    let repurchase = summarize_repurchases(&input.repurchases, input.operation_date, institution);
    let fixed_fees = institution.fixed_fees();
    let extra_fees_total = input.extra_fees.iter().map(|f| f.value).sum::<Decimal>();
    let final_net = totals.net - fixed_fees - repurchase.grand_total - extra_fees_total;

    log::debug!(
        "assembled simulation: {} titles, {} repurchases, final net {}",
        input.titles.len(),
        repurchase.items.len(),
        final_net
    );

    Simulation {
        operation_date: input.operation_date,
        institution_name: institution.name.clone(),
        results,
        totals,
        repurchase,
        fixed_fees,
        extra_fees: input.extra_fees.clone(),
        extra_fees_total,
        final_net,
        titles_count: input.titles.len(),
        working_days_float: institution.working_days_float,
        discount_method: institution.discount_method,
    }
}

impl Simulation {
    /// Returns true if the business guard allows saving (`final_net > 0`).
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.final_net > Decimal::ZERO
    }

    /// Total deducted from gross: `totals.gross − final_net`.
    #[must_use]
    pub fn discount_total(&self) -> Decimal {
        self.totals.gross - self.final_net
    }

    /// Converts the simulation into a saved-operation record with a fresh
    /// id and the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NonPositiveNet` when `final_net <= 0`.
    pub fn into_operation(self) -> EngineResult<Operation> {
        self.into_operation_at(uuid::Uuid::new_v4().to_string(), Utc::now())
    }

    /// Converts the simulation into an operation with an explicit id and
    /// creation time.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NonPositiveNet` when `final_net <= 0`, and
    /// `EngineError::InvalidInput` when the id is blank.
    pub fn into_operation_at(
        self,
        id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> EngineResult<Operation> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EngineError::invalid_input("operation id must not be blank"));
        }
        if !self.can_save() {
            log::warn!(
                "rejected save for '{}': final net {} is not positive",
                self.institution_name,
                self.final_net
            );
            return Err(EngineError::NonPositiveNet {
                final_net: self.final_net,
            });
        }

        let discount_total = self.discount_total();
        Ok(Operation {
            id,
            date: created_at,
            reference_date: self.operation_date,
            institution_name: self.institution_name,
            gross_total: self.totals.gross,
            net_total: self.final_net,
            discount_total,
            titles_count: self.titles_count,
            details: OperationDetails {
                version: OPERATION_DETAILS_VERSION,
                results: self.results,
                repurchase_items: self.repurchase.items,
                repurchase_total: self.repurchase.grand_total,
                fixed_fees: self.fixed_fees,
                extra_fees: self.extra_fees,
                extra_fees_total: self.extra_fees_total,
                totals: self.totals,
                working_days_float: self.working_days_float,
                discount_method: self.discount_method,
            },
        })
    }
}
