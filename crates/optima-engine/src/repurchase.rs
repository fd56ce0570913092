//! Repurchase calculator for overdue titles.
//!
//! Late days run from the due date to the operation date. Interest and mora
//! accrue daily; the penalty is charged once, and only if the title is late.

use optima_core::types::{Date, FinancialInstitution, RepurchaseItem, Title};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Computes the late charges owed to buy back one title.
///
/// A missing due date or operation date counts as zero days late.
#[must_use]
pub fn compute_repurchase(
    title: &Title,
    operation_date: Option<Date>,
    institution: &FinancialInstitution,
) -> RepurchaseItem {
    let days_late = match (operation_date, title.due_date) {
        (Some(op), Some(due)) => due.days_between(&op).max(0),
        _ => 0,
    };

    let value = title.value;
    let late = Decimal::from(days_late);
    let interest_fee = value * institution.daily_repurchase_rate() * late;
    let penalty_fee = if days_late > 0 {
        value * institution.repurchase_penalty / Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    let mora_fee = value * institution.daily_mora_rate() * late;
    let total_fees = interest_fee + penalty_fee + mora_fee;

    RepurchaseItem {
        id: title.id.clone(),
        payer: title.payer.clone(),
        invoice_number: title.invoice_number.clone(),
        due_date: title.due_date,
        value,
        days_late,
        interest_fee,
        penalty_fee,
        mora_fee,
        total_fees,
        total: value + total_fees,
    }
}

/// Repurchase items with their aggregate figures.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepurchaseSummary {
    /// Individual items, in input order.
    pub items: Vec<RepurchaseItem>,
    /// Sum of face values.
    pub total_value: Decimal,
    /// Sum of interest, penalty and mora across items.
    pub total_fees: Decimal,
    /// `total_value + total_fees`, deducted from the operation's net.
    pub grand_total: Decimal,
}

impl RepurchaseSummary {
    /// Builds the summary from computed items.
    #[must_use]
    pub fn from_items(items: Vec<RepurchaseItem>) -> Self {
        let total_value = items.iter().map(|i| i.value).sum::<Decimal>();
        let total_fees = items.iter().map(|i| i.total_fees).sum::<Decimal>();
        Self {
            items,
            total_value,
            total_fees,
            grand_total: total_value + total_fees,
        }
    }

    /// Returns true if there is nothing to repurchase.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Computes every repurchase and its aggregate figures.
#[must_use]
pub fn summarize_repurchases(
    titles: &[Title],
    operation_date: Option<Date>,
    institution: &FinancialInstitution,
) -> RepurchaseSummary {
    RepurchaseSummary::from_items(
        titles
            .iter()
            .map(|t| compute_repurchase(t, operation_date, institution))
            .collect(),
    )
}
