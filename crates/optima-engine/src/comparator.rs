//! Reconciliation of predicted nets against realized settlements.
//!
//! Reprices each title with the discount calculator and diffs the prediction
//! against the net the institution actually credited. Repurchases and extra
//! fees are not part of the comparison.

use std::fmt;

use optima_core::types::{lenient_date, Date, FinancialInstitution, Title};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::discount::compute_titles;

/// Differences strictly below this magnitude count as reconciled.
pub const RECONCILIATION_TOLERANCE: Decimal = dec!(0.05);

/// A title paired with the net actually credited for it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizedTitle {
    /// The title as offered.
    #[serde(flatten)]
    pub title: Title,
    /// Net credited by the institution; zero or less means not observed yet.
    #[serde(default)]
    pub realized_net: Decimal,
}

impl RealizedTitle {
    /// Pairs a title with its realized net.
    #[must_use]
    pub fn new(title: Title, realized_net: Decimal) -> Self {
        Self {
            title,
            realized_net,
        }
    }
}

/// Reconciliation status of one title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconciliationStatus {
    /// No realized value yet, or the title is not computable.
    Pending,
    /// Realized and predicted agree within the tolerance.
    Reconciled,
    /// Realized is lower than predicted.
    Unfavorable,
    /// Realized is higher than predicted.
    Favorable,
}

impl ReconciliationStatus {
    /// Classifies a difference `realized − predicted`.
    ///
    /// Exactly ±0.05 is a divergence.
    #[must_use]
    pub fn classify(realized_net: Decimal, diff: Decimal) -> Self {
        if realized_net <= Decimal::ZERO {
            Self::Pending
        } else if diff.abs() < RECONCILIATION_TOLERANCE {
            Self::Reconciled
        } else if diff < Decimal::ZERO {
            Self::Unfavorable
        } else {
            Self::Favorable
        }
    }
}

impl fmt::Display for ReconciliationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Reconciled => "reconciled",
            Self::Unfavorable => "divergent (-)",
            Self::Favorable => "divergent (+)",
        };
        f.write_str(label)
    }
}

/// One compared title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    /// Echo of the title id.
    pub title_id: String,
    /// Echo of the payer.
    pub payer: String,
    /// Echo of the invoice number.
    pub invoice_number: String,
    /// Echo of the due date.
    #[serde(with = "lenient_date")]
    pub due_date: Option<Date>,
    /// Face value.
    pub gross_value: Decimal,
    /// Net predicted by the discount calculator.
    pub predicted_net: Decimal,
    /// Net actually credited.
    pub realized_net: Decimal,
    /// `realized − predicted`, zero when nothing was realized.
    pub diff: Decimal,
    /// Classification of `diff`.
    pub status: ReconciliationStatus,
}

/// Column sums of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparisonTotals {
    /// Sum of face values.
    pub gross: Decimal,
    /// Sum of predicted nets.
    pub predicted: Decimal,
    /// Sum of positive realized nets.
    pub realized: Decimal,
    /// Sum of per-title differences.
    pub diff: Decimal,
}

/// Result of comparing a title set against realized settlements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Per-title rows in input order.
    pub rows: Vec<ComparisonRow>,
    /// Column sums.
    pub totals: ComparisonTotals,
}

impl Comparison {
    /// Classification of the aggregate difference.
    #[must_use]
    pub fn overall_status(&self) -> ReconciliationStatus {
        ReconciliationStatus::classify(self.totals.realized, self.totals.diff)
    }

    /// Number of rows with the given status.
    #[must_use]
    pub fn count(&self, status: ReconciliationStatus) -> usize {
        self.rows.iter().filter(|r| r.status == status).count()
    }
}

/// Compares predicted and realized nets title by title.
#[must_use]
pub fn compare(
    titles: &[RealizedTitle],
    operation_date: Option<Date>,
    institution: &FinancialInstitution,
) -> Comparison {
    let plain: Vec<Title> = titles.iter().map(|t| t.title.clone()).collect();
    let results = compute_titles(&plain, operation_date, institution);

    let rows: Vec<ComparisonRow> = titles
        .iter()
        .zip(results)
        .map(|(realized, result)| {
            let computed = result.is_computed();
            let diff = if computed && realized.realized_net > Decimal::ZERO {
                realized.realized_net - result.net_value
            } else {
                Decimal::ZERO
            };
            let status = if computed {
                ReconciliationStatus::classify(realized.realized_net, diff)
            } else {
                ReconciliationStatus::Pending
            };

            ComparisonRow {
                title_id: result.title_id,
                payer: result.payer,
                invoice_number: result.invoice_number,
                due_date: result.due_date,
                gross_value: result.gross_value,
                predicted_net: result.net_value,
                realized_net: realized.realized_net,
                diff,
                status,
            }
        })
        .collect();

    let totals = rows.iter().fold(ComparisonTotals::default(), |mut acc, row| {
        acc.gross += row.gross_value;
        acc.predicted += row.predicted_net;
        acc.realized += row.realized_net.max(Decimal::ZERO);
        acc.diff += row.diff;
        acc
    });

    Comparison { rows, totals }
}
