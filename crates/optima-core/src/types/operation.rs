//! Persisted operations and their typed details payload.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::date::{lenient_date, Date};
use super::institution::DiscountMethod;
use super::results::{CalculationResult, RepurchaseItem, Totals};

/// Current layout version of [`OperationDetails`].
pub const OPERATION_DETAILS_VERSION: u32 = 1;

/// A manually entered deduction with no computed semantics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtraFee {
    /// Identifier within the simulation.
    pub id: String,
    /// Free-text description.
    pub description: String,
    /// Amount deducted from the final net.
    pub value: Decimal,
}

impl ExtraFee {
    /// Creates an extra fee.
    pub fn new(description: impl Into<String>, value: Decimal) -> Self {
        Self {
            id: String::new(),
            description: description.into(),
            value,
        }
    }
}

/// Full breakdown stored with an operation.
///
/// Every figure is copied by value at save time, so later edits to the
/// institution profile never change a saved operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationDetails {
    /// Layout version, see [`OPERATION_DETAILS_VERSION`].
    pub version: u32,
    /// Per-title results.
    pub results: Vec<CalculationResult>,
    /// Repurchased titles with their charges.
    pub repurchase_items: Vec<RepurchaseItem>,
    /// Grand total of all repurchases.
    pub repurchase_total: Decimal,
    /// TAC plus transfer fee.
    pub fixed_fees: Decimal,
    /// Manual deductions.
    pub extra_fees: Vec<ExtraFee>,
    /// Sum of manual deductions.
    pub extra_fees_total: Decimal,
    /// Aggregate totals across titles.
    pub totals: Totals,
    /// Settlement float in effect when the operation was computed.
    pub working_days_float: u32,
    /// Discount formula in effect when the operation was computed.
    pub discount_method: DiscountMethod,
}

impl Default for OperationDetails {
    fn default() -> Self {
        Self {
            version: OPERATION_DETAILS_VERSION,
            results: Vec::new(),
            repurchase_items: Vec::new(),
            repurchase_total: Decimal::ZERO,
            fixed_fees: Decimal::ZERO,
            extra_fees: Vec::new(),
            extra_fees_total: Decimal::ZERO,
            totals: Totals::default(),
            working_days_float: 0,
            discount_method: DiscountMethod::default(),
        }
    }
}

/// The immutable snapshot of one saved simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique identifier.
    pub id: String,
    /// Creation timestamp.
    pub date: DateTime<Utc>,
    /// User-chosen reference (operation) date.
    #[serde(with = "lenient_date", default)]
    pub reference_date: Option<Date>,
    /// Institution name at save time.
    pub institution_name: String,
    /// Sum of face values.
    pub gross_total: Decimal,
    /// Final net credited.
    pub net_total: Decimal,
    /// Gross minus final net.
    pub discount_total: Decimal,
    /// Number of titles in the simulation.
    pub titles_count: usize,
    /// Full breakdown.
    #[serde(default)]
    pub details: OperationDetails,
}

impl Operation {
    /// Effective cost of the operation as a percentage of gross.
    ///
    /// Zero when the gross total is zero.
    #[must_use]
    pub fn effective_cost_pct(&self) -> Decimal {
        if self.gross_total.is_zero() {
            return Decimal::ZERO;
        }
        self.discount_total / self.gross_total * Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_details_default_version() {
        let details = OperationDetails::default();
        assert_eq!(details.version, OPERATION_DETAILS_VERSION);
        assert!(details.results.is_empty());
    }

    #[test]
    fn test_deserialize_sparse_record() {
        // Early records only stored the headline figures
        let json = r#"{
            "id": "op-1",
            "date": "2025-03-03T12:00:00Z",
            "referenceDate": "2025-03-03",
            "institutionName": "Banco Exemplo S.A.",
            "grossTotal": 10000,
            "netTotal": 9500,
            "discountTotal": 500,
            "titlesCount": 2
        }"#;
        let op: Operation = serde_json::from_str(json).unwrap();
        assert_eq!(op.titles_count, 2);
        assert_eq!(op.reference_date, Date::from_ymd(2025, 3, 3).ok());
        assert_eq!(op.details.version, OPERATION_DETAILS_VERSION);
        assert_eq!(op.effective_cost_pct(), dec!(5));
    }
}
