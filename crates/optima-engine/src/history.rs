//! Dashboard statistics over saved operations.

use optima_core::types::Operation;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Volume and cost statistics across operation history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    /// Institution filter applied, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Number of operations counted.
    pub operations: usize,
    /// Sum of gross totals.
    pub gross_volume: Decimal,
    /// Sum of final nets.
    pub net_volume: Decimal,
    /// Net volume per operation, zero when there are none.
    pub average_net: Decimal,
    /// `(gross − net) / gross × 100`, zero when gross is zero.
    pub average_cost_pct: Decimal,
}

impl HistorySummary {
    /// Summarizes operations, optionally keeping only one institution.
    ///
    /// The filter matches the snapshotted institution name exactly.
    #[must_use]
    pub fn from_operations(operations: &[Operation], institution: Option<&str>) -> Self {
        let selected = operations
            .iter()
            .filter(|op| institution.map_or(true, |name| op.institution_name == name));

        let (count, gross, net) = selected.fold(
            (0usize, Decimal::ZERO, Decimal::ZERO),
            |(count, gross, net), op| (count + 1, gross + op.gross_total, net + op.net_total),
        );

        let average_net = if count == 0 {
            Decimal::ZERO
        } else {
            net / Decimal::from(count)
        };
        let average_cost_pct = if gross.is_zero() {
            Decimal::ZERO
        } else {
            (gross - net) / gross * Decimal::ONE_HUNDRED
        };

        Self {
            institution: institution.map(str::to_string),
            operations: count,
            gross_volume: gross,
            net_volume: net,
            average_net,
            average_cost_pct,
        }
    }
}
