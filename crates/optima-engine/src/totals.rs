//! Aggregate totals reducer.

use optima_core::types::{CalculationResult, Totals};

/// Sums per-title results into operation-level totals.
///
/// Accumulates left to right so repeated runs are bit-identical. An empty
/// slice yields all-zero totals.
#[must_use]
pub fn aggregate(results: &[CalculationResult]) -> Totals {
    results.iter().fold(Totals::default(), |mut acc, r| {
        acc.gross += r.gross_value;
        acc.net += r.net_value;
        acc.discount += r.discount_value;
        acc.ad_valorem += r.ad_valorem_value;
        acc.iof += r.iof_value;
        acc.ticket += r.ticket_fee_value;
        acc.serasa += r.serasa_fee_value;
        acc.signature += r.signature_fee_value;
        acc
    })
}
