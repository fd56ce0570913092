//! Calculation outputs: per-title results, totals and repurchase items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::date::{lenient_date, Date};

/// Per-title advance economics.
///
/// For computed titles,
/// `netValue = grossValue − (discount + adValorem + iof + ticket + serasa + signature)`.
/// A title that is not yet computable keeps its identity and gross value.
/// Every other field is zero, and `settlement_date` is `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationResult {
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
    /// Value credited after per-title deductions.
    pub net_value: Decimal,
    /// Interest discount (deságio).
    pub discount_value: Decimal,
    /// Ad valorem fee.
    pub ad_valorem_value: Decimal,
    /// IOF tax (fixed plus daily component).
    pub iof_value: Decimal,
    /// Boleto issuance fee.
    pub ticket_fee_value: Decimal,
    /// Credit bureau fee.
    pub serasa_fee_value: Decimal,
    /// E-signature fee.
    pub signature_fee_value: Decimal,
    /// Calendar days from operation date to due date, floored at zero.
    ///
    /// Display only; no fee is computed from it.
    pub days: i64,
    /// Days actually charged after settlement projection and the minimum floor.
    pub calculation_days: i64,
    /// Projected settlement date, `None` for titles that are not computable.
    #[serde(with = "lenient_date")]
    pub settlement_date: Option<Date>,
}

impl CalculationResult {
    /// Returns true if the title had valid inputs and was priced.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.settlement_date.is_some()
    }

    /// Sum of every per-title deduction.
    #[must_use]
    pub fn total_deductions(&self) -> Decimal {
        self.discount_value
            + self.ad_valorem_value
            + self.iof_value
            + self.ticket_fee_value
            + self.serasa_fee_value
            + self.signature_fee_value
    }
}

/// Operation-level sums across all per-title results.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Totals {
    /// Sum of gross values.
    pub gross: Decimal,
    /// Sum of net values.
    pub net: Decimal,
    /// Sum of discounts.
    pub discount: Decimal,
    /// Sum of ad valorem fees.
    #[serde(rename = "advalorem")]
    pub ad_valorem: Decimal,
    /// Sum of IOF.
    pub iof: Decimal,
    /// Sum of boleto fees.
    pub ticket: Decimal,
    /// Sum of credit bureau fees.
    pub serasa: Decimal,
    /// Sum of e-signature fees.
    pub signature: Decimal,
}

/// An overdue title being bought back, with its late charges.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepurchaseItem {
    /// Echo of the title id.
    pub id: String,
    /// Echo of the payer.
    pub payer: String,
    /// Echo of the invoice number.
    pub invoice_number: String,
    /// Original due date.
    #[serde(with = "lenient_date")]
    pub due_date: Option<Date>,
    /// Face value.
    pub value: Decimal,
    /// Whole days overdue as of the operation date, never negative.
    pub days_late: i64,
    /// Daily repurchase interest over the days late.
    pub interest_fee: Decimal,
    /// One-time penalty, charged only when at least one day late.
    pub penalty_fee: Decimal,
    /// Daily mora over the days late.
    pub mora_fee: Decimal,
    /// Interest, penalty and mora combined.
    #[serde(rename = "totalFeesPerItem")]
    pub total_fees: Decimal,
    /// Face value plus all charges.
    pub total: Decimal,
}
