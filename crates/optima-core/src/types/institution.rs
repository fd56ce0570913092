//! Financial institution fee profiles.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{OptimaError, OptimaResult};

/// Days per month used to turn monthly percentage rates into daily rates.
///
/// Every monthly rate in the engine is divided by a flat 30, never by the
/// actual length of the month.
pub const DAYS_PER_MONTH: Decimal = dec!(30);

/// Regulatory fixed IOF rate (%) pre-filled for new profiles.
pub const DEFAULT_IOF_FIXED: Decimal = dec!(0.38);

/// Largest settlement float a profile may declare, in business days.
pub const MAX_WORKING_DAYS_FLOAT: u32 = 3650;

/// Regulatory daily IOF rate (%) pre-filled for new profiles.
pub const DEFAULT_IOF_DAILY: Decimal = dec!(0.0041);

/// How the interest discount accrues over the calculation days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountMethod {
    /// Simple accrual: `value × dailyRate × days`.
    #[default]
    Linear,
    /// Compound discounting: `value × (1 − (1 + dailyRate)^−days)`.
    Compound,
}

impl fmt::Display for DiscountMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountMethod::Linear => write!(f, "linear"),
            DiscountMethod::Compound => write!(f, "compound"),
        }
    }
}

impl std::str::FromStr for DiscountMethod {
    type Err = OptimaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" | "simple" => Ok(DiscountMethod::Linear),
            "compound" => Ok(DiscountMethod::Compound),
            other => Err(OptimaError::invalid_institution(
                "discountMethod",
                format!("unknown method '{other}', use linear or compound"),
            )),
        }
    }
}

/// A lending institution's fee schedule.
///
/// All rates are percentages (`2.5` means 2.5%). Monthly rates are converted
/// to daily rates by dividing by [`DAYS_PER_MONTH`]. Missing fields in stored
/// records default to zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialInstitution {
    /// Opaque identifier.
    pub id: String,
    /// Display name, snapshotted into saved operations.
    pub name: String,
    /// Monthly discount rate (%).
    pub monthly_rate: Decimal,
    /// Ad valorem rate (%) over face value.
    pub ad_valorem: Decimal,
    /// Flat origination fee per operation (TAC).
    pub tac: Decimal,
    /// Daily IOF rate (%).
    pub iof_daily: Decimal,
    /// Fixed IOF rate (%).
    pub iof_fixed: Decimal,
    /// Monthly repurchase interest rate (%).
    pub repurchase_rate: Decimal,
    /// One-time repurchase penalty rate (%).
    pub repurchase_penalty: Decimal,
    /// Monthly repurchase mora rate (%).
    pub repurchase_mora: Decimal,
    /// Boleto issuance fee per title.
    pub ticket_fee: Decimal,
    /// Transfer fee per operation.
    pub transfer_fee: Decimal,
    /// Credit bureau query fee per title.
    pub serasa_fee: Decimal,
    /// E-signature fee per title.
    pub signature_fee: Decimal,
    /// Minimum chargeable days.
    pub min_days: u32,
    /// Business days added after the due date before funds settle.
    pub working_days_float: u32,
    /// Free-text notes.
    pub observations: String,
    /// Discount accrual formula.
    pub discount_method: DiscountMethod,
}

impl FinancialInstitution {
    /// Creates a profile with zero fees and the regulatory IOF rates.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            iof_daily: DEFAULT_IOF_DAILY,
            iof_fixed: DEFAULT_IOF_FIXED,
            ..Self::default()
        }
    }

    /// Daily discount rate as a fraction: `monthlyRate / 100 / 30`.
    #[must_use]
    pub fn daily_discount_rate(&self) -> Decimal {
        self.monthly_rate / Decimal::ONE_HUNDRED / DAYS_PER_MONTH
    }

    /// Daily repurchase interest rate as a fraction.
    #[must_use]
    pub fn daily_repurchase_rate(&self) -> Decimal {
        self.repurchase_rate / Decimal::ONE_HUNDRED / DAYS_PER_MONTH
    }

    /// Daily mora rate as a fraction.
    #[must_use]
    pub fn daily_mora_rate(&self) -> Decimal {
        self.repurchase_mora / Decimal::ONE_HUNDRED / DAYS_PER_MONTH
    }

    /// Flat fees charged once per title.
    #[must_use]
    pub fn per_title_fees(&self) -> Decimal {
        self.ticket_fee + self.serasa_fee + self.signature_fee
    }

    /// Flat fees charged once per operation (TAC plus transfer).
    #[must_use]
    pub fn fixed_fees(&self) -> Decimal {
        self.tac + self.transfer_fee
    }

    /// Checks the profile invariants.
    ///
    /// The name must be non-blank, every rate or fee non-negative, and the
    /// float at most [`MAX_WORKING_DAYS_FLOAT`].
    pub fn validate(&self) -> OptimaResult<()> {
        if self.name.trim().is_empty() {
            return Err(OptimaError::invalid_institution("name", "must not be empty"));
        }
        if self.working_days_float > MAX_WORKING_DAYS_FLOAT {
            return Err(OptimaError::invalid_institution(
                "workingDaysFloat",
                format!("must be at most {MAX_WORKING_DAYS_FLOAT} business days"),
            ));
        }

        let amounts = [
            ("monthlyRate", self.monthly_rate),
            ("adValorem", self.ad_valorem),
            ("tac", self.tac),
            ("iofDaily", self.iof_daily),
            ("iofFixed", self.iof_fixed),
            ("repurchaseRate", self.repurchase_rate),
            ("repurchasePenalty", self.repurchase_penalty),
            ("repurchaseMora", self.repurchase_mora),
            ("ticketFee", self.ticket_fee),
            ("transferFee", self.transfer_fee),
            ("serasaFee", self.serasa_fee),
            ("signatureFee", self.signature_fee),
        ];

        for (field, value) in amounts {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(OptimaError::NegativeValue {
                    field: field.to_string(),
                    value,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_prefills_iof() {
        let inst = FinancialInstitution::new("b1", "Banco Um");
        assert_eq!(inst.iof_fixed, dec!(0.38));
        assert_eq!(inst.iof_daily, dec!(0.0041));
        assert_eq!(inst.monthly_rate, Decimal::ZERO);
        assert_eq!(inst.discount_method, DiscountMethod::Linear);
    }

    #[test]
    fn test_daily_rates() {
        let inst = FinancialInstitution {
            monthly_rate: dec!(3),
            repurchase_rate: dec!(3),
            repurchase_mora: dec!(1.5),
            ..FinancialInstitution::new("b1", "Banco Um")
        };
        assert_eq!(inst.daily_discount_rate(), dec!(0.001));
        assert_eq!(inst.daily_repurchase_rate(), dec!(0.001));
        assert_eq!(inst.daily_mora_rate(), dec!(0.0005));
    }

    #[test]
    fn test_fee_groups() {
        let inst = FinancialInstitution {
            tac: dec!(50),
            transfer_fee: dec!(10),
            ticket_fee: dec!(5),
            serasa_fee: dec!(12.5),
            signature_fee: dec!(3.5),
            ..FinancialInstitution::new("b1", "Banco Um")
        };
        assert_eq!(inst.fixed_fees(), dec!(60));
        assert_eq!(inst.per_title_fees(), dec!(21));
    }

    #[test]
    fn test_validate() {
        let inst = FinancialInstitution::new("b1", "Banco Um");
        assert!(inst.validate().is_ok());

        let blank = FinancialInstitution::new("b1", "  ");
        assert!(matches!(
            blank.validate(),
            Err(OptimaError::InvalidInstitution { .. })
        ));

        let negative = FinancialInstitution {
            serasa_fee: dec!(-1),
            ..FinancialInstitution::new("b1", "Banco Um")
        };
        match negative.validate() {
            Err(OptimaError::NegativeValue { field, .. }) => assert_eq!(field, "serasaFee"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_validate_float_cap() {
        let at_cap = FinancialInstitution {
            working_days_float: MAX_WORKING_DAYS_FLOAT,
            ..FinancialInstitution::new("b1", "Banco Um")
        };
        assert!(at_cap.validate().is_ok());

        let huge = FinancialInstitution {
            working_days_float: u32::MAX,
            ..FinancialInstitution::new("b1", "Banco Um")
        };
        match huge.validate() {
            Err(OptimaError::InvalidInstitution { field, .. }) => {
                assert_eq!(field, "workingDaysFloat");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_discount_method_parse() {
        assert_eq!("Linear".parse::<DiscountMethod>().unwrap(), DiscountMethod::Linear);
        assert_eq!("compound".parse::<DiscountMethod>().unwrap(), DiscountMethod::Compound);
        assert!("annuity".parse::<DiscountMethod>().is_err());
    }

    #[test]
    fn test_deserialize_legacy_record() {
        // Older records predate the float, penalty and mora fields
        let json = r#"{
            "id": "default-1",
            "name": "Banco Exemplo S.A.",
            "monthlyRate": 2.5,
            "adValorem": 0.5,
            "tac": 50,
            "iofDaily": 0.0041,
            "iofFixed": 0.38,
            "repurchaseRate": 3.0,
            "ticketFee": 5.0,
            "transferFee": 10.0,
            "minDays": 15
        }"#;
        let inst: FinancialInstitution = serde_json::from_str(json).unwrap();
        assert_eq!(inst.monthly_rate, dec!(2.5));
        assert_eq!(inst.min_days, 15);
        assert_eq!(inst.working_days_float, 0);
        assert_eq!(inst.repurchase_penalty, Decimal::ZERO);
        assert_eq!(inst.discount_method, DiscountMethod::Linear);
    }
}
