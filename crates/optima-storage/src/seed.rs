//! Sample data returned before anything has been saved.

use optima_core::types::FinancialInstitution;
use rust_decimal_macros::dec;

/// Id of the sample institution.
pub const DEFAULT_INSTITUTION_ID: &str = "default-1";

/// The sample profile served when no institution list has ever been saved.
#[must_use]
pub fn default_institution() -> FinancialInstitution {
    FinancialInstitution {
        monthly_rate: dec!(2.5),
        ad_valorem: dec!(0.5),
        tac: dec!(50),
        iof_daily: dec!(0.0041),
        iof_fixed: dec!(0.38),
        repurchase_rate: dec!(3.0),
        repurchase_penalty: dec!(2.0),
        repurchase_mora: dec!(1.0),
        ticket_fee: dec!(5.0),
        transfer_fee: dec!(10.0),
        serasa_fee: dec!(12.50),
        signature_fee: dec!(3.50),
        min_days: 15,
        working_days_float: 0,
        observations: "Taxas padrão conforme contrato firmado em Janeiro/2024. Prazo de liquidação D+1."
            .to_string(),
        ..FinancialInstitution::new(DEFAULT_INSTITUTION_ID, "Banco Exemplo S.A.")
    }
}

/// Institutions served by a store that has never saved a list.
#[must_use]
pub fn default_institutions() -> Vec<FinancialInstitution> {
    vec![default_institution()]
}
