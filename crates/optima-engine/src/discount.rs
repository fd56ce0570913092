//! Title discount calculator.
//!
//! Prices one receivable against an institution's fee schedule:
//! settlement projection, chargeable days, discount, ad valorem, IOF and the
//! per-title flat fees.

use optima_core::calendars::{Calendar, NationalCalendar};
use optima_core::types::{CalculationResult, Date, DiscountMethod, FinancialInstitution, Title};
use rust_decimal::{Decimal, MathematicalOps};

/// Daily IOF accrues for at most this many days.
pub const IOF_MAX_DAYS: i64 = 365;

/// Business days per year used to size the holiday span for large floats.
const BUSINESS_DAYS_PER_YEAR: u32 = 200;

/// Years of holidays a title due on `due` can touch during settlement.
///
/// Settlement never precedes the due date, so the span starts at the due
/// year. It extends one year for year-end rollovers, plus one more per
/// 200 business days of float.
#[must_use]
pub fn calendar_span(due: Date, working_days_float: u32) -> (i32, i32) {
    let extra = (working_days_float / BUSINESS_DAYS_PER_YEAR) as i32;
    (due.year(), due.year() + 1 + extra)
}

/// Computes the per-title economics with the national calendar.
///
/// Returns the zero-valued "not yet computable" result when the operation
/// date or due date is missing, or the value is not positive.
///
/// # Example
///
/// ```rust
/// use optima_core::types::{Date, FinancialInstitution, Title};
/// use optima_engine::compute_title;
/// use rust_decimal_macros::dec;
///
/// let inst = FinancialInstitution {
///     monthly_rate: dec!(3),
///     min_days: 10,
///     ..FinancialInstitution::new("b1", "Banco Um")
/// };
/// let op = Date::from_ymd(2025, 3, 5).ok();
/// let title = Title::new("1", dec!(1000), Date::from_ymd(2025, 3, 10).ok());
///
/// let result = compute_title(&title, op, &inst);
/// assert_eq!(result.days, 5);
/// assert_eq!(result.calculation_days, 10);
/// assert_eq!(result.discount_value, dec!(10));
/// ```
#[must_use]
pub fn compute_title(
    title: &Title,
    operation_date: Option<Date>,
    institution: &FinancialInstitution,
) -> CalculationResult {
    match (operation_date, title.computable_due_date()) {
        (Some(op), Some(due)) => {
            let (start, end) = calendar_span(due, institution.working_days_float);
            let calendar = NationalCalendar::cached(start, end);
            compute_title_with_calendar(title, op, institution, calendar.as_ref())
        }
        _ => not_computable(title),
    }
}

/// Computes the per-title economics against an explicit calendar.
///
/// The calendar must cover every year from the due date to settlement.
#[must_use]
pub fn compute_title_with_calendar<C: Calendar + ?Sized>(
    title: &Title,
    operation_date: Date,
    institution: &FinancialInstitution,
    calendar: &C,
) -> CalculationResult {
    let Some(due) = title.computable_due_date() else {
        return not_computable(title);
    };

    let actual_days = operation_date.days_between(&due).max(0);
    let settlement = calendar.project_settlement(due, institution.working_days_float);
    let elapsed = operation_date.days_between(&settlement);
    let calculation_days = elapsed.max(i64::from(institution.min_days));

    let value = title.value;
    let discount = discount_value(
        value,
        institution.daily_discount_rate(),
        calculation_days,
        institution.discount_method,
    );
    let ad_valorem = value * institution.ad_valorem / Decimal::ONE_HUNDRED;
    let iof_days = Decimal::from(calculation_days.min(IOF_MAX_DAYS));
    let iof = value * institution.iof_fixed / Decimal::ONE_HUNDRED
        + value * institution.iof_daily / Decimal::ONE_HUNDRED * iof_days;

    let deductions = discount
        + ad_valorem
        + iof
        + institution.ticket_fee
        + institution.serasa_fee
        + institution.signature_fee;

    CalculationResult {
        title_id: title.id.clone(),
        payer: title.payer.clone(),
        invoice_number: title.invoice_number.clone(),
        due_date: Some(due),
        gross_value: value,
        net_value: value - deductions,
        discount_value: discount,
        ad_valorem_value: ad_valorem,
        iof_value: iof,
        ticket_fee_value: institution.ticket_fee,
        serasa_fee_value: institution.serasa_fee,
        signature_fee_value: institution.signature_fee,
        days: actual_days,
        calculation_days,
        settlement_date: Some(settlement),
    }
}

/// Computes every title of a simulation, preserving input order.
///
/// One calendar covering all due dates is built up front and shared by every
/// title. With the `parallel` feature the titles are priced on the rayon pool.
#[must_use]
pub fn compute_titles(
    titles: &[Title],
    operation_date: Option<Date>,
    institution: &FinancialInstitution,
) -> Vec<CalculationResult> {
    let Some(op) = operation_date else {
        return titles.iter().map(not_computable).collect();
    };

    let span = titles
        .iter()
        .filter_map(Title::computable_due_date)
        .map(|due| calendar_span(due, institution.working_days_float))
        .reduce(|(s1, e1), (s2, e2)| (s1.min(s2), e1.max(e2)));
    let Some((start, end)) = span else {
        return titles.iter().map(not_computable).collect();
    };
    let calendar = NationalCalendar::cached(start, end);

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        titles
            .par_iter()
            .map(|t| compute_title_with_calendar(t, op, institution, calendar.as_ref()))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        titles
            .iter()
            .map(|t| compute_title_with_calendar(t, op, institution, calendar.as_ref()))
            .collect()
    }
}

/// Interest discount over `days` at `daily_rate` (a fraction).
///
/// Linear: `value × rate × days`. Compound: `value × (1 − (1 + rate)^−days)`.
#[must_use]
pub fn discount_value(value: Decimal, daily_rate: Decimal, days: i64, method: DiscountMethod) -> Decimal {
    match method {
        DiscountMethod::Linear => value * daily_rate * Decimal::from(days),
        DiscountMethod::Compound => {
            let factor = (Decimal::ONE + daily_rate).checked_powi(days);
            match factor.and_then(|f| Decimal::ONE.checked_div(f)) {
                Some(present) => value * (Decimal::ONE - present),
                // Factor overflowed: the present value is indistinguishable from zero
                None => value,
            }
        }
    }
}

/// Zero-valued result for a title that is not yet computable.
fn not_computable(title: &Title) -> CalculationResult {
    log::debug!("title '{}' is not computable yet", title.id);
    CalculationResult {
        title_id: title.id.clone(),
        payer: title.payer.clone(),
        invoice_number: title.invoice_number.clone(),
        due_date: title.due_date,
        gross_value: title.value,
        ..CalculationResult::default()
    }
}
