//! End-to-end pricing scenarios and engine-wide properties.

use approx::assert_relative_eq;
use optima_engine::prelude::*;
use optima_engine::{compute_title_with_calendar, summarize_repurchases};
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

fn reference_institution() -> FinancialInstitution {
    FinancialInstitution {
        monthly_rate: dec!(2.5),
        ad_valorem: dec!(0.5),
        tac: dec!(50),
        iof_fixed: dec!(0.38),
        iof_daily: dec!(0.0041),
        repurchase_rate: dec!(3),
        repurchase_penalty: dec!(2),
        repurchase_mora: dec!(1),
        ticket_fee: dec!(5),
        transfer_fee: dec!(10),
        serasa_fee: dec!(12.5),
        signature_fee: dec!(3.5),
        min_days: 15,
        working_days_float: 0,
        ..FinancialInstitution::new("default-1", "Banco Exemplo S.A.")
    }
}

fn net_identity_gap(r: &CalculationResult) -> f64 {
    (r.net_value + r.total_deductions() - r.gross_value)
        .abs()
        .to_f64()
        .unwrap()
}

#[test]
fn scenario_twenty_day_title() {
    // Thursday Apr 2 2026 -> Wednesday Apr 22 2026, itself a business day
    let op = d(2026, 4, 2);
    let title = Title::new("1", dec!(5000), Some(d(2026, 4, 22)));
    let result = compute_title(&title, Some(op), &reference_institution());

    assert_eq!(result.days, 20);
    assert_eq!(result.calculation_days, 20);
    assert_relative_eq!(result.discount_value.to_f64().unwrap(), 83.33, epsilon = 0.01);
    assert_eq!(result.ad_valorem_value, dec!(25));
    assert_eq!(result.iof_value, dec!(23.1));
    assert_relative_eq!(result.net_value.to_f64().unwrap(), 4847.57, epsilon = 0.01);
    assert!(net_identity_gap(&result) < 1e-9);
}

#[test]
fn scenario_empty_due_date() {
    let title = Title::new("1", dec!(5000), Date::parse_lenient(""));
    let result = compute_title(&title, Some(d(2026, 4, 2)), &reference_institution());

    assert_eq!(result.net_value, Decimal::ZERO);
    assert_eq!(result.discount_value, Decimal::ZERO);
    assert_eq!(result.iof_value, Decimal::ZERO);
    assert_eq!(result.days, 0);
    assert_eq!(result.calculation_days, 0);
}

#[test]
fn scenario_repurchase_ten_days_late() {
    let title = Title::new("r1", dec!(1000), Some(d(2026, 3, 23)));
    let item = compute_repurchase(&title, Some(d(2026, 4, 2)), &reference_institution());

    assert_eq!(item.days_late, 10);
    assert_eq!(item.interest_fee, dec!(10));
    assert_eq!(item.penalty_fee, dec!(20));
    assert_relative_eq!(item.mora_fee.to_f64().unwrap(), 3.33, epsilon = 0.01);
    assert_relative_eq!(item.total.to_f64().unwrap(), 1033.33, epsilon = 0.01);
}

fn fixed_net(net: Decimal) -> CalculationResult {
    CalculationResult {
        gross_value: net,
        net_value: net,
        ..CalculationResult::default()
    }
}

#[test]
fn scenario_final_net_after_fixed_fees() {
    let inst = reference_institution();
    let totals = aggregate(&[fixed_net(dec!(5000)), fixed_net(dec!(4000))]);
    let repurchase = summarize_repurchases(&[], Some(d(2026, 4, 2)), &inst);
    let final_net = totals.net - inst.fixed_fees() - repurchase.grand_total;

    assert_eq!(totals.net, dec!(9000));
    assert_eq!(final_net, dec!(8940));
}

#[test]
fn scenario_zero_final_net_is_rejected() {
    let inst = FinancialInstitution {
        iof_fixed: Decimal::ZERO,
        iof_daily: Decimal::ZERO,
        tac: dec!(40),
        transfer_fee: dec!(20),
        ..FinancialInstitution::new("b1", "Banco Um")
    };
    let input = SimulationInput::new(d(2026, 4, 2))
        .with_title(Title::new("1", dec!(60), Some(d(2026, 5, 4))));
    let simulation = assemble(&input, &inst);

    assert_eq!(simulation.final_net, Decimal::ZERO);
    assert!(matches!(
        simulation.into_operation(),
        Err(EngineError::NonPositiveNet { .. })
    ));
}

#[test]
fn scenario_full_operation_round_trip() {
    let input = SimulationInput::new(d(2026, 4, 2))
        .with_title(Title::new("1", dec!(5000), Some(d(2026, 4, 22))).with_payer("CLIENTE EXEMPLO LTDA"))
        .with_title(Title::new("2", dec!(7500), Some(d(2026, 6, 4))))
        .with_title(Title::new("3", dec!(900), None))
        .with_repurchase(Title::new("r1", dec!(1000), Some(d(2026, 3, 23))))
        .with_extra_fee(ExtraFee::new("Registro", dec!(15)));

    let simulation = assemble(&input, &reference_institution());
    // Corpus Christi Jun 4 2026 settles Friday Jun 5
    assert_eq!(simulation.results[1].settlement_date, Some(d(2026, 6, 5)));
    assert!(!simulation.results[2].is_computed());

    let operation = simulation.clone().into_operation().unwrap();
    assert_eq!(operation.titles_count, 3);
    assert_eq!(operation.gross_total, dec!(13400));
    assert_eq!(operation.net_total, simulation.final_net);
    assert_eq!(operation.details.repurchase_items.len(), 1);
    assert_eq!(operation.details.extra_fees_total, dec!(15));
    assert_eq!(operation.details.discount_method, DiscountMethod::Linear);
    assert_eq!(uuid_version(&operation.id), Some('4'));

    let json = serde_json::to_string(&operation).unwrap();
    assert!(json.contains("\"institutionName\":\"Banco Exemplo S.A.\""));
    assert!(json.contains("\"repurchaseItems\""));
    let back: Operation = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, operation.id);
    assert_eq!(back.details.results.len(), 3);
}

fn uuid_version(id: &str) -> Option<char> {
    id.split('-').nth(2).and_then(|group| group.chars().next())
}

fn arb_institution() -> impl Strategy<Value = FinancialInstitution> {
    (0u32..800, 0u32..300, 0u32..60, 0u32..10, any::<bool>()).prop_map(
        |(rate_bp, adv_bp, min_days, float, compound)| FinancialInstitution {
            monthly_rate: Decimal::new(i64::from(rate_bp), 2),
            ad_valorem: Decimal::new(i64::from(adv_bp), 2),
            ticket_fee: dec!(5),
            serasa_fee: dec!(12.5),
            signature_fee: dec!(3.5),
            min_days,
            working_days_float: float,
            discount_method: if compound {
                DiscountMethod::Compound
            } else {
                DiscountMethod::Linear
            },
            ..FinancialInstitution::new("p", "Prop")
        },
    )
}

fn arb_title() -> impl Strategy<Value = Title> {
    (1i64..10_000_000, -60i64..800).prop_map(|(cents, offset)| {
        Title::new("t", Decimal::new(cents, 2), Some(d(2025, 6, 2).add_days(offset)))
    })
}

proptest! {
    #[test]
    fn prop_net_identity(title in arb_title(), inst in arb_institution()) {
        let result = compute_title(&title, Some(d(2025, 6, 2)), &inst);
        prop_assert!(net_identity_gap(&result) < 1e-9);
    }

    #[test]
    fn prop_calculation_days_at_least_min(title in arb_title(), inst in arb_institution()) {
        let result = compute_title(&title, Some(d(2025, 6, 2)), &inst);
        prop_assert!(result.calculation_days >= i64::from(inst.min_days));
        prop_assert!(result.days >= 0);
    }

    #[test]
    fn prop_days_late_non_negative(title in arb_title(), inst in arb_institution()) {
        let item = compute_repurchase(&title, Some(d(2025, 6, 2)), &inst);
        prop_assert!(item.days_late >= 0);
        prop_assert!(item.total >= item.value);
    }

    #[test]
    fn prop_compute_title_idempotent(title in arb_title(), inst in arb_institution()) {
        let first = compute_title(&title, Some(d(2025, 6, 2)), &inst);
        let second = compute_title(&title, Some(d(2025, 6, 2)), &inst);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_aggregate_order_independent(
        titles in prop::collection::vec(arb_title(), 0..20),
        inst in arb_institution(),
    ) {
        let results = compute_titles(&titles, Some(d(2025, 6, 2)), &inst);
        let mut reversed = results.clone();
        reversed.reverse();

        let forward = aggregate(&results);
        let backward = aggregate(&reversed);
        prop_assert!((forward.net - backward.net).abs() < dec!(0.000001));
        prop_assert!((forward.discount - backward.discount).abs() < dec!(0.000001));
        prop_assert_eq!(forward.gross, backward.gross);
    }

    #[test]
    fn prop_batch_matches_single(
        titles in prop::collection::vec(arb_title(), 1..10),
        inst in arb_institution(),
    ) {
        let op = d(2025, 6, 2);
        let batch = compute_titles(&titles, Some(op), &inst);
        for (title, result) in titles.iter().zip(&batch) {
            let calendar = NationalCalendar::for_years(2025, 2029);
            prop_assert_eq!(result, &compute_title_with_calendar(title, op, &inst, &calendar));
        }
    }
}
