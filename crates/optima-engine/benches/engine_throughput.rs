//! Benchmarks for the title calculator and totals reducer.
//!
//! Run with: cargo bench -p optima-engine

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use optima_engine::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn institution() -> FinancialInstitution {
    FinancialInstitution {
        monthly_rate: dec!(2.5),
        ad_valorem: dec!(0.5),
        tac: dec!(50),
        ticket_fee: dec!(5),
        transfer_fee: dec!(10),
        serasa_fee: dec!(12.5),
        signature_fee: dec!(3.5),
        min_days: 15,
        working_days_float: 2,
        ..FinancialInstitution::new("bench", "Banco Bench")
    }
}

fn create_titles(count: usize, op: Date) -> Vec<Title> {
    (0..count)
        .map(|i| {
            let value = Decimal::from(1_000 + (i as i64 % 97) * 125);
            let due = op.add_days(5 + (i as i64 % 180));
            Title::new(format!("T{i:05}"), value, Some(due))
        })
        .collect()
}

fn bench_single_title(c: &mut Criterion) {
    let op = Date::from_ymd(2025, 6, 2).unwrap();
    let inst = institution();
    let title = Title::new("1", dec!(5000), op.add_days(45).into());

    c.bench_function("compute_title", |b| {
        b.iter(|| compute_title(black_box(&title), Some(op), black_box(&inst)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let op = Date::from_ymd(2025, 6, 2).unwrap();
    let inst = institution();

    let mut group = c.benchmark_group("compute_titles");
    group.sample_size(50);

    for size in [10, 100, 1000] {
        let titles = create_titles(size, op);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &titles, |b, titles| {
            b.iter(|| compute_titles(black_box(titles), Some(op), &inst))
        });
    }
    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let op = Date::from_ymd(2025, 6, 2).unwrap();
    let inst = institution();
    let input = SimulationInput {
        titles: create_titles(1000, op),
        ..SimulationInput::new(op)
    };

    let results = compute_titles(&input.titles, Some(op), &inst);
    c.bench_function("aggregate_1000", |b| b.iter(|| aggregate(black_box(&results))));
    c.bench_function("assemble_1000", |b| b.iter(|| assemble(black_box(&input), &inst)));
}

criterion_group!(title_pricing, bench_single_title, bench_batch);
criterion_group!(operation, bench_assemble);
criterion_main!(title_pricing, operation);
