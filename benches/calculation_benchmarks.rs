//! Performance benchmarks for the benefit calculator.
//!
//! Covers the three stages a request goes through:
//! - loading pasted text of growing size
//! - the pure calculation over an in-memory dataset
//! - the full `/calculate` round trip through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use benefit_calculator::api::{AppState, CalculationRequest, create_router};
use benefit_calculator::calculation::compute_benefit;
use benefit_calculator::config::{BenefitConfig, ConfigLoader};
use benefit_calculator::loader::{ColumnMapping, load_text};
use benefit_calculator::models::{Dataset, Period};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const SIZES: [usize; 4] = [12, 120, 1_200, 12_000];

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/inss").expect("Failed to load config");
    AppState::new(config)
}

/// Monthly remunerations starting in January 2000, one per row.
fn monthly_rows(count: usize) -> Vec<(String, Decimal)> {
    (0..count)
        .map(|i| {
            let period = format!("{:04}-{:02}-01", 2000 + i / 12, i % 12 + 1);
            let remuneration = Decimal::new(150_000 + ((i * 7_919) % 500_000) as i64, 2);
            (period, remuneration)
        })
        .collect()
}

fn pasted_text(count: usize) -> String {
    let mut text = String::from("Competencia;Remuneracao\n");
    for (period, remuneration) in monthly_rows(count) {
        text.push_str(&format!("{};{}\n", period, remuneration));
    }
    text
}

fn bench_load_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_text");

    for size in SIZES {
        let text = pasted_text(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("rows", size), &text, |b, text| {
            b.iter(|| load_text(black_box(text), &ColumnMapping::default()).unwrap())
        });
    }

    group.finish();
}

fn bench_compute_benefit(c: &mut Criterion) {
    let config = BenefitConfig::default();
    let mut group = c.benchmark_group("compute_benefit");

    for size in SIZES {
        let dataset = Dataset::from_pairs(
            monthly_rows(size)
                .into_iter()
                .map(|(period, remuneration)| (Period::new(period), remuneration)),
        );
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("records", size), &dataset, |b, dataset| {
            b.iter(|| compute_benefit(black_box(dataset), &config).unwrap())
        });
    }

    group.finish();
}

fn bench_calculate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let mut group = c.benchmark_group("calculate_endpoint");

    for size in [12usize, 1_200] {
        let request = CalculationRequest {
            text: Some(pasted_text(size)),
            ..Default::default()
        };
        let body = serde_json::to_string(&request).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("rows", size), &body, |b, body| {
            b.to_async(&rt).iter(|| async {
                let router = router.clone();
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/calculate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                black_box(response)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_load_text,
    bench_compute_benefit,
    bench_calculate_endpoint,
);
criterion_main!(benches);
