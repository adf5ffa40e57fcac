//! Load and search benchmarks.
//!
//! ```sh
//! cargo bench -p restodb-core --bench benchmarks
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use restodb_core::raw::RestaurantRaw;
use restodb_core::search::SearchOptions;
use restodb_core::{build_restodb, RestaurantDb};
use std::hint::black_box;

const CHAINS: [&str; 8] = [
    "McDonald's",
    "Burger King",
    "Starbucks",
    "Subway",
    "Taco Bell",
    "Domino's Pizza",
    "Dunkin'",
    "Chipotle Mexican Grill",
];

fn rows(n: usize) -> Vec<RestaurantRaw> {
    (0..n)
        .map(|i| RestaurantRaw {
            title: format!("{} #{}", CHAINS[i % CHAINS.len()], i / CHAINS.len()),
            category: format!("Category {}", i % 40),
            rating: Some(format!("{:.1}", 1.0 + (i % 41) as f64 / 10.0)),
            latitude: Some(format!("{:.4}", 25.0 + (i % 2000) as f64 / 100.0)),
            longitude: Some(format!("{:.4}", -120.0 + (i % 5000) as f64 / 100.0)),
            ..Default::default()
        })
        .collect()
}

fn to_csv(rows: &[RestaurantRaw]) -> String {
    let mut out = String::from("Title,Category,Rating,Latitude,Longitude,Phone,Address\n");
    for r in rows {
        out.push_str(&format!(
            "\"{}\",{},{},{},{},,\n",
            r.title,
            r.category,
            r.rating.as_deref().unwrap_or(""),
            r.latitude.as_deref().unwrap_or(""),
            r.longitude.as_deref().unwrap_or("")
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

fn load_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    for n in [1_000usize, 10_000] {
        let csv = to_csv(&rows(n));
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("csv", n), &csv, |b, csv| {
            b.iter(|| RestaurantDb::load_from_reader(black_box(csv.as_bytes())))
        });
        group.bench_with_input(BenchmarkId::new("normalize", n), &n, |b, &n| {
            b.iter_batched(|| rows(n), build_restodb, criterion::BatchSize::SmallInput)
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Fuzzy search
// ---------------------------------------------------------------------------

fn search_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    for n in [1_000usize, 10_000] {
        let db = build_restodb(rows(n));
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("typo", n), &db, |b, db| {
            b.iter(|| {
                db.find_matches(black_box("McDnalds #1"), &SearchOptions::default())
                    .map(|m| m.record_count())
            })
        });
        let folded = SearchOptions {
            fold: true,
            ..SearchOptions::default()
        };
        group.bench_with_input(BenchmarkId::new("folded", n), &db, |b, db| {
            b.iter(|| db.find_matches(black_box("burger king #12"), &folded).map(|m| m.record_count()))
        });
    }
    group.finish();
}

criterion_group!(benches, load_bench, search_bench);
criterion_main!(benches);
