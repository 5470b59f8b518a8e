use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tablekit::{CellValue, RangeScaler, Scaler, Table};

fn create_raw_rows(rows: usize) -> Vec<Vec<String>> {
    let books = [
        "Commodities Trading",
        "Equity Trading",
        "FX Trading",
        "Bond Trading",
    ];

    (0..rows)
        .map(|i| {
            vec![
                i.to_string(),
                books[i % books.len()].to_string(),
                format!("{}.{}", i % 997, i % 10),
                (i % 2 == 0).to_string(),
            ]
        })
        .collect()
}

fn create_test_data(rows: usize) -> Table {
    Table::from_rows(&["id", "book", "value", "active"], &create_raw_rows(rows)).unwrap()
}

fn benchmark_ingest(c: &mut Criterion) {
    let raw_10k = create_raw_rows(10_000);
    let raw_100k = create_raw_rows(100_000);

    let mut group = c.benchmark_group("from_rows");

    group.bench_function("10k_rows", |b| {
        b.iter(|| Table::from_rows(&["id", "book", "value", "active"], black_box(&raw_10k)))
    });

    group.bench_function("100k_rows", |b| {
        b.iter(|| Table::from_rows(&["id", "book", "value", "active"], black_box(&raw_100k)))
    });

    group.finish();
}

fn benchmark_operations(c: &mut Criterion) {
    let table_100k = create_test_data(100_000);

    let mut group = c.benchmark_group("table_ops");

    group.bench_function("select_shares_columns", |b| {
        b.iter(|| table_100k.select(black_box(&["value", "id"])).unwrap())
    });

    group.bench_function("where_rows", |b| {
        b.iter(|| table_100k.where_rows(|row| row["active"] == CellValue::Bool(true)))
    });

    group.bench_function("quantile", |b| {
        let value = table_100k.col("value").unwrap();
        b.iter(|| black_box(value.quantile(black_box(0.9))))
    });

    group.bench_function("categorize", |b| b.iter(|| table_100k.categorize()));

    group.bench_function("range_scale", |b| {
        let mut scaler = RangeScaler::new();
        scaler.fit(&table_100k, &["value"]).unwrap();
        b.iter(|| scaler.transform(&table_100k, &[]).unwrap())
    });

    group.finish();
}

criterion_group!(benches, benchmark_ingest, benchmark_operations);
criterion_main!(benches);
