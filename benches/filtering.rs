//! Benchmarks for filter, sort and dropdown option passes.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::cast_possible_truncation
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use inventory_table::config::TableProfile;
use inventory_table::dynamic_options::available_options;
use inventory_table::filter::apply_filters;
use inventory_table::sort::sort_rows;
use inventory_table::{Column, ColumnType, FilterState, SortState, TableModel};

/// Inventory-shaped table with `rows` rows spread over 50 parts, 20 bins
/// and 3 statuses.
fn synthetic_model(rows: usize) -> TableModel {
    let columns = vec![
        Column::new("Part", ColumnType::String),
        Column::new("Description", ColumnType::String),
        Column::new("Qty", ColumnType::Numeric),
        Column::new("UOM", ColumnType::String),
        Column::new("BIN", ColumnType::String),
        Column::new("User_Lot", ColumnType::String),
        Column::new("Exp_Date", ColumnType::Date),
        Column::new("Reference", ColumnType::String),
        Column::new("PO", ColumnType::String),
        Column::new("Customer_Part", ColumnType::String),
        Column::new("Status", ColumnType::String),
        Column::new("Received", ColumnType::Date),
    ];
    let statuses = ["Active", "Hold", "Quarantine"];
    let body = (0..rows)
        .map(|i| {
            vec![
                format!("P-{:03}", i % 50),
                format!("Item {i} steel"),
                format!("{},{:03}", i % 7, i % 1000),
                "EA".to_string(),
                format!("B-{:02}", i % 20),
                format!("LOT{}", i % 300),
                format!("{:02}/{:02}/20{:02}", i % 12 + 1, i % 28 + 1, i % 30),
                format!("REF-{i}"),
                format!("PO-{}", i % 400),
                format!("CP-{i}"),
                statuses[i % 3].to_string(),
                "N/A".to_string(),
            ]
        })
        .collect();
    TableModel::new(columns, body)
}

fn bench_filter(c: &mut Criterion) {
    let profile = TableProfile::inventory_with_status();
    let filters = FilterState {
        bin: "B-07".to_string(),
        status: Some(String::new()),
        text: "steel".to_string(),
        ..FilterState::default()
    };

    let mut group = c.benchmark_group("filter");
    for rows in [1_000, 10_000] {
        let mut model = synthetic_model(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("apply", rows), &rows, |b, _| {
            b.iter(|| apply_filters(black_box(&mut model), &filters, &profile))
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    for column in ["Part", "Qty", "Exp_Date"] {
        let mut model = synthetic_model(10_000);
        let header = model.sortable_header(column).expect("header exists");
        let state = SortState::ascending(&header);
        group.bench_with_input(BenchmarkId::new("sort_rows", column), &state, |b, state| {
            b.iter(|| sort_rows(black_box(&mut model), state, 12))
        });
    }
    group.finish();
}

fn bench_options(c: &mut Criterion) {
    let profile = TableProfile::inventory_with_status();
    let model = synthetic_model(10_000);
    let filters = FilterState {
        part: "P-007".to_string(),
        status: Some("Hold".to_string()),
        ..FilterState::default()
    };

    c.bench_function("available_options_10000", |b| {
        b.iter(|| available_options(black_box(&model), &filters, &profile))
    });
}

criterion_group!(benches, bench_filter, bench_sort, bench_options);

criterion_main!(benches);
