//! Shared fixtures for the inventory table integration tests.
//!
//! The fixture mirrors the customer inventory page: twelve columns, four
//! well-formed rows and one malformed row (key 4) at the end of the body.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use inventory_table::storage::MemoryStore;
use inventory_table::{Column, ColumnType, TableConfig, TableController, TableModel};

pub const MALFORMED_KEY: usize = 4;

/// Headers in page order.
pub fn inventory_columns() -> Vec<Column> {
    vec![
        Column::new("Part", ColumnType::String),
        Column::new("Description", ColumnType::String),
        Column::new("Qty", ColumnType::Numeric),
        Column::new("UOM", ColumnType::String).unsortable(),
        Column::new("BIN", ColumnType::String),
        Column::new("User_Lot", ColumnType::String),
        Column::new("Exp_Date", ColumnType::Date),
        Column::new("Reference", ColumnType::String),
        Column::new("PO", ColumnType::String),
        Column::new("Customer_Part", ColumnType::String),
        Column::new("Status", ColumnType::String),
        Column::new("Received", ColumnType::Date),
    ]
}

fn row(cells: [&str; 12]) -> Vec<String> {
    cells.iter().map(|c| (*c).to_string()).collect()
}

/// Body rows in page order.
pub fn inventory_rows() -> Vec<Vec<String>> {
    vec![
        row([
            "P-200", "Steel bolt", "1,200", "EA", "A-01", "LOT7", "03/15/2025", "REF-1", "PO-9",
            "CP-1", "Active", "01/02/2024",
        ]),
        row([
            "P-100", "Copper wire", "35.5", "FT", "B-02", "LOT3", "N/A", "REF-2", "PO-8", "CP-2",
            "Hold", "12/31/2023",
        ]),
        row([
            "P-300", " Brass nut ", "", "EA", "A-01", "lot9", "12/01/2024", "REF-3", "PO-7",
            "CP-3", "Active", "06/15/2024",
        ]),
        row([
            "P-100", "Steel washer", "7", "EA", "C-03", "LOT1", "01/20/2026", "BOLT-REF", "PO-6",
            "CP-4", "Active", "02/29/2024",
        ]),
        vec!["P-999".to_string(), "Broken row".to_string()],
    ]
}

pub fn inventory_model() -> TableModel {
    TableModel::new(inventory_columns(), inventory_rows())
}

pub fn controller(config: TableConfig) -> TableController<MemoryStore> {
    TableController::new(inventory_model(), config, MemoryStore::new())
}

pub fn controller_with_store(
    config: TableConfig,
    store: MemoryStore,
) -> TableController<MemoryStore> {
    TableController::new(inventory_model(), config, store)
}

/// Keys of the visible well-formed rows, in current order.
pub fn visible_keys(model: &TableModel) -> Vec<usize> {
    model
        .rows()
        .iter()
        .filter(|r| !r.hidden && r.key != MALFORMED_KEY)
        .map(|r| r.key)
        .collect()
}

pub fn is_hidden(model: &TableModel, key: usize) -> bool {
    model
        .rows()
        .iter()
        .find(|r| r.key == key)
        .map(|r| r.hidden)
        .expect("row key exists")
}
