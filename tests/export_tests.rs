//! Tests for the export request body and the handling of the server's
//! answer.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use common::{controller, inventory_columns, inventory_rows, MALFORMED_KEY};
use inventory_table::config::{TableProfile, EXPORT_ENDPOINT};
use inventory_table::export::{
    build_payload, export_filename, ExportPayload, ExportResponse,
};
use inventory_table::filter::apply_filters;
use inventory_table::notice::{Notice, NoticeLevel};
use inventory_table::{Column, ColumnType, FilterState, TableConfig, TableError, TableModel};
use test_case::test_case;

fn excluded() -> Vec<String> {
    vec!["Customer_Part".to_string()]
}

// ============================================================================
// Payload
// ============================================================================

#[test]
fn test_payload_for_visible_rows() {
    let columns = vec![
        Column::new("Part", ColumnType::String).with_label("Part ↑"),
        Column::new("Description", ColumnType::String),
        Column::new("Qty", ColumnType::Numeric),
        Column::new("Customer_Part", ColumnType::String),
        Column::new("BIN", ColumnType::String),
    ];
    let rows = vec![
        vec!["A".into(), "Bolt".into(), "5".into(), "C1".into(), "X".into()],
        vec!["B".into(), "Nut".into(), "2".into(), "C2".into(), "Y".into()],
        vec!["C".into(), "Pin".into(), "9".into(), "C3".into(), "X".into()],
    ];
    let mut model = TableModel::new(columns, rows);
    let profile = TableProfile {
        min_cells: 5,
        ..TableProfile::inventory()
    };
    let filters = FilterState {
        bin: "X".into(),
        ..FilterState::default()
    };
    apply_filters(&mut model, &filters, &profile);

    let payload = build_payload(&model, &excluded()).unwrap();
    assert_eq!(payload.headers, vec!["Part", "Description", "Qty", "BIN"]);
    assert_eq!(
        payload.rows,
        vec![vec!["A", "Bolt", "5", "X"], vec!["C", "Pin", "9", "X"]]
    );
}

#[test]
fn test_hidden_columns_are_skipped() {
    let mut columns = inventory_columns();
    columns[1] = columns[1].clone().hidden();
    let model = TableModel::new(columns, inventory_rows()[..1].to_vec());

    let payload = build_payload(&model, &excluded()).unwrap();
    assert_eq!(payload.headers.len(), 10);
    assert!(!payload.headers.contains(&"Description".to_string()));
    assert!(!payload.headers.contains(&"Customer_Part".to_string()));
    assert_eq!(payload.rows[0].len(), 10);
    assert_eq!(payload.rows[0][1], "1,200");
}

#[test]
fn test_cells_are_trimmed() {
    let model = TableModel::new(inventory_columns(), vec![inventory_rows()[2].clone()]);
    let payload = build_payload(&model, &excluded()).unwrap();
    assert_eq!(payload.rows[0][1], "Brass nut");
}

#[test]
fn test_nothing_visible() {
    let model = TableModel::new(inventory_columns(), Vec::new());
    let err = build_payload(&model, &excluded()).unwrap_err();
    assert!(matches!(err, TableError::NoVisibleRows));

    let notice = Notice::for_export_failure(&err);
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.message, "No data currently visible to export.");
}

#[test]
fn test_controller_exports_in_display_order() {
    let mut controller = controller(TableConfig::default());
    controller.initialize();
    controller.click_column("Qty").unwrap();

    let request = controller.prepare_export().unwrap();
    assert_eq!(request.endpoint, EXPORT_ENDPOINT);

    let payload: ExportPayload = serde_json::from_str(&request.body).unwrap();
    assert_eq!(payload.headers[0], "Part");
    assert_eq!(payload.headers.len(), 11);
    let parts: Vec<&str> = payload
        .rows
        .iter()
        .map(|r| r.first().map(String::as_str).unwrap_or(""))
        .collect();
    // The malformed row is still on the page, ahead of the sorted rows.
    assert_eq!(parts, vec!["P-999", "P-300", "P-100", "P-100", "P-200"]);
    assert_eq!(payload.rows[0].len(), 2);
    assert_eq!(controller.model().rows()[0].key, MALFORMED_KEY);
}

#[test]
fn test_controller_refuses_empty_export() {
    let mut snapshot = common::inventory_model().to_snapshot();
    snapshot.rows.pop();
    let mut controller = inventory_table::TableController::new(
        TableModel::from_snapshot(snapshot),
        TableConfig::default(),
        inventory_table::storage::MemoryStore::new(),
    );
    controller.initialize();
    let mut filters = controller.filters().clone();
    filters.part = "NOPE".to_string();
    controller.set_filters(filters, None);

    assert!(matches!(
        controller.prepare_export(),
        Err(TableError::NoVisibleRows)
    ));
}

// ============================================================================
// Response
// ============================================================================

#[test_case(Some(r#"attachment; filename="Inventory_ACME_20240101_120000.xlsx""#), "Inventory_ACME_20240101_120000.xlsx" ; "quoted")]
#[test_case(Some(r#"attachment; filename="""#), "inventory_export.xlsx" ; "empty name")]
#[test_case(Some("inline"), "inventory_export.xlsx" ; "no filename")]
#[test_case(None, "inventory_export.xlsx" ; "no header")]
fn test_download_filename(header: Option<&str>, expected: &str) {
    assert_eq!(export_filename(header, "inventory_export.xlsx"), expected);
}

#[test]
fn test_finish_export() {
    let controller = controller(TableConfig::default());
    let file = controller
        .finish_export(ExportResponse {
            status: 200,
            content_disposition: None,
            body: vec![1, 2, 3],
        })
        .unwrap();
    assert_eq!(file.filename, "inventory_export.xlsx");
    assert_eq!(file.bytes, vec![1, 2, 3]);

    let err = controller
        .finish_export(ExportResponse {
            status: 400,
            content_disposition: None,
            body: br#"{"success":false,"message":"No data to export"}"#.to_vec(),
        })
        .unwrap_err();
    assert_eq!(
        Notice::for_export_failure(&err).message,
        "An error occurred during the export: No data to export"
    );

    let err = controller
        .finish_export(ExportResponse {
            status: 503,
            content_disposition: None,
            body: Vec::new(),
        })
        .unwrap_err();
    assert_eq!(
        Notice::for_export_failure(&err).message,
        "An error occurred during the export: HTTP error 503"
    );
}
