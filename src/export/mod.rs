//! Export of the visible table to a spreadsheet.
//!
//! The browser collects the displayed headers and the visible rows in their
//! current order, posts them as JSON to the server and downloads the
//! spreadsheet it returns. This module holds the browser-independent parts:
//! building the request body and interpreting the response.

pub mod control;
pub mod disposition;
pub mod response;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::model::TableModel;
use crate::sort::{ASC_GLYPH, DESC_GLYPH};

pub use control::{BusyControl, BusyGuard};
pub use disposition::{export_filename, filename_from_disposition};
pub use response::{interpret_response, ExportFile, ExportResponse};

/// JSON body of the export request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportPayload {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A ready-to-send export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub endpoint: String,
    pub body: String,
}

/// Header text without the sort glyph, trimmed.
pub fn clean_header_label(label: &str) -> String {
    label
        .replacen(ASC_GLYPH, "", 1)
        .replacen(DESC_GLYPH, "", 1)
        .trim()
        .to_string()
}

/// Displayed, non-excluded headers and the matching cells of every visible
/// row, in current row order.
///
/// # Errors
/// [`TableError::NoVisibleRows`] when no row is visible.
pub fn build_payload(model: &TableModel, excluded: &[String]) -> Result<ExportPayload> {
    let included: Vec<usize> = model
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.displayed && !excluded.contains(&c.id))
        .map(|(i, _)| i)
        .collect();

    let headers = included
        .iter()
        .filter_map(|&i| model.columns().get(i))
        .map(|c| clean_header_label(&c.label))
        .collect();

    let rows: Vec<Vec<String>> = model
        .visible_rows()
        .map(|row| {
            included
                .iter()
                .filter_map(|&i| row.cell(i))
                .map(|text| text.trim().to_string())
                .collect()
        })
        .collect();

    if rows.is_empty() {
        return Err(TableError::NoVisibleRows);
    }

    Ok(ExportPayload { headers, rows })
}

impl ExportPayload {
    pub fn to_request(&self, endpoint: &str) -> Result<ExportRequest> {
        Ok(ExportRequest {
            endpoint: endpoint.to_string(),
            body: serde_json::to_string(self)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_header_label() {
        assert_eq!(clean_header_label("  Part ↑ "), "Part");
        assert_eq!(clean_header_label("Qty↓"), "Qty");
        assert_eq!(clean_header_label("A ↑↑"), "A ↑");
        assert_eq!(clean_header_label("Bin"), "Bin");
    }

    #[test]
    fn test_request_body_shape() {
        let payload = ExportPayload {
            headers: vec!["Part".into()],
            rows: vec![vec!["A-1".into()]],
        };
        let request = payload.to_request("/x").unwrap();
        assert_eq!(request.endpoint, "/x");
        assert_eq!(request.body, r#"{"headers":["Part"],"rows":[["A-1"]]}"#);
    }
}
