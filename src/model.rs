//! In-memory model of the inventory table.
//!
//! Filtering and sorting operate on this model; the DOM layer only projects
//! the resulting visibility and order back onto the page.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::types::{Column, HeaderRef, Row};

/// Serializable form of a table: headers plus raw row cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSnapshot {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

/// Ordered headers and ordered rows.
#[derive(Debug, Clone, Default)]
pub struct TableModel {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl TableModel {
    /// Build a model whose row keys follow the given order.
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(key, cells)| Row::new(key, cells))
            .collect();
        Self { columns, rows }
    }

    pub fn from_snapshot(snapshot: TableSnapshot) -> Self {
        Self::new(snapshot.columns, snapshot.rows)
    }

    /// Parse a JSON [`TableSnapshot`].
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: TableSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Replace the headers after the live table changed (columns shown,
    /// hidden or relabeled).
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    /// Position of the header carrying `column_id`.
    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    /// Live reference to a sortable header.
    pub fn sortable_header(&self, column_id: &str) -> Option<HeaderRef> {
        self.columns
            .iter()
            .enumerate()
            .find(|(_, c)| c.sortable && c.id == column_id)
            .map(|(index, c)| HeaderRef {
                column_id: c.id.clone(),
                index,
                kind: c.kind,
            })
    }

    /// Like [`Self::sortable_header`] but failing on unknown ids.
    pub fn require_sortable_header(&self, column_id: &str) -> Result<HeaderRef> {
        self.sortable_header(column_id)
            .ok_or_else(|| TableError::UnknownColumn(column_id.to_string()))
    }

    /// Number of rows in the body, well-formed or not.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keys of the rows in current order.
    pub fn order(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.key).collect()
    }

    /// Rows currently shown, in current order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| !r.hidden)
    }

    pub fn to_snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            columns: self.columns.clone(),
            rows: self.rows.iter().map(|r| r.cells.clone()).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::ColumnType;

    #[test]
    fn test_keys_follow_input_order() {
        let model = TableModel::new(
            vec![Column::new("Part", ColumnType::String)],
            vec![vec!["B".into()], vec!["A".into()]],
        );
        assert_eq!(model.order(), vec![0, 1]);
        assert_eq!(model.rows()[1].cell(0), Some("A"));
    }

    #[test]
    fn test_sortable_header_skips_unsortable() {
        let model = TableModel::new(
            vec![
                Column::new("Part", ColumnType::String),
                Column::new("Qty", ColumnType::Numeric).unsortable(),
            ],
            Vec::new(),
        );
        assert_eq!(model.sortable_header("Part").map(|h| h.index), Some(0));
        assert!(model.sortable_header("Qty").is_none());
        assert!(matches!(
            model.require_sortable_header("Nope"),
            Err(TableError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let model = TableModel::from_json(
            r#"{"columns":[{"id":"Qty","type":"numeric"}],"rows":[["1"],["2"]]}"#,
        )
        .unwrap();
        assert_eq!(model.columns()[0].kind, ColumnType::Numeric);
        assert!(model.columns()[0].displayed);
        assert_eq!(model.len(), 2);
    }
}
