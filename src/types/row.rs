use serde::{Deserialize, Serialize};

/// One pre-rendered body row.
///
/// Rows are never created or destroyed by the controller; only their
/// visibility and order change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Position of the row in the body when the page was rendered
    pub key: usize,
    /// Display text of each cell, untrimmed
    pub cells: Vec<String>,
    #[serde(default)]
    pub hidden: bool,
}

impl Row {
    pub fn new(key: usize, cells: Vec<String>) -> Self {
        Self {
            key,
            cells,
            hidden: false,
        }
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// Whether the row carries at least `min_cells` cells.
    pub fn is_well_formed(&self, min_cells: usize) -> bool {
        self.cells.len() >= min_cells
    }
}
