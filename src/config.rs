//! Configuration for a mounted inventory table.
//!
//! Every field has a default matching the customer inventory page, so an
//! empty JavaScript object (or `{}` in JSON) yields a working configuration.

use serde::{Deserialize, Serialize};

use crate::types::FilterDimension;

/// Storage key for the persisted filter controls.
pub const FILTER_STORAGE_KEY: &str = "customerInventoryFilters";
/// Storage key for the persisted sort state.
pub const SORT_STORAGE_KEY: &str = "customerInventorySort";
/// Server path that renders the spreadsheet.
pub const EXPORT_ENDPOINT: &str = "/inventory/api/export-xlsx";
/// Filename used when the response carries none.
pub const DEFAULT_EXPORT_FILENAME: &str = "inventory_export.xlsx";
/// Quiet period before a text-search keystroke re-filters.
pub const TEXT_DEBOUNCE_MS: u32 = 250;

/// Where the free-text filter looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "columns")]
pub enum TextScope {
    /// Each listed column is searched on its own
    Columns(Vec<String>),
    /// All cells of the row, joined by a space
    WholeRow,
}

/// Binds a filter dimension to the column it matches against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionBinding {
    pub dimension: FilterDimension,
    pub column: String,
}

/// Which filters a table offers and how rows are validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableProfile {
    pub dimensions: Vec<DimensionBinding>,
    pub text_scope: TextScope,
    /// Rows with fewer cells are malformed and skipped
    pub min_cells: usize,
    /// Narrow dropdown options to values still reachable
    pub dynamic_options: bool,
}

impl TableProfile {
    /// Part and bin dropdowns, text search over four columns.
    pub fn inventory() -> Self {
        Self {
            dimensions: vec![
                DimensionBinding {
                    dimension: FilterDimension::Part,
                    column: "Part".to_string(),
                },
                DimensionBinding {
                    dimension: FilterDimension::Bin,
                    column: "BIN".to_string(),
                },
            ],
            text_scope: TextScope::Columns(vec![
                "Description".to_string(),
                "User_Lot".to_string(),
                "Reference".to_string(),
                "PO".to_string(),
            ]),
            min_cells: 11,
            dynamic_options: false,
        }
    }

    /// Part, bin and status dropdowns that narrow each other, text search
    /// over the whole row.
    pub fn inventory_with_status() -> Self {
        let mut profile = Self::inventory();
        profile.dimensions.push(DimensionBinding {
            dimension: FilterDimension::Status,
            column: "Status".to_string(),
        });
        profile.text_scope = TextScope::WholeRow;
        profile.min_cells = 12;
        profile.dynamic_options = true;
        profile
    }

    pub fn has_dimension(&self, dimension: FilterDimension) -> bool {
        self.dimensions.iter().any(|b| b.dimension == dimension)
    }

    pub fn column_for(&self, dimension: FilterDimension) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|b| b.dimension == dimension)
            .map(|b| b.column.as_str())
    }
}

impl Default for TableProfile {
    fn default() -> Self {
        Self::inventory()
    }
}

/// Ids of the page elements the controller binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementIds {
    pub part_filter: String,
    pub bin_filter: String,
    pub status_filter: String,
    pub text_search: String,
    pub reset_button: String,
    pub export_button: String,
    pub body: String,
    pub row_count: String,
    /// Selector of the table whose headers carry `data-column-id`
    pub table_selector: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            part_filter: "partFilter".to_string(),
            bin_filter: "binFilter".to_string(),
            status_filter: "statusFilter".to_string(),
            text_search: "textSearch".to_string(),
            reset_button: "resetBtn".to_string(),
            export_button: "exportBtn".to_string(),
            body: "inventory-body".to_string(),
            row_count: "rowCount".to_string(),
            table_selector: ".grid-table".to_string(),
        }
    }
}

impl ElementIds {
    pub fn filter_control(&self, dimension: FilterDimension) -> &str {
        match dimension {
            FilterDimension::Part => &self.part_filter,
            FilterDimension::Bin => &self.bin_filter,
            FilterDimension::Status => &self.status_filter,
        }
    }
}

/// Full configuration of one inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    pub filter_storage_key: String,
    pub sort_storage_key: String,
    pub export_endpoint: String,
    pub default_export_filename: String,
    /// Column ids never sent to the export endpoint
    pub excluded_export_columns: Vec<String>,
    pub default_sort_column: String,
    pub text_debounce_ms: u32,
    pub export_idle_label: String,
    pub export_busy_label: String,
    pub elements: ElementIds,
    pub profile: TableProfile,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            filter_storage_key: FILTER_STORAGE_KEY.to_string(),
            sort_storage_key: SORT_STORAGE_KEY.to_string(),
            export_endpoint: EXPORT_ENDPOINT.to_string(),
            default_export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            excluded_export_columns: vec!["Customer_Part".to_string()],
            default_sort_column: "Part".to_string(),
            text_debounce_ms: TEXT_DEBOUNCE_MS,
            export_idle_label: "📥 Download XLSX".to_string(),
            export_busy_label: "📥 Generating...".to_string(),
            elements: ElementIds::default(),
            profile: TableProfile::default(),
        }
    }
}

impl TableConfig {
    /// Defaults with the status dropdown and dynamic options enabled.
    pub fn with_status() -> Self {
        Self {
            profile: TableProfile::inventory_with_status(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_yields_defaults() {
        let config: TableConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TableConfig::default());
        assert_eq!(config.profile.min_cells, 11);
        assert!(!config.profile.has_dimension(FilterDimension::Status));
    }

    #[test]
    fn test_partial_override() {
        let config: TableConfig = serde_json::from_str(
            r#"{
                "exportEndpoint": "/other/export",
                "elements": { "rowCount": "count" },
                "profile": {
                    "dimensions": [{ "dimension": "part", "column": "Part" }],
                    "textScope": { "kind": "wholeRow" },
                    "minCells": 3,
                    "dynamicOptions": true
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.export_endpoint, "/other/export");
        assert_eq!(config.elements.row_count, "count");
        assert_eq!(config.elements.part_filter, "partFilter");
        assert_eq!(config.profile.text_scope, TextScope::WholeRow);
        assert_eq!(config.sort_storage_key, SORT_STORAGE_KEY);
    }

    #[test]
    fn test_status_profile() {
        let profile = TableProfile::inventory_with_status();
        assert_eq!(profile.min_cells, 12);
        assert_eq!(profile.column_for(FilterDimension::Status), Some("Status"));
        assert!(profile.dynamic_options);
    }
}
