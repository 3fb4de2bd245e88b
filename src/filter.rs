//! Row filtering.
//!
//! A row is shown when every active exact-match dimension equals the row's
//! cell text and the lowercase text needle occurs in the searched text.
//! Malformed rows (too few cells) are left exactly as they are.

use std::fmt;

use crate::config::{TableProfile, TextScope};
use crate::model::TableModel;
use crate::types::{FilterDimension, FilterState, Row};

/// Visible / total row counter shown above the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowCount {
    pub visible: usize,
    pub total: usize,
}

impl fmt::Display for RowCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} rows", self.visible, self.total)
    }
}

#[derive(Debug, Clone)]
struct ExactMatch {
    dimension: FilterDimension,
    index: Option<usize>,
    value: String,
}

#[derive(Debug, Clone)]
enum TextTarget {
    Cells(Vec<usize>),
    WholeRow,
}

/// Filter predicates resolved against the model's current headers.
#[derive(Debug, Clone)]
pub struct RowFilter {
    exact: Vec<ExactMatch>,
    needle: String,
    target: TextTarget,
    min_cells: usize,
}

impl RowFilter {
    pub fn new(filters: &FilterState, profile: &TableProfile, model: &TableModel) -> Self {
        let exact = profile
            .dimensions
            .iter()
            .filter_map(|binding| {
                let value = filters.value(binding.dimension);
                if value.is_empty() {
                    return None;
                }
                Some(ExactMatch {
                    dimension: binding.dimension,
                    index: model.column_index(&binding.column),
                    value: value.to_string(),
                })
            })
            .collect();

        let target = match &profile.text_scope {
            TextScope::Columns(ids) => TextTarget::Cells(
                ids.iter()
                    .filter_map(|id| model.column_index(id))
                    .collect(),
            ),
            TextScope::WholeRow => TextTarget::WholeRow,
        };

        Self {
            exact,
            needle: filters.text.to_lowercase(),
            target,
            min_cells: profile.min_cells,
        }
    }

    /// Rows with fewer cells than the table schema expects.
    pub fn is_malformed(&self, row: &Row) -> bool {
        !row.is_well_formed(self.min_cells)
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.exact.iter().all(|m| exact_match(m, row)) && self.matches_text(row)
    }

    /// Like [`Self::matches`] with `skip`'s dropdown treated as cleared.
    pub fn matches_except(&self, row: &Row, skip: FilterDimension) -> bool {
        self.exact
            .iter()
            .filter(|m| m.dimension != skip)
            .all(|m| exact_match(m, row))
            && self.matches_text(row)
    }

    pub fn matches_text(&self, row: &Row) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        match &self.target {
            TextTarget::Cells(indices) => indices.iter().any(|&i| {
                row.cell(i)
                    .is_some_and(|text| text.to_lowercase().contains(&self.needle))
            }),
            TextTarget::WholeRow => row.cells.join(" ").to_lowercase().contains(&self.needle),
        }
    }
}

fn exact_match(m: &ExactMatch, row: &Row) -> bool {
    m.index.and_then(|i| row.cell(i)) == Some(m.value.as_str())
}

/// Hide every well-formed row that fails the filters and show the rest.
pub fn apply_filters(
    model: &mut TableModel,
    filters: &FilterState,
    profile: &TableProfile,
) -> RowCount {
    let filter = RowFilter::new(filters, profile, model);
    let total = model.len();
    let mut visible = 0;

    for row in model.rows_mut().iter_mut() {
        if filter.is_malformed(row) {
            continue;
        }
        let show = filter.matches(row);
        row.hidden = !show;
        if show {
            visible += 1;
        }
    }

    tracing::debug!(visible, total, "applied filters");
    RowCount { visible, total }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{Column, ColumnType};

    fn tiny_profile(scope: TextScope) -> TableProfile {
        TableProfile {
            dimensions: vec![crate::config::DimensionBinding {
                dimension: FilterDimension::Part,
                column: "Part".to_string(),
            }],
            text_scope: scope,
            min_cells: 2,
            dynamic_options: false,
        }
    }

    fn tiny_model() -> TableModel {
        TableModel::new(
            vec![
                Column::new("Part", ColumnType::String),
                Column::new("Description", ColumnType::String),
            ],
            vec![
                vec!["A-1".into(), "Steel Bolt".into()],
                vec!["B-2".into(), "Copper Wire".into()],
                vec!["lonely".into()],
            ],
        )
    }

    #[test]
    fn test_row_count_display() {
        let count = RowCount {
            visible: 3,
            total: 10,
        };
        assert_eq!(count.to_string(), "Showing 3 of 10 rows");
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        let mut model = tiny_model();
        let profile = tiny_profile(TextScope::WholeRow);
        let filters = FilterState {
            part: "a-1".into(),
            ..FilterState::default()
        };
        let count = apply_filters(&mut model, &filters, &profile);
        assert_eq!(count.visible, 0);
    }

    #[test]
    fn test_malformed_rows_untouched_but_counted_in_total() {
        let mut model = tiny_model();
        model.rows_mut()[2].hidden = true;
        let profile = tiny_profile(TextScope::WholeRow);
        let count = apply_filters(&mut model, &FilterState::default(), &profile);
        assert_eq!(count, RowCount { visible: 2, total: 3 });
        assert!(model.rows()[2].hidden);
    }

    #[test]
    fn test_text_search_is_case_insensitive() {
        let mut model = tiny_model();
        let profile = tiny_profile(TextScope::Columns(vec!["Description".into()]));
        let filters = FilterState {
            text: "COPPER".into(),
            ..FilterState::default()
        };
        let count = apply_filters(&mut model, &filters, &profile);
        assert_eq!(count.visible, 1);
        assert!(model.rows()[0].hidden);
        assert!(!model.rows()[1].hidden);
    }

    #[test]
    fn test_column_scope_ignores_unlisted_columns() {
        let mut model = tiny_model();
        let profile = tiny_profile(TextScope::Columns(vec!["Description".into()]));
        let filters = FilterState {
            text: "a-1".into(),
            ..FilterState::default()
        };
        assert_eq!(apply_filters(&mut model, &filters, &profile).visible, 0);

        let profile = tiny_profile(TextScope::WholeRow);
        assert_eq!(apply_filters(&mut model, &filters, &profile).visible, 1);
    }
}
