//! Dropdown options that narrow as other filters are applied.
//!
//! The options of a dimension are the values found in rows that pass every
//! *other* active filter, so picking any offered value never empties the
//! table while the user can still broaden back out.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::TableProfile;
use crate::filter::RowFilter;
use crate::model::TableModel;
use crate::types::{FilterDimension, FilterState};

/// The control that triggered a filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangedControl {
    Dimension(FilterDimension),
    TextSearch,
}

/// Distinct values still reachable per dimension, ordered.
pub type OptionSets = BTreeMap<FilterDimension, BTreeSet<String>>;

/// One pass over the rows collecting, for each dimension of the profile,
/// the values of rows that pass the other dimensions and the text filter.
pub fn available_options(
    model: &TableModel,
    filters: &FilterState,
    profile: &TableProfile,
) -> OptionSets {
    let filter = RowFilter::new(filters, profile, model);
    let bound: Vec<(FilterDimension, Option<usize>)> = profile
        .dimensions
        .iter()
        .map(|b| (b.dimension, model.column_index(&b.column)))
        .collect();

    let mut sets: OptionSets = bound
        .iter()
        .map(|(dimension, _)| (*dimension, BTreeSet::new()))
        .collect();

    for row in model.rows() {
        if filter.is_malformed(row) {
            continue;
        }
        for (dimension, index) in &bound {
            let Some(value) = index.and_then(|i| row.cell(i)) else {
                continue;
            };
            if value.is_empty() || !filter.matches_except(row, *dimension) {
                continue;
            }
            if let Some(set) = sets.get_mut(dimension) {
                set.insert(value.to_string());
            }
        }
    }

    sets
}

/// Dropdowns to rebuild after `changed`: the control the user just touched
/// keeps its options, everything else is recomputed.
pub fn dimensions_to_rebuild(
    profile: &TableProfile,
    changed: Option<ChangedControl>,
) -> Vec<FilterDimension> {
    profile
        .dimensions
        .iter()
        .map(|b| b.dimension)
        .filter(|d| changed != Some(ChangedControl::Dimension(*d)))
        .collect()
}

/// A rebuilt `<select>`: the leading "All" option (value `""`) is implied
/// and kept as-is, `options` follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
    pub dimension: FilterDimension,
    pub options: Vec<String>,
    /// Value to select; empty selects "All"
    pub selected: String,
}

impl Dropdown {
    /// Options in alphabetical order, keeping `previous` selected when it
    /// is still offered.
    pub fn rebuild(dimension: FilterDimension, values: &BTreeSet<String>, previous: &str) -> Self {
        let selected = if values.contains(previous) {
            previous.to_string()
        } else {
            String::new()
        };
        Self {
            dimension,
            options: values.iter().cloned().collect(),
            selected,
        }
    }

    /// Whether rebuilding dropped a non-empty selection back to "All".
    pub fn dropped_selection(&self, previous: &str) -> bool {
        !previous.is_empty() && self.selected.is_empty()
    }
}

/// Rebuild the dropdowns selected by [`dimensions_to_rebuild`].
pub fn rebuild_dropdowns(
    model: &TableModel,
    filters: &FilterState,
    profile: &TableProfile,
    changed: Option<ChangedControl>,
) -> Vec<Dropdown> {
    let sets = available_options(model, filters, profile);
    let empty = BTreeSet::new();
    dimensions_to_rebuild(profile, changed)
        .into_iter()
        .map(|d| Dropdown::rebuild(d, sets.get(&d).unwrap_or(&empty), filters.value(d)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuild_keeps_existing_selection() {
        let values: BTreeSet<String> = ["B".to_string(), "A".to_string()].into();
        let dropdown = Dropdown::rebuild(FilterDimension::Bin, &values, "B");
        assert_eq!(dropdown.options, vec!["A", "B"]);
        assert_eq!(dropdown.selected, "B");
        assert!(!dropdown.dropped_selection("B"));
    }

    #[test]
    fn test_rebuild_falls_back_to_all() {
        let values: BTreeSet<String> = ["A".to_string()].into();
        let dropdown = Dropdown::rebuild(FilterDimension::Bin, &values, "Z");
        assert_eq!(dropdown.selected, "");
        assert!(dropdown.dropped_selection("Z"));
        assert!(!dropdown.dropped_selection(""));
    }

    #[test]
    fn test_rebuild_policy() {
        let profile = TableProfile::inventory_with_status();
        assert_eq!(
            dimensions_to_rebuild(&profile, None),
            vec![
                FilterDimension::Part,
                FilterDimension::Bin,
                FilterDimension::Status
            ]
        );
        assert_eq!(
            dimensions_to_rebuild(&profile, Some(ChangedControl::TextSearch)).len(),
            3
        );
        assert_eq!(
            dimensions_to_rebuild(
                &profile,
                Some(ChangedControl::Dimension(FilterDimension::Bin))
            ),
            vec![FilterDimension::Part, FilterDimension::Status]
        );
    }
}
