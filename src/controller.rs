//! The table controller: filter, sort and export state threaded through
//! every user action.
//!
//! Each handler takes the current state, updates the row model and returns
//! a [`RenderPlan`] describing what the page should show. Nothing here
//! touches the DOM, which keeps the controller usable natively.

use crate::config::TableConfig;
use crate::dynamic_options::{rebuild_dropdowns, ChangedControl, Dropdown};
use crate::error::Result;
use crate::export::{build_payload, interpret_response, ExportFile, ExportRequest, ExportResponse};
use crate::filter::{apply_filters, RowCount};
use crate::model::TableModel;
use crate::sort::{header_indicators, sort_rows, HeaderIndicator};
use crate::storage::{self, SessionStore};
use crate::types::{Column, FilterDimension, FilterState, HeaderRef, SortState};

/// Visibility of one row in the rendered order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowView {
    pub key: usize,
    pub hidden: bool,
}

/// Everything the page needs to reflect the controller's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    /// All rows, in display order
    pub rows: Vec<RowView>,
    pub row_count: RowCount,
    pub indicators: Vec<HeaderIndicator>,
    /// Dropdowns whose options must be replaced
    pub dropdowns: Vec<Dropdown>,
    /// Values the filter controls should hold
    pub filters: FilterState,
}

impl RenderPlan {
    /// Keys of the rows that are shown, in display order.
    pub fn visible_keys(&self) -> Vec<usize> {
        self.rows
            .iter()
            .filter(|r| !r.hidden)
            .map(|r| r.key)
            .collect()
    }
}

pub struct TableController<S: SessionStore> {
    model: TableModel,
    config: TableConfig,
    store: S,
    filters: FilterState,
    sort: SortState,
    row_count: RowCount,
}

impl<S: SessionStore> TableController<S> {
    pub fn new(model: TableModel, config: TableConfig, store: S) -> Self {
        let sort = SortState::default_for(&model, &config.default_sort_column);
        let filters = Self::normalize(&config, FilterState::default());
        let row_count = RowCount {
            visible: model.visible_rows().count(),
            total: model.len(),
        };
        Self {
            model,
            config,
            store,
            filters,
            sort,
            row_count,
        }
    }

    /// Restore persisted filters and sort, then run the first filter pass.
    pub fn initialize(&mut self) -> RenderPlan {
        self.restore_state();
        self.run_filters(None)
    }

    /// Load persisted filters and sort without filtering. Returns the
    /// restored control values so a page can write them into its controls
    /// before the first pass.
    pub fn restore_state(&mut self) -> FilterState {
        let restored = storage::restore_filters(&self.store, &self.config.filter_storage_key)
            .unwrap_or_default();
        self.filters = Self::normalize(&self.config, restored);
        self.sort = storage::restore_sort(
            &mut self.store,
            &self.config.sort_storage_key,
            &self.model,
            &self.config.default_sort_column,
        );
        tracing::info!(
            rows = self.model.len(),
            sort = %self.sort.column,
            "inventory table state restored"
        );
        self.filters.clone()
    }

    /// Apply new control values; `changed` names the control the user
    /// touched.
    pub fn set_filters(
        &mut self,
        filters: FilterState,
        changed: Option<ChangedControl>,
    ) -> RenderPlan {
        self.filters = Self::normalize(&self.config, filters);
        self.run_filters(changed)
    }

    /// Clear every control, drop the persisted filters and re-apply.
    pub fn reset_filters(&mut self) -> RenderPlan {
        self.filters = self.filters.cleared();
        storage::clear_filters(&mut self.store, &self.config.filter_storage_key);
        self.run_filters(None)
    }

    /// Sort by a clicked header, read from the live table.
    pub fn click_header(&mut self, header: &HeaderRef) -> RenderPlan {
        self.sort = self.sort.clicked(header);
        sort_rows(&mut self.model, &self.sort, self.config.profile.min_cells);
        if let Err(e) = storage::save_sort(&mut self.store, &self.config.sort_storage_key, &self.sort)
        {
            tracing::warn!(error = %e, "could not persist sort state");
        }
        self.plan(Vec::new())
    }

    /// Sort by a column id, resolving its header in the model.
    pub fn click_column(&mut self, column_id: &str) -> Result<RenderPlan> {
        let header = self.model.require_sortable_header(column_id)?;
        Ok(self.click_header(&header))
    }

    /// Adopt the live headers before an action that reads them.
    pub fn refresh_columns(&mut self, columns: Vec<Column>) {
        self.model.set_columns(columns);
    }

    /// Build the export request for the rows currently shown.
    ///
    /// # Errors
    /// [`crate::error::TableError::NoVisibleRows`] when nothing is visible.
    pub fn prepare_export(&self) -> Result<ExportRequest> {
        let payload = build_payload(&self.model, &self.config.excluded_export_columns)?;
        tracing::info!(
            headers = payload.headers.len(),
            rows = payload.rows.len(),
            "exporting visible rows"
        );
        payload.to_request(&self.config.export_endpoint)
    }

    pub fn finish_export(&self, response: ExportResponse) -> Result<ExportFile> {
        interpret_response(response, &self.config.default_export_filename)
    }

    pub fn model(&self) -> &TableModel {
        &self.model
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn row_count(&self) -> RowCount {
        self.row_count
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn run_filters(&mut self, changed: Option<ChangedControl>) -> RenderPlan {
        let profile = &self.config.profile;
        self.row_count = apply_filters(&mut self.model, &self.filters, profile);

        let mut dropdowns = Vec::new();
        if profile.dynamic_options {
            // Each pass drops at least one selection, so this settles within
            // one pass per dimension.
            for _ in 0..=profile.dimensions.len() {
                dropdowns = rebuild_dropdowns(&self.model, &self.filters, profile, changed);
                let dropped: Vec<FilterDimension> = dropdowns
                    .iter()
                    .filter(|d| d.dropped_selection(self.filters.value(d.dimension)))
                    .map(|d| d.dimension)
                    .collect();
                if dropped.is_empty() {
                    break;
                }
                for dimension in dropped {
                    tracing::debug!(dimension = dimension.as_str(), "selection no longer offered");
                    self.filters.set_value(dimension, "");
                }
                self.row_count = apply_filters(&mut self.model, &self.filters, profile);
            }
        }

        if let Err(e) =
            storage::save_filters(&mut self.store, &self.config.filter_storage_key, &self.filters)
        {
            tracing::warn!(error = %e, "could not persist filters");
        }

        sort_rows(&mut self.model, &self.sort, profile.min_cells);
        self.plan(dropdowns)
    }

    fn plan(&self, dropdowns: Vec<Dropdown>) -> RenderPlan {
        RenderPlan {
            rows: self
                .model
                .rows()
                .iter()
                .map(|r| RowView {
                    key: r.key,
                    hidden: r.hidden,
                })
                .collect(),
            row_count: self.row_count,
            indicators: header_indicators(self.model.columns(), &self.sort),
            dropdowns,
            filters: self.filters.clone(),
        }
    }

    /// Keep the status slot exactly when the table has a status dropdown.
    fn normalize(config: &TableConfig, mut filters: FilterState) -> FilterState {
        filters.status = if config.profile.has_dimension(FilterDimension::Status) {
            Some(filters.status.unwrap_or_default())
        } else {
            None
        };
        filters
    }
}
