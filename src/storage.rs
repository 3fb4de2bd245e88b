//! Persistence of filter and sort state in session-scoped storage.
//!
//! Stored values are best-effort caches: anything unreadable is discarded
//! and the caller falls back to defaults.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::Result;
use crate::model::TableModel;
use crate::types::{ColumnType, FilterState, SortDirection, SortState};

/// Key/value storage scoped to the browser session.
pub trait SessionStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str);
}

/// In-process store, used natively and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }
}

impl SessionStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

pub fn save_filters(store: &mut dyn SessionStore, key: &str, filters: &FilterState) -> Result<()> {
    let json = serde_json::to_string(filters)?;
    store.set_item(key, &json)
}

/// Saved filter controls. Missing or non-string fields read as empty; a
/// value that is not a JSON object is discarded.
pub fn restore_filters(store: &dyn SessionStore, key: &str) -> Option<FilterState> {
    let raw = store.get_item(key)?;
    let value: Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable saved filters");
            return None;
        }
    };
    let obj = value.as_object()?;
    let field = |name: &str| {
        obj.get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Some(FilterState {
        part: field("part"),
        bin: field("bin"),
        status: obj.contains_key("status").then(|| field("status")),
        text: field("text"),
    })
}

pub fn clear_filters(store: &mut dyn SessionStore, key: &str) {
    store.remove_item(key);
}

pub fn save_sort(store: &mut dyn SessionStore, key: &str, state: &SortState) -> Result<()> {
    let json = serde_json::to_string(state)?;
    store.set_item(key, &json)
}

/// Saved sort state re-derived against the live headers, or the default
/// sort when nothing usable is stored.
pub fn restore_sort(
    store: &mut dyn SessionStore,
    key: &str,
    model: &TableModel,
    default_column: &str,
) -> SortState {
    let default = || SortState::default_for(model, default_column);

    let Some(raw) = store.get_item(key) else {
        return default();
    };

    let value: Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "could not parse saved sort state");
            store.remove_item(key);
            return default();
        }
    };

    // Only `column` and `direction` are trusted; position and type are
    // re-derived from the live headers.
    let Some(obj) = value
        .as_object()
        .filter(|o| o.contains_key("column") && o.contains_key("direction"))
    else {
        tracing::warn!("saved sort state is incomplete, using default");
        return default();
    };

    let column = obj.get("column").and_then(Value::as_str);
    let direction = match obj.get("direction").and_then(Value::as_str) {
        Some("asc") => Some(SortDirection::Asc),
        Some("desc") => Some(SortDirection::Desc),
        _ => None,
    };
    let (Some(column), Some(direction)) = (column, direction) else {
        tracing::warn!("saved sort state is invalid, using default");
        return default();
    };

    let saved = SortState {
        column: column.to_string(),
        direction,
        column_index: 0,
        column_type: ColumnType::default(),
    };

    match saved.resolved(model) {
        Some(state) => state,
        None => {
            tracing::warn!(column = %saved.column, "saved sort column header not found, reverting to default");
            default()
        }
    }
}
