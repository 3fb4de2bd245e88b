//! Structured error types for the inventory table.
//!
//! Every user action ends in either a rendered plan or one of these errors;
//! nothing is retried.

/// All errors that can occur while driving the inventory table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Persisted state could not be (de)serialized.
    #[error("State JSON: {0}")]
    StateJson(#[from] serde_json::Error),

    /// A column id that no header carries.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Export was requested while no rows are visible.
    #[error("No data currently visible to export.")]
    NoVisibleRows,

    /// The export endpoint answered with a non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The export request never produced a response.
    #[error("{0}")]
    Network(String),

    /// A required element is missing or has the wrong type.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Session storage rejected a write.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(target_arch = "wasm32")]
impl From<TableError> for wasm_bindgen::JsValue {
    fn from(e: TableError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

/// Describe a thrown JavaScript value for logs and notices.
#[cfg(target_arch = "wasm32")]
pub(crate) fn describe_js(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}
