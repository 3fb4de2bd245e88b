//! inventory-table - customer inventory table controller for the web
//!
//! Adds client-side behavior to a server-rendered inventory table:
//! - Exact-match dropdown filters and debounced free-text search
//! - Dropdown options that narrow to values still reachable
//! - Typed column sorting (text, numeric, `MM/DD/YYYY` dates)
//! - Filter and sort state kept in session storage across page loads
//! - Export of the visible, sorted rows to a spreadsheet via the server
//!
//! The filtering, sorting and export logic works on an in-memory row model
//! and runs natively; the `dom` module binds it to the page under
//! WebAssembly.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { InventoryTable } from 'inventory-table';
//! await init();
//! const table = new InventoryTable({}, dtUtils.showAlert);
//! ```

pub mod config;
pub mod controller;
pub mod dynamic_options;
pub mod error;
pub mod export;
pub mod filter;
pub mod logging;
pub mod model;
pub mod notice;
pub mod sort;
pub mod storage;
pub mod types;

// Browser binding
#[cfg(target_arch = "wasm32")]
pub mod dom;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use dom::InventoryTable;

pub use config::TableConfig;
pub use controller::{RenderPlan, TableController};
pub use error::{Result, TableError};
pub use model::{TableModel, TableSnapshot};
pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
