//! Browser binding of the table controller.
//!
//! `InventoryTable` reads the server-rendered table into a [`TableModel`],
//! wires the filter controls, sortable headers and export button, and
//! renders every [`crate::controller::RenderPlan`] back onto the page.
//!
//! Event handlers are registered by the constructor; the JavaScript side
//! only has to keep the returned object alive.

mod debounce;
mod elements;
mod export;
mod render;
mod session;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use tracing::Level;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlTableRowElement, HtmlTableSectionElement};

use crate::config::TableConfig;
use crate::controller::TableController;
use crate::dynamic_options::ChangedControl;
use crate::error::Result;
use crate::model::TableModel;
use crate::notice::{Notice, Notifier};

use debounce::Debouncer;
use elements::{document, element_by_id, read_columns, read_filters, read_rows, set_control_value, sortable_headers};
use render::render_plan;
pub use session::WebSessionStore;

/// Shows notices through a page-provided `(message, level)` callback, or
/// `window.alert` when none was given.
#[derive(Clone)]
pub(crate) struct JsNotifier {
    callback: Option<Function>,
}

impl Notifier for JsNotifier {
    fn notify(&self, notice: &Notice) {
        let message = JsValue::from_str(&notice.message);
        match self.callback.as_ref() {
            Some(callback) => {
                let level = JsValue::from_str(notice.level.as_str());
                if callback.call2(&JsValue::NULL, &message, &level).is_err() {
                    tracing::warn!("notice callback threw");
                }
            }
            None => {
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&notice.message);
                }
            }
        }
    }
}

/// State shared by the event handlers
pub(crate) struct SharedState {
    pub(crate) controller: TableController<WebSessionStore>,
    /// Body rows indexed by their row key
    pub(crate) rows: Vec<HtmlTableRowElement>,
    pub(crate) notifier: JsNotifier,
    pub(crate) text_debounce: Option<Debouncer>,
}

#[wasm_bindgen]
pub struct InventoryTable {
    state: Rc<RefCell<SharedState>>,
    #[allow(dead_code)]
    closures: Vec<Closure<dyn FnMut(Event)>>,
}

#[wasm_bindgen]
impl InventoryTable {
    /// Bind to the page's inventory table.
    ///
    /// `config` is an optional `TableConfig`-shaped object; `notify` an
    /// optional `(message, level)` alert function.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, notify: Option<Function>) -> std::result::Result<InventoryTable, JsValue> {
        console_error_panic_hook::set_once();
        crate::logging::init_logging(Level::INFO);

        let config: TableConfig = if config.is_undefined() || config.is_null() {
            TableConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?
        };

        let doc = document()?;
        let columns = read_columns(&doc, &config.elements.table_selector)?;
        let body: HtmlTableSectionElement = element_by_id(&doc, &config.elements.body)?;
        let (rows, cells) = read_rows(&body);
        let mut controller = TableController::new(TableModel::new(columns, cells), config, WebSessionStore::new());

        // Write the restored values into the controls and read them back, so
        // the first pass filters by what the controls actually accepted.
        let restored = controller.restore_state();
        let ids = controller.config().elements.clone();
        let dimensions: Vec<_> = controller
            .config()
            .profile
            .dimensions
            .iter()
            .map(|b| b.dimension)
            .collect();
        for &dimension in &dimensions {
            set_control_value(&doc, ids.filter_control(dimension), restored.value(dimension));
        }
        set_control_value(&doc, &ids.text_search, &restored.text);
        let plan = controller.set_filters(read_filters(&doc, &ids, &dimensions), None);
        render_plan(&doc, controller.config(), &rows, &plan)?;

        let debounce_ms = controller.config().text_debounce_ms;
        let state = Rc::new(RefCell::new(SharedState {
            controller,
            rows,
            notifier: JsNotifier { callback: notify },
            text_debounce: None,
        }));

        {
            let weak_state = Rc::downgrade(&state);
            let callback = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    if let Some(debouncer) = state.borrow_mut().text_debounce.as_mut() {
                        debouncer.fired();
                    }
                    Self::internal_filter_change(&state, Some(ChangedControl::TextSearch));
                }
            }) as Box<dyn FnMut()>);
            state.borrow_mut().text_debounce = Some(Debouncer::new(debounce_ms, callback));
        }

        let mut closures: Vec<Closure<dyn FnMut(Event)>> = Vec::new();

        // Dropdowns
        for &dimension in &dimensions {
            let Some(control) = doc.get_element_by_id(ids.filter_control(dimension)) else {
                continue;
            };
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                Self::internal_filter_change(&state, Some(ChangedControl::Dimension(dimension)));
            }) as Box<dyn FnMut(Event)>);
            listen(&control, "change", closure, &mut closures);
        }

        // Text search, debounced
        if let Some(search) = doc.get_element_by_id(&ids.text_search) {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                if let Some(debouncer) = state.borrow_mut().text_debounce.as_mut() {
                    debouncer.schedule();
                }
            }) as Box<dyn FnMut(Event)>);
            listen(&search, "input", closure, &mut closures);
        }

        // Reset
        if let Some(reset) = doc.get_element_by_id(&ids.reset_button) {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                Self::internal_reset(&state);
            }) as Box<dyn FnMut(Event)>);
            listen(&reset, "click", closure, &mut closures);
        }

        // Sortable headers
        let table_selector = state.borrow().controller.config().elements.table_selector.clone();
        for th in sortable_headers(&doc, &table_selector)? {
            let column_id = th.get_attribute("data-column-id").unwrap_or_default();
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                Self::internal_header_click(&state, &column_id);
            }) as Box<dyn FnMut(Event)>);
            listen(&th, "click", closure, &mut closures);
        }

        // Export
        if let Some(button) = doc.get_element_by_id(&ids.export_button) {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                wasm_bindgen_futures::spawn_local(export::run_export(state.clone()));
            }) as Box<dyn FnMut(Event)>);
            listen(&button, "click", closure, &mut closures);
        }

        tracing::info!("customer inventory table mounted");
        Ok(InventoryTable { state, closures })
    }

    /// Re-read the controls and re-filter, as if the user changed one.
    #[wasm_bindgen(js_name = "applyFilters")]
    pub fn apply_filters(&self) {
        Self::internal_filter_change(&self.state, None);
    }

    #[wasm_bindgen(js_name = "resetFilters")]
    pub fn reset_filters(&self) {
        Self::internal_reset(&self.state);
    }

    /// Sort as if the header of `column_id` was clicked.
    #[wasm_bindgen(js_name = "sortBy")]
    pub fn sort_by(&self, column_id: &str) -> std::result::Result<(), JsValue> {
        Self::handle_header_click(&self.state, column_id).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = "exportVisibleDataToXlsx")]
    pub fn export_visible_data_to_xlsx(&self) {
        wasm_bindgen_futures::spawn_local(export::run_export(self.state.clone()));
    }

    /// The "Showing X of Y rows" text.
    #[wasm_bindgen(js_name = "rowCountText")]
    pub fn row_count_text(&self) -> String {
        self.state.borrow().controller.row_count().to_string()
    }

    #[wasm_bindgen(js_name = "visibleRowCount")]
    pub fn visible_row_count(&self) -> usize {
        self.state.borrow().controller.row_count().visible
    }
}

impl InventoryTable {
    fn internal_filter_change(state: &Rc<RefCell<SharedState>>, changed: Option<ChangedControl>) {
        if let Err(e) = Self::handle_filter_change(state, changed) {
            tracing::error!(error = %e, "filter update failed");
        }
    }

    fn handle_filter_change(
        state: &Rc<RefCell<SharedState>>,
        changed: Option<ChangedControl>,
    ) -> Result<()> {
        let doc = document()?;
        let mut guard = state.borrow_mut();
        let s = &mut *guard;
        let config = s.controller.config();
        let dimensions: Vec<_> = config.profile.dimensions.iter().map(|b| b.dimension).collect();
        let filters = read_filters(&doc, &config.elements, &dimensions);
        let plan = s.controller.set_filters(filters, changed);
        render_plan(&doc, s.controller.config(), &s.rows, &plan)
    }

    fn internal_reset(state: &Rc<RefCell<SharedState>>) {
        let result = document().and_then(|doc| {
            let mut guard = state.borrow_mut();
            let s = &mut *guard;
            let plan = s.controller.reset_filters();
            render_plan(&doc, s.controller.config(), &s.rows, &plan)
        });
        if let Err(e) = result {
            tracing::error!(error = %e, "filter reset failed");
        }
    }

    fn internal_header_click(state: &Rc<RefCell<SharedState>>, column_id: &str) {
        if let Err(e) = Self::handle_header_click(state, column_id) {
            tracing::error!(error = %e, column = column_id, "sort failed");
        }
    }

    /// Headers are re-read first so the clicked column's position and type
    /// come from the live table.
    fn handle_header_click(state: &Rc<RefCell<SharedState>>, column_id: &str) -> Result<()> {
        let doc = document()?;
        let mut guard = state.borrow_mut();
        let s = &mut *guard;
        let selector = s.controller.config().elements.table_selector.clone();
        s.controller.refresh_columns(read_columns(&doc, &selector)?);
        let plan = s.controller.click_column(column_id)?;
        render_plan(&doc, s.controller.config(), &s.rows, &plan)
    }
}

fn listen(
    target: &EventTarget,
    event: &str,
    closure: Closure<dyn FnMut(Event)>,
    closures: &mut Vec<Closure<dyn FnMut(Event)>>,
) {
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .ok();
    closures.push(closure);
}
