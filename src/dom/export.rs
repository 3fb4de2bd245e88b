//! Posting the export request and downloading the spreadsheet.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, HtmlAnchorElement, HtmlButtonElement, Headers, Request, RequestInit,
    Response, Url,
};

use super::elements::{document, element_by_id, read_columns};
use super::SharedState;
use crate::error::{describe_js, Result, TableError};
use crate::export::{interpret_response, BusyControl, BusyGuard, ExportFile, ExportRequest, ExportResponse};
use crate::notice::{Notice, Notifier};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

struct ButtonControl(HtmlButtonElement);

impl BusyControl for ButtonControl {
    fn set_busy(&self, busy: bool, label: &str) {
        self.0.set_disabled(busy);
        self.0.set_text_content(Some(label));
    }
}

fn network(e: &JsValue) -> TableError {
    TableError::Network(describe_js(e))
}

fn dom(e: &JsValue) -> TableError {
    TableError::Dom(describe_js(e))
}

/// Export the visible rows. The export button stays disabled until the
/// request settles, whatever the outcome.
pub(crate) async fn run_export(state: Rc<RefCell<SharedState>>) {
    let (prepared, guard, default_filename, notifier) = {
        let mut s = state.borrow_mut();
        let doc = match document() {
            Ok(doc) => doc,
            Err(e) => {
                tracing::error!(error = %e, "export aborted");
                return;
            }
        };
        let selector = s.controller.config().elements.table_selector.clone();
        if let Ok(columns) = read_columns(&doc, &selector) {
            s.controller.refresh_columns(columns);
        }
        let config = s.controller.config();
        let guard = element_by_id::<HtmlButtonElement>(&doc, &config.elements.export_button)
            .ok()
            .map(|button| {
                BusyGuard::new(
                    ButtonControl(button),
                    &config.export_busy_label,
                    &config.export_idle_label,
                )
            });
        (
            s.controller.prepare_export(),
            guard,
            config.default_export_filename.clone(),
            s.notifier.clone(),
        )
    };

    let outcome = match prepared {
        Ok(request) => match post(&request).await {
            Ok(response) => interpret_response(response, &default_filename),
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    let result = outcome.and_then(|file| download(&file).map(|()| file.filename));
    match result {
        Ok(filename) => tracing::info!(%filename, "export downloaded"),
        Err(e) => {
            if !matches!(e, TableError::NoVisibleRows) {
                tracing::error!(error = %e, "export error");
            }
            notifier.notify(&Notice::for_export_failure(&e));
        }
    }
    drop(guard);
}

async fn post(request: &ExportRequest) -> Result<ExportResponse> {
    let window = web_sys::window().ok_or_else(|| TableError::Dom("no window".to_string()))?;

    let headers = Headers::new().map_err(|e| network(&e))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| network(&e))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&request.body));

    let req = Request::new_with_str_and_init(&request.endpoint, &init).map_err(|e| network(&e))?;
    let value = JsFuture::from(window.fetch_with_request(&req))
        .await
        .map_err(|e| network(&e))?;
    let response: Response = value.dyn_into().map_err(|e| network(&e))?;

    let status = response.status();
    let content_disposition = response
        .headers()
        .get("Content-Disposition")
        .ok()
        .flatten();
    let buffer = JsFuture::from(response.array_buffer().map_err(|e| network(&e))?)
        .await
        .map_err(|e| network(&e))?;

    Ok(ExportResponse {
        status,
        content_disposition,
        body: Uint8Array::new(&buffer).to_vec(),
    })
}

/// Hand the file to the browser through a temporary hidden link.
fn download(file: &ExportFile) -> Result<()> {
    let doc = document()?;
    let body = doc
        .body()
        .ok_or_else(|| TableError::Dom("no body".to_string()))?;

    let bytes = Uint8Array::from(file.bytes.as_slice());
    let parts = Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(XLSX_MIME);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(|e| dom(&e))?;
    let url = Url::create_object_url_with_blob(&blob).map_err(|e| dom(&e))?;

    let anchor: HtmlAnchorElement = doc
        .create_element("a")
        .map_err(|e| dom(&e))?
        .dyn_into()
        .map_err(|_| TableError::Dom("anchor has an unexpected type".to_string()))?;
    let _ = anchor.style().set_property("display", "none");
    anchor.set_href(&url);
    anchor.set_download(&file.filename);

    body.append_child(&anchor).map_err(|e| dom(&e))?;
    anchor.click();
    let _ = Url::revoke_object_url(&url);
    body.remove_child(&anchor).map_err(|e| dom(&e))?;
    Ok(())
}
