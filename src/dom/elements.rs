//! Reading the table and its controls out of the page.

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTableRowElement,
    HtmlTableSectionElement,
};

use crate::config::ElementIds;
use crate::error::{Result, TableError};
use crate::types::{Column, ColumnType, FilterDimension, FilterState};

pub(crate) fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| TableError::Dom("no document".to_string()))
}

/// Element with `id`, cast to `T`.
pub(crate) fn element_by_id<T: JsCast>(doc: &Document, id: &str) -> Result<T> {
    doc.get_element_by_id(id)
        .ok_or_else(|| TableError::Dom(format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| TableError::Dom(format!("element #{id} has an unexpected type")))
}

fn query_all(doc: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = doc
        .query_selector_all(selector)
        .map_err(|_| TableError::Dom(format!("bad selector {selector}")))?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Header cells of the table, in position order.
pub(crate) fn read_columns(doc: &Document, table_selector: &str) -> Result<Vec<Column>> {
    let headers = query_all(doc, &format!("{table_selector} thead th"))?;
    Ok(headers.iter().map(read_column).collect())
}

fn read_column(th: &Element) -> Column {
    let displayed = th
        .dyn_ref::<HtmlElement>()
        .and_then(|el| el.style().get_property_value("display").ok())
        .map_or(true, |display| display != "none");
    Column {
        id: th.get_attribute("data-column-id").unwrap_or_default(),
        label: th.text_content().unwrap_or_default(),
        kind: ColumnType::from_attr(th.get_attribute("data-type").as_deref()),
        sortable: th.class_list().contains("sortable"),
        displayed,
    }
}

/// Sortable header elements, for attaching click handlers and indicators.
pub(crate) fn sortable_headers(doc: &Document, table_selector: &str) -> Result<Vec<Element>> {
    query_all(doc, &format!("{table_selector} .sortable"))
}

/// Body rows and the text of their cells, in page order.
pub(crate) fn read_rows(body: &HtmlTableSectionElement) -> (Vec<HtmlTableRowElement>, Vec<Vec<String>>) {
    let collection = body.rows();
    let rows: Vec<HtmlTableRowElement> = (0..collection.length())
        .filter_map(|i| collection.item(i))
        .filter_map(|el| el.dyn_into::<HtmlTableRowElement>().ok())
        .collect();
    let cells = rows
        .iter()
        .map(|row| {
            let cells = row.cells();
            (0..cells.length())
                .filter_map(|i| cells.item(i))
                .map(|cell| cell.text_content().unwrap_or_default())
                .collect()
        })
        .collect();
    (rows, cells)
}

/// Value of a `<select>` or `<input>`; empty when the control is missing.
pub(crate) fn control_value(doc: &Document, id: &str) -> String {
    let Some(el) = doc.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        return select.value();
    }
    el.dyn_ref::<HtmlInputElement>()
        .map(HtmlInputElement::value)
        .unwrap_or_default()
}

pub(crate) fn set_control_value(doc: &Document, id: &str, value: &str) {
    let Some(el) = doc.get_element_by_id(id) else {
        return;
    };
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        if select.value() != value {
            select.set_value(value);
        }
    } else if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        if input.value() != value {
            input.set_value(value);
        }
    }
}

/// Current values of every filter control the profile declares.
pub(crate) fn read_filters(
    doc: &Document,
    ids: &ElementIds,
    dimensions: &[FilterDimension],
) -> FilterState {
    let mut filters = FilterState {
        text: control_value(doc, &ids.text_search),
        ..FilterState::default()
    };
    for &dimension in dimensions {
        filters.set_value(dimension, control_value(doc, ids.filter_control(dimension)));
    }
    filters
}
