//! Projecting a [`RenderPlan`] onto the page.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlOptionElement, HtmlSelectElement, HtmlTableRowElement, HtmlTableSectionElement};

use super::elements::{element_by_id, set_control_value, sortable_headers};
use crate::config::TableConfig;
use crate::controller::RenderPlan;
use crate::dynamic_options::Dropdown;
use crate::error::{Result, TableError};
use crate::sort::{ASC_CLASS, DESC_CLASS};

pub(crate) const HIDDEN_ROW_CLASS: &str = "hidden-row";

pub(crate) fn render_plan(
    doc: &Document,
    config: &TableConfig,
    rows: &[HtmlTableRowElement],
    plan: &RenderPlan,
) -> Result<()> {
    let ids = &config.elements;
    let body: HtmlTableSectionElement = element_by_id(doc, &ids.body)?;

    for view in &plan.rows {
        let Some(row) = rows.get(view.key) else {
            continue;
        };
        let _ = row.class_list().toggle_with_force(HIDDEN_ROW_CLASS, view.hidden);
        body.append_child(row)
            .map_err(|_| TableError::Dom("could not reorder rows".to_string()))?;
    }

    if let Some(count) = doc.get_element_by_id(&ids.row_count) {
        count.set_text_content(Some(&plan.row_count.to_string()));
    }

    for dropdown in &plan.dropdowns {
        let id = ids.filter_control(dropdown.dimension);
        if let Some(select) = doc
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            rebuild_select(&select, dropdown)?;
        }
    }

    for binding in &config.profile.dimensions {
        set_control_value(
            doc,
            ids.filter_control(binding.dimension),
            plan.filters.value(binding.dimension),
        );
    }
    set_control_value(doc, &ids.text_search, &plan.filters.text);

    render_indicators(doc, config, plan)
}

/// Keep the leading "All" option, replace the rest.
fn rebuild_select(select: &HtmlSelectElement, dropdown: &Dropdown) -> Result<()> {
    while select.length() > 1 {
        select.remove_with_index(1);
    }
    for value in &dropdown.options {
        let option = HtmlOptionElement::new_with_text_and_value(value, value)
            .map_err(|_| TableError::Dom("could not create option".to_string()))?;
        select
            .add_with_html_option_element(&option)
            .map_err(|_| TableError::Dom("could not add option".to_string()))?;
    }
    select.set_value(&dropdown.selected);
    Ok(())
}

fn render_indicators(doc: &Document, config: &TableConfig, plan: &RenderPlan) -> Result<()> {
    for th in sortable_headers(doc, &config.elements.table_selector)? {
        let Ok(Some(indicator)) = th.query_selector(".sort-indicator") else {
            continue;
        };
        let classes = th.class_list();
        let _ = classes.remove_2(ASC_CLASS, DESC_CLASS);
        indicator.set_text_content(Some(""));

        let column_id = th.get_attribute("data-column-id").unwrap_or_default();
        if let Some(mark) = plan.indicators.iter().find(|i| i.column_id == column_id) {
            if let Some(class) = mark.class {
                let _ = classes.add_1(class);
                indicator.set_text_content(Some(mark.glyph));
            }
        }
    }
    Ok(())
}
