//! dom_utils.rs – thin helper layer over `web-sys` for the services page.
//!
//! Element lookups, show / hide, reading the form into a `FormSnapshot`, and
//! the checkbox tables the selection commands operate on.

use std::cell::RefCell;
use std::collections::BTreeSet;

use chrono::Local;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlInputElement, HtmlTextAreaElement};

use crate::constants::{
    HIDDEN_CLASS, MESSAGE_INPUT_ID, ROW_CHECKBOX_SELECTOR, ROW_SELECTOR, SEARCH_INPUT_SELECTOR,
    TIME_INPUT_ID, USER_INPUT_ID,
};
use crate::models::FormSnapshot;
use crate::scheduling::resolve_scheduled_time;
use crate::selection::CheckboxTable;

/// Remove the `hidden` class so the element becomes visible.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1(HIDDEN_CLASS);
}

pub fn hide(el: &Element) {
    let _ = el.class_list().add_1(HIDDEN_CLASS);
}

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document on window"))
}

/// Fetch an `<input>` element by id; `None` when missing or of another type.
pub fn html_input(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
}

/// Value of a text field that may be an `<input>` or a `<textarea>`.
pub fn field_value(document: &Document, id: &str) -> String {
    let Some(el) = document.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub fn time_value(document: &Document) -> String {
    field_value(document, TIME_INPUT_ID)
}

/// Capture the form as it is right now.
pub fn read_snapshot(document: &Document) -> Result<FormSnapshot, JsValue> {
    let time_value = time_value(document);
    let picker_date = crate::interop::selected_date();
    let scheduled_at = resolve_scheduled_time(picker_date, &time_value, &Local);

    let selected_services = attached_checkboxes(document)?
        .inputs
        .iter()
        .filter(|cb| cb.checked())
        .map(service_identifier)
        .collect::<BTreeSet<_>>();

    Ok(FormSnapshot {
        time_value,
        selected_services,
        username: field_value(document, USER_INPUT_ID),
        message: field_value(document, MESSAGE_INPUT_ID),
        scheduled_at,
    })
}

// The server reads `service<N>` names; fall back to the value attribute for
// markup that puts the id there instead.
fn service_identifier(input: &HtmlInputElement) -> String {
    let name = input.name();
    if name.is_empty() {
        input.value()
    } else {
        name
    }
}

// ---------------------------------------------------------------------------
// Checkbox tables
// ---------------------------------------------------------------------------

/// Row checkboxes backed by live DOM inputs.
pub struct DomCheckboxTable {
    inputs: Vec<HtmlInputElement>,
}

impl CheckboxTable for DomCheckboxTable {
    fn row_count(&self) -> usize {
        self.inputs.len()
    }

    fn is_checked(&self, row: usize) -> bool {
        self.inputs.get(row).map(|cb| cb.checked()).unwrap_or(false)
    }

    fn set_checked(&mut self, row: usize, checked: bool) {
        if let Some(cb) = self.inputs.get(row) {
            cb.set_checked(checked);
        }
    }
}

fn collect_row_checkboxes(document: &Document) -> Result<DomCheckboxTable, JsValue> {
    let rows = document.query_selector_all(ROW_SELECTOR)?;
    let mut inputs = Vec::with_capacity(rows.length() as usize);
    for i in 0..rows.length() {
        let Some(row) = rows.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        if let Some(cb) = row
            .query_selector(ROW_CHECKBOX_SELECTOR)?
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        {
            inputs.push(cb);
        }
    }
    Ok(DomCheckboxTable { inputs })
}

/// Rows currently attached to the table. The list widget detaches rows that
/// do not match the filter, so this is what "toggle all" and the submit check
/// see.
pub fn attached_checkboxes(document: &Document) -> Result<DomCheckboxTable, JsValue> {
    collect_row_checkboxes(document)
}

thread_local! {
    // Row order as rendered by the server. Row indices in messages refer to
    // this list, so re-sorting the table does not shift them.
    static ROW_REGISTRY: RefCell<Vec<HtmlInputElement>> = RefCell::new(Vec::new());
}

/// Remember the server-rendered row order. Call once, before the list widget
/// gets a chance to reorder anything.
pub fn register_rows(document: &Document) -> Result<usize, JsValue> {
    let table = collect_row_checkboxes(document)?;
    let count = table.inputs.len();
    ROW_REGISTRY.with(|reg| *reg.borrow_mut() = table.inputs);
    Ok(count)
}

/// Table over the registered rows, attached or not.
pub fn registered_rows() -> DomCheckboxTable {
    ROW_REGISTRY.with(|reg| DomCheckboxTable {
        inputs: reg.borrow().clone(),
    })
}

/// Registered row index of the `<tr>` containing `target`.
pub fn row_index_of(target: &EventTarget) -> Option<usize> {
    let el = target.dyn_ref::<Element>()?;
    let row = el.closest("tr").ok()??;
    ROW_REGISTRY.with(|reg| {
        reg.borrow()
            .iter()
            .position(|cb| row.contains(Some(cb.as_ref())))
    })
}

pub fn is_checkbox(target: &EventTarget) -> bool {
    target
        .dyn_ref::<HtmlInputElement>()
        .map(|input| input.type_() == "checkbox")
        .unwrap_or(false)
}

pub fn is_search_input(target: &EventTarget) -> bool {
    target
        .dyn_ref::<Element>()
        .and_then(|el| el.matches(SEARCH_INPUT_SELECTOR).ok())
        .unwrap_or(false)
}

pub fn is_inside(target: &EventTarget, container: &Element) -> bool {
    target
        .dyn_ref::<web_sys::Node>()
        .map(|node| container.contains(Some(node)))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Browser tests (wasm-pack test --headless --firefox)
// ---------------------------------------------------------------------------
