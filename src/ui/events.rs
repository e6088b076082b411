//! DOM event wiring for the services form.
//!
//! Each handler turns a raw browser event into a `Message`; the reducer
//! decides what happens. Closures are leaked with `forget()` since the page
//! never tears the form down.

use chrono::{Local, Utc};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, MouseEvent};

use crate::constants::{
    CLEAR_BUTTON_ID, FORM_SELECTOR, ROW_SELECTOR, SET_TIME_BUTTON_ID, TIME_INPUT_ID,
    TOGGLE_ALL_ID,
};
use crate::dom_utils::{self, is_checkbox, row_index_of};
use crate::messages::Message;
use crate::state::{dispatch_event_message, dispatch_global_message};
use crate::warn_log;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Entry point – call once after the rows were registered. Attaches every
/// handler the form needs.
pub fn setup_form_event_handlers(document: &Document, form: &Element) -> Result<(), JsValue> {
    setup_submit_handler(document, form)?;
    setup_time_input_handlers(document)?;
    setup_clear_button_handler(document)?;
    setup_set_time_handler(document)?;
    setup_toggle_all_handler(document)?;
    setup_row_selection_handlers(document)?;
    setup_enter_key_handler(document, form)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Individual handlers
// ---------------------------------------------------------------------------

/// Validation runs before the native POST; a failure cancels it.
fn setup_submit_handler(document: &Document, form: &Element) -> Result<(), JsValue> {
    let document = document.clone();
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
        match dom_utils::read_snapshot(&document) {
            Ok(snapshot) => dispatch_event_message(
                Message::SubmitAttempted {
                    snapshot,
                    now: Utc::now(),
                },
                Some(&e),
            ),
            Err(err) => {
                // Don't post a form we could not check.
                e.prevent_default();
                web_sys::console::error_1(&format!("Failed to read form: {:?}", err).into());
            }
        }
    }));
    form.add_event_listener_with_callback("submit", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// <input id="timeInput"> – keyup and change both resync the button.
fn setup_time_input_handlers(document: &Document) -> Result<(), JsValue> {
    let Some(input) = dom_utils::html_input(document, TIME_INPUT_ID) else {
        warn_log!("#{} not found, submit button will not follow it", TIME_INPUT_ID);
        return Ok(());
    };
    for event_name in ["keyup", "change"] {
        let field = input.clone();
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: Event| {
            dispatch_global_message(Message::TimeInputChanged {
                time_value: field.value(),
            });
        }));
        input.add_event_listener_with_callback(event_name, cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

fn setup_clear_button_handler(document: &Document) -> Result<(), JsValue> {
    if let Some(btn) = document.get_element_by_id(CLEAR_BUTTON_ID) {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: MouseEvent| {
            dispatch_global_message(Message::ClearTimeRequested);
        }));
        btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

/// "Set time" shortcut button.
fn setup_set_time_handler(document: &Document) -> Result<(), JsValue> {
    if let Some(btn) = document.get_element_by_id(SET_TIME_BUTTON_ID) {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: MouseEvent| {
            dispatch_global_message(Message::SetTimeRequested { now: Local::now() });
        }));
        btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

fn setup_toggle_all_handler(document: &Document) -> Result<(), JsValue> {
    if let Some(btn) = document.get_element_by_id(TOGGLE_ALL_ID) {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: MouseEvent| {
            dispatch_global_message(Message::ToggleAllRequested);
        }));
        btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

/// Click / mousedown are delegated from each table; mouseenter does not
/// bubble so it is attached per row. mouseup is watched on the whole
/// document so releasing outside the table still ends the drag.
fn setup_row_selection_handlers(document: &Document) -> Result<(), JsValue> {
    let tables = document.query_selector_all("table")?;
    for i in 0..tables.length() {
        let Some(table) = tables.item(i) else { continue };

        let click = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
            if let Some((row, on_checkbox)) = row_target(e.target()) {
                dispatch_event_message(Message::RowClicked { row, on_checkbox }, Some(&e));
            }
        }));
        table.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        click.forget();

        let down = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
            if e.button() != 0 {
                return;
            }
            if let Some((row, on_checkbox)) = row_target(e.target()) {
                dispatch_event_message(Message::RowPointerDown { row, on_checkbox }, Some(&e));
            }
        }));
        table.add_event_listener_with_callback("mousedown", down.as_ref().unchecked_ref())?;
        down.forget();
    }

    let rows = document.query_selector_all(ROW_SELECTOR)?;
    for i in 0..rows.length() {
        let Some(row_el) = rows.item(i) else { continue };
        let enter = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
            if let Some(row) = e.current_target().as_ref().and_then(row_index_of) {
                dispatch_global_message(Message::RowPointerEnter { row });
            }
        }));
        row_el.add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref())?;
        enter.forget();
    }

    let up = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
        let row = e.target().as_ref().and_then(row_index_of);
        dispatch_global_message(Message::PointerReleased { row });
    }));
    document.add_event_listener_with_callback("mouseup", up.as_ref().unchecked_ref())?;
    up.forget();

    Ok(())
}

fn row_target(target: Option<EventTarget>) -> Option<(usize, bool)> {
    let target = target?;
    let row = row_index_of(&target)?;
    Some((row, is_checkbox(&target)))
}

/// Enter inside a filter box must only filter. Listening on the document
/// covers search inputs outside the form too.
fn setup_enter_key_handler(document: &Document, form: &Element) -> Result<(), JsValue> {
    let form = form.clone();
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: KeyboardEvent| {
        let Some(target) = e.target() else { return };
        let msg = Message::KeyDown {
            key: e.key(),
            in_search_input: dom_utils::is_search_input(&target),
            in_form: dom_utils::is_inside(&target, &form),
        };
        dispatch_event_message(msg, Some(&e));
    }));
    document.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// The submit form, if this page has one.
pub fn find_form(document: &Document) -> Result<Option<Element>, JsValue> {
    document.query_selector(FORM_SELECTOR)
}
