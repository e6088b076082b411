use wasm_bindgen::prelude::*;

mod macros;

pub mod command_executors;
pub mod config;
pub mod constants;
pub mod dom_utils;
pub mod interop;
pub mod messages;
pub mod models;
pub mod scheduling;
pub mod selection;
pub mod state;
pub mod ui;
pub mod update;
pub mod validation;

use messages::Message;

// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let document = dom_utils::document()?;

    // Loaded on a page without the services form: nothing to do.
    let Some(form) = ui::events::find_form(&document)? else {
        web_sys::console::log_1(&"No services form on this page".into());
        return Ok(());
    };

    // Capture row order before the list widget sorts anything.
    let rows = dom_utils::register_rows(&document)?;
    web_sys::console::log_1(&format!("Services form: {} rows", rows).into());

    // The widgets are optional; the form still validates without them.
    if let Err(e) = interop::init_service_list() {
        web_sys::console::warn_1(&format!("List filtering unavailable: {:?}", e).into());
    }

    let config = config::current();
    let on_select = |time_value: String| {
        state::dispatch_global_message(Message::PickerDateSelected { time_value });
    };
    if let Err(e) = interop::init_datepicker(&config, on_select) {
        web_sys::console::warn_1(&format!("Date picker unavailable: {:?}", e).into());
    }

    ui::events::setup_form_event_handlers(&document, &form)?;

    // Set the current button state
    state::dispatch_global_message(Message::PageLoaded {
        time_value: dom_utils::time_value(&document),
    });

    Ok(())
}
