use wasm_bindgen::JsValue;
use web_sys::Event;

use crate::constants::{ERROR_BOX_ID, ERROR_CONTENT_ID, SUBMIT_BUTTON_ID, TIME_INPUT_ID};
use crate::dom_utils::{self, hide, show};
use crate::messages::{Command, Message};
use crate::models::{Affordance, ErrorBanner};
use crate::selection::SelectionOp;
use crate::state::dispatch_global_message;
use crate::{interop, warn_log};

/// Perform one command against the page. `event` is the DOM event being
/// handled, if any.
pub fn execute(cmd: Command, event: Option<&Event>) -> Result<(), JsValue> {
    match cmd {
        Command::RenderAffordance(affordance) => render_affordance(affordance),
        Command::RenderBanner(banner) => render_banner(&banner),
        Command::PreventDefault => {
            match event {
                Some(e) => e.prevent_default(),
                None => warn_log!("PreventDefault requested outside an event handler"),
            }
            Ok(())
        }
        Command::Selection(op) => apply_selection(op),
        Command::ClearTimeInput => {
            let document = dom_utils::document()?;
            if let Some(input) = dom_utils::html_input(&document, TIME_INPUT_ID) {
                input.set_value("");
            }
            interop::clear_datepicker();
            Ok(())
        }
        Command::SelectPickerDate(at) => interop::select_date(&at),
        Command::ResyncAffordance => {
            let document = dom_utils::document()?;
            dispatch_global_message(Message::TimeInputChanged {
                time_value: dom_utils::time_value(&document),
            });
            Ok(())
        }
    }
}

fn render_affordance(affordance: Affordance) -> Result<(), JsValue> {
    let document = dom_utils::document()?;
    let Some(button) = document.get_element_by_id(SUBMIT_BUTTON_ID) else {
        return Ok(());
    };
    let classes = button.class_list();
    classes.remove_1(affordance.stale_class())?;
    classes.add_1(affordance.css_class())?;
    button.set_text_content(Some(affordance.label()));
    Ok(())
}

fn render_banner(banner: &ErrorBanner) -> Result<(), JsValue> {
    let document = dom_utils::document()?;
    if let Some(content) = document.get_element_by_id(ERROR_CONTENT_ID) {
        content.set_text_content(Some(&banner.text));
    }
    if let Some(error_box) = document.get_element_by_id(ERROR_BOX_ID) {
        if banner.visible {
            show(&error_box);
        } else {
            hide(&error_box);
        }
    }
    Ok(())
}

// Row-level toggles address the registered (server) order; "toggle all" only
// touches rows the list filter currently shows.
fn apply_selection(op: SelectionOp) -> Result<(), JsValue> {
    match op {
        SelectionOp::Toggle(_) => {
            let mut rows = dom_utils::registered_rows();
            op.apply(&mut rows);
        }
        SelectionOp::ToggleAll => {
            let document = dom_utils::document()?;
            let mut rows = dom_utils::attached_checkboxes(&document)?;
            op.apply(&mut rows);
        }
    }
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn renders_button_and_banner() {
        let document = dom_utils::document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(
            "<button id=\"submitButton\" class=\"btn btn-success\">Acknowledge</button>\
             <div id=\"errorBox\" class=\"hidden\"><span id=\"errorContent\"></span></div>",
        );
        document.body().unwrap().append_child(&root).unwrap();

        execute(Command::RenderAffordance(Affordance::ScheduleDowntime), None).unwrap();
        let button = document.get_element_by_id(SUBMIT_BUTTON_ID).unwrap();
        assert_eq!(button.text_content().as_deref(), Some("Schedule Downtime"));
        assert!(button.class_list().contains("btn-primary"));
        assert!(!button.class_list().contains("btn-success"));

        let mut banner = ErrorBanner::default();
        banner.show("Select services to apply action to!");
        execute(Command::RenderBanner(banner), None).unwrap();
        let error_box = document.get_element_by_id(ERROR_BOX_ID).unwrap();
        assert!(!error_box.class_list().contains("hidden"));
        assert_eq!(
            document
                .get_element_by_id(ERROR_CONTENT_ID)
                .and_then(|el| el.text_content())
                .as_deref(),
            Some("Select services to apply action to!")
        );

        root.remove();
    }
}
