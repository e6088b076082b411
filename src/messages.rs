// src/messages.rs
//
// Everything that can happen on the services page, and the side effects the
// reducer asks for in response.
//
use chrono::{DateTime, Local, Utc};

use crate::config::FormConfig;
use crate::models::{Affordance, ErrorBanner, FormSnapshot};
use crate::selection::SelectionOp;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Time field / submit button sync
    PageLoaded { time_value: String },
    TimeInputChanged { time_value: String },
    PickerDateSelected { time_value: String },
    ClearTimeRequested,
    SetTimeRequested { now: DateTime<Local> },

    // Form submit
    SubmitAttempted {
        snapshot: FormSnapshot,
        now: DateTime<Utc>,
    },

    // Row selection
    ToggleAllRequested,
    RowClicked { row: usize, on_checkbox: bool },
    RowPointerDown { row: usize, on_checkbox: bool },
    RowPointerEnter { row: usize },
    PointerReleased { row: Option<usize> },

    // Keyboard
    KeyDown {
        key: String,
        in_search_input: bool,
        in_form: bool,
    },

    ConfigChanged(FormConfig),
}

/// Side effects produced by `update`. Executed by
/// `command_executors::execute` once the state borrow has been released.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set the submit button label and style.
    RenderAffordance(Affordance),
    /// Write the banner text and show / hide the banner.
    RenderBanner(ErrorBanner),
    /// Cancel the default action of the event being handled.
    PreventDefault,
    /// Flip checkboxes in the services table.
    Selection(SelectionOp),
    /// Empty the time input and drop the picker selection.
    ClearTimeInput,
    /// Programmatically select a date in the picker.
    SelectPickerDate(DateTime<Local>),
    /// Re-read the time field and sync the button from it.
    ResyncAffordance,
}
