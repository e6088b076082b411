use std::cell::RefCell;

use web_sys::Event;

use crate::config::FormConfig;
use crate::messages::{Command, Message};
use crate::models::{Affordance, ErrorBanner, SubmissionPayload};
use crate::selection::DragSession;
use crate::update::update;

/// Controller state for the services form. Everything here is transient and
/// lives for the page session only.
#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    pub drag: DragSession,
    /// Row already flipped by a pointer-down whose click has not arrived yet.
    pub pending_click_row: Option<usize>,
    pub banner: ErrorBanner,
    pub affordance: Affordance,
    pub config: FormConfig,
    /// Last request that passed validation.
    pub last_payload: Option<SubmissionPayload>,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn dispatch(&mut self, msg: Message) -> Vec<Command> {
        update(self, msg)
    }
}

// We use thread_local to store the controller state
thread_local! {
    pub static CONTROLLER_STATE: RefCell<ControllerState> =
        RefCell::new(ControllerState::with_config(crate::config::current()));
}

/// Dispatch from code that is not handling a cancellable DOM event.
pub fn dispatch_global_message(msg: Message) {
    dispatch_event_message(msg, None);
}

/// Dispatch while handling `event`, so `Command::PreventDefault` can cancel
/// it. Commands run after the state borrow is dropped, which lets executors
/// dispatch follow-up messages.
pub fn dispatch_event_message(msg: Message, event: Option<&Event>) {
    let commands = CONTROLLER_STATE.with(|state| state.borrow_mut().dispatch(msg));

    for cmd in commands {
        if let Err(e) = crate::command_executors::execute(cmd, event) {
            web_sys::console::error_1(&format!("Failed to execute command: {:?}", e).into());
        }
    }
}
