// src/update.rs
//
// Reducer for the services form. Pure: reads and mutates `ControllerState`,
// returns the DOM work to do as `Command`s.
//
use crate::config::EnterKeyScope;
use crate::debug_log;
use crate::messages::{Command, Message};
use crate::models::{banner_text, Affordance, SubmissionPayload};
use crate::selection::SelectionOp;
use crate::state::ControllerState;
use crate::validation::validate;

pub fn update(state: &mut ControllerState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    match msg {
        Message::PageLoaded { time_value }
        | Message::TimeInputChanged { time_value }
        | Message::PickerDateSelected { time_value } => {
            sync_affordance(state, &time_value, &mut commands);
        }

        Message::ClearTimeRequested => {
            commands.push(Command::ClearTimeInput);
            sync_affordance(state, "", &mut commands);
        }

        Message::SetTimeRequested { now } => match state.config.set_time.suggest(&now) {
            Some(at) => {
                debug_log!("Set time shortcut ({}) -> {}", state.config.set_time, at);
                commands.push(Command::SelectPickerDate(at));
                commands.push(Command::ResyncAffordance);
            }
            None => {
                debug_log!("Set time shortcut ({}) has no valid time today", state.config.set_time);
            }
        },

        Message::SubmitAttempted { snapshot, now } => {
            match validate(&snapshot, now, &state.config) {
                Ok(()) => {
                    let payload = SubmissionPayload::from(&snapshot);
                    if let Ok(json) = serde_json::to_string(&payload) {
                        debug_log!("Submitting {}", json);
                    }
                    state.last_payload = Some(payload);
                    if state.banner.visible {
                        state.banner.hide();
                        commands.push(Command::RenderBanner(state.banner.clone()));
                    }
                }
                Err(errors) => {
                    debug_log!("Submit blocked: {:?}", errors);
                    commands.push(Command::PreventDefault);
                    state.banner.show(banner_text(&errors));
                    commands.push(Command::RenderBanner(state.banner.clone()));
                }
            }
        }

        Message::ToggleAllRequested => {
            commands.push(Command::Selection(SelectionOp::ToggleAll));
        }

        Message::RowClicked { row, on_checkbox } => {
            // A pointer-down on this row already flipped it; swallow the
            // click that completes the same gesture.
            let already_toggled = state.pending_click_row.take() == Some(row);
            match (on_checkbox, already_toggled) {
                // Cancel the checkbox's own flip so the press stays the
                // only toggle.
                (true, true) => commands.push(Command::PreventDefault),
                (false, false) => commands.push(Command::Selection(SelectionOp::Toggle(row))),
                _ => {}
            }
        }

        Message::RowPointerDown { row, on_checkbox } => {
            state.drag.begin(row);
            debug_log!("Drag session started on row {} (checkbox: {})", row, on_checkbox);
            // Toggle on press even over the checkbox: if the drag ends on
            // another row, no click ever reaches it.
            state.pending_click_row = Some(row);
            commands.push(Command::PreventDefault);
            commands.push(Command::Selection(SelectionOp::Toggle(row)));
        }

        Message::RowPointerEnter { row } => {
            if state.drag.is_dragging() {
                commands.push(Command::Selection(SelectionOp::Toggle(row)));
            }
        }

        Message::PointerReleased { row } => {
            if state.drag.end() {
                debug_log!("Drag session ended");
            }
            // Released over a different row: no click will reach the row
            // that was pressed.
            if row != state.pending_click_row {
                state.pending_click_row = None;
            }
        }

        Message::KeyDown {
            key,
            in_search_input,
            in_form,
        } => {
            let in_scope = match state.config.enter_key_scope {
                EnterKeyScope::SearchInputs => in_search_input,
                EnterKeyScope::WholeForm => in_search_input || in_form,
            };
            if key == "Enter" && in_scope {
                commands.push(Command::PreventDefault);
            }
        }

        Message::ConfigChanged(config) => {
            state.config = config;
        }
    }

    commands
}

fn sync_affordance(state: &mut ControllerState, time_value: &str, commands: &mut Vec<Command>) {
    state.affordance = Affordance::for_time_value(time_value);
    commands.push(Command::RenderAffordance(state.affordance));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::models::{FormSnapshot, ValidationError};
    use crate::validation::ReportMode;
    use chrono::{Duration, Local, TimeZone, Utc};

    fn selections(commands: &[Command]) -> Vec<SelectionOp> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::Selection(op) => Some(*op),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn page_load_renders_acknowledge() {
        let mut state = ControllerState::new();
        let cmds = update(
            &mut state,
            Message::PageLoaded {
                time_value: String::new(),
            },
        );
        assert_eq!(cmds, vec![Command::RenderAffordance(Affordance::Acknowledge)]);
    }

    #[test]
    fn clear_resets_to_acknowledge() {
        let mut state = ControllerState::new();
        update(
            &mut state,
            Message::TimeInputChanged {
                time_value: "17-10-2026 17:00".into(),
            },
        );
        assert_eq!(state.affordance, Affordance::ScheduleDowntime);

        let cmds = update(&mut state, Message::ClearTimeRequested);
        assert_eq!(
            cmds,
            vec![
                Command::ClearTimeInput,
                Command::RenderAffordance(Affordance::Acknowledge)
            ]
        );
    }

    #[test]
    fn set_time_selects_suggestion_then_resyncs() {
        let mut state = ControllerState::new();
        let now = Local.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let cmds = update(&mut state, Message::SetTimeRequested { now });
        assert_eq!(
            cmds,
            vec![
                Command::SelectPickerDate(now + Duration::minutes(5)),
                Command::ResyncAffordance
            ]
        );
    }

    #[test]
    fn blocked_submit_prevents_default_and_shows_banner() {
        let mut state = ControllerState::new();
        let cmds = update(
            &mut state,
            Message::SubmitAttempted {
                snapshot: FormSnapshot::default(),
                now: Utc::now(),
            },
        );
        assert_eq!(cmds[0], Command::PreventDefault);
        assert!(state.banner.visible);
        assert_eq!(state.banner.text, ValidationError::NoSelection.to_string());
        assert_eq!(state.last_payload, None);
    }

    #[test]
    fn all_failures_joins_messages_into_one_banner() {
        let mut state = ControllerState::with_config(FormConfig {
            report_mode: ReportMode::AllFailures,
            ..FormConfig::default()
        });
        update(
            &mut state,
            Message::SubmitAttempted {
                snapshot: FormSnapshot::default(),
                now: Utc::now(),
            },
        );
        assert_eq!(
            state.banner.text,
            "Select services to apply action to! Please provide a username and message"
        );
    }

    #[test]
    fn successful_submit_hides_previous_banner() {
        let mut state = ControllerState::new();
        state.banner.show("stale");
        let snapshot = FormSnapshot {
            selected_services: ["service1".to_string()].into(),
            username: "ops".into(),
            message: "patching".into(),
            ..Default::default()
        };
        let cmds = update(
            &mut state,
            Message::SubmitAttempted {
                snapshot,
                now: Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap(),
            },
        );
        assert!(!cmds.contains(&Command::PreventDefault));
        assert!(!state.banner.visible);
        assert_eq!(
            state.last_payload.as_ref().map(|p| p.services.clone()),
            Some(vec!["service1".to_string()])
        );
    }

    #[test]
    fn row_click_off_checkbox_toggles_that_row() {
        let mut state = ControllerState::new();
        let cmds = update(
            &mut state,
            Message::RowClicked {
                row: 2,
                on_checkbox: false,
            },
        );
        assert_eq!(selections(&cmds), vec![SelectionOp::Toggle(2)]);

        let cmds = update(
            &mut state,
            Message::RowClicked {
                row: 2,
                on_checkbox: true,
            },
        );
        assert!(selections(&cmds).is_empty());
    }

    #[test]
    fn press_and_click_on_same_row_toggles_once() {
        let mut state = ControllerState::new();
        let mut ops = selections(&update(
            &mut state,
            Message::RowPointerDown {
                row: 0,
                on_checkbox: false,
            },
        ));
        ops.extend(selections(&update(
            &mut state,
            Message::PointerReleased { row: Some(0) },
        )));
        ops.extend(selections(&update(
            &mut state,
            Message::RowClicked {
                row: 0,
                on_checkbox: false,
            },
        )));
        assert_eq!(ops, vec![SelectionOp::Toggle(0)]);
    }

    #[test]
    fn hover_without_drag_does_nothing() {
        let mut state = ControllerState::new();
        let cmds = update(&mut state, Message::RowPointerEnter { row: 4 });
        assert!(cmds.is_empty());
    }

    #[test]
    fn drag_reentry_toggles_again() {
        let mut state = ControllerState::new();
        let mut table = vec![false; 3];
        let gesture = [
            Message::RowPointerDown {
                row: 0,
                on_checkbox: false,
            },
            Message::RowPointerEnter { row: 1 },
            Message::RowPointerEnter { row: 0 },
            Message::PointerReleased { row: Some(0) },
        ];
        for msg in gesture {
            for op in selections(&update(&mut state, msg)) {
                op.apply(&mut table);
            }
        }
        assert_eq!(table, vec![false, true, false]);
    }

    #[test]
    fn enter_suppression_follows_scope() {
        let key = |state: &mut ControllerState, in_search_input, in_form| {
            update(
                state,
                Message::KeyDown {
                    key: "Enter".into(),
                    in_search_input,
                    in_form,
                },
            )
        };

        let mut state = ControllerState::new();
        assert_eq!(key(&mut state, true, true), vec![Command::PreventDefault]);
        assert!(key(&mut state, false, true).is_empty());

        update(
            &mut state,
            Message::ConfigChanged(FormConfig {
                enter_key_scope: EnterKeyScope::WholeForm,
                ..FormConfig::default()
            }),
        );
        assert_eq!(key(&mut state, false, true), vec![Command::PreventDefault]);
        assert!(key(&mut state, false, false).is_empty());

        let other = update(
            &mut state,
            Message::KeyDown {
                key: "a".into(),
                in_search_input: true,
                in_form: true,
            },
        );
        assert!(other.is_empty());
    }
}
