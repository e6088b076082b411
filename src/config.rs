//! Controller configuration.
//!
//! The defaults reproduce the stricter behaviour of the services page.  They
//! can be overridden at build time through `MASS_SCHEDULER_*` environment
//! variables (read with `option_env!`, so nothing is looked up at runtime)
//! and again at page load through `init_form_config_js()` (a plain JS object)
//! or `init_form_config_json()` (the same object as a JSON string), both using
//! the camelCase field names below.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::constants::{DEFAULT_DATE_FORMAT, DEFAULT_MINUTES_STEP, DEFAULT_TIME_FORMAT};
use crate::scheduling::SetTimePolicy;
use crate::validation::ReportMode;

/// Where an Enter keypress is stopped from submitting the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnterKeyScope {
    /// Only the list filter inputs.
    #[default]
    SearchInputs,
    /// Any field inside the form, filter inputs included.
    WholeForm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    /// Block submits whose downtime end is not strictly in the future.
    pub require_future_time: bool,
    pub report_mode: ReportMode,
    pub set_time: SetTimePolicy,
    pub minutes_step: u32,
    pub enter_key_scope: EnterKeyScope,
    pub date_format: String,
    pub time_format: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            require_future_time: true,
            report_mode: ReportMode::default(),
            set_time: SetTimePolicy::default(),
            minutes_step: DEFAULT_MINUTES_STEP,
            enter_key_scope: EnterKeyScope::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl FormConfig {
    /// Defaults plus whatever was baked in at compile time.
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(
            option_env!("MASS_SCHEDULER_REQUIRE_FUTURE_TIME"),
            option_env!("MASS_SCHEDULER_REPORT_MODE"),
            option_env!("MASS_SCHEDULER_SET_TIME"),
        );
        config
    }

    /// Apply string overrides. Unrecognised values are ignored so a typo in a
    /// build variable never breaks the page.
    pub fn apply_overrides(
        &mut self,
        require_future_time: Option<&str>,
        report_mode: Option<&str>,
        set_time: Option<&str>,
    ) {
        if let Some(flag) = require_future_time {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.require_future_time = true,
                "0" | "false" | "no" | "off" => self.require_future_time = false,
                _ => {}
            }
        }

        if let Some(mode) = report_mode {
            match mode.trim().to_ascii_lowercase().as_str() {
                "first" | "first-failure" => self.report_mode = ReportMode::FirstFailure,
                "all" | "all-failures" => self.report_mode = ReportMode::AllFailures,
                _ => {}
            }
        }

        if let Some(policy) = set_time {
            let policy = policy.trim();
            if policy.eq_ignore_ascii_case("end-of-day") {
                self.set_time = SetTimePolicy::end_of_day();
            } else if let Ok(minutes) = policy.parse::<u32>() {
                self.set_time = SetTimePolicy::MinutesFromNow(minutes);
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

thread_local! {
    static FORM_CONFIG: RefCell<FormConfig> = RefCell::new(FormConfig::from_build_env());
}

/// Current configuration (cloned, it is small).
pub fn current() -> FormConfig {
    FORM_CONFIG.with(|cfg| cfg.borrow().clone())
}

pub fn set_current(config: FormConfig) {
    FORM_CONFIG.with(|cfg| *cfg.borrow_mut() = config);
}

/// Runtime override from the hosting page:
///
/// ```js
/// init_form_config_js({ reportMode: "allFailures", setTime: { todayAt: { hour: 17, minute: 0 } } });
/// ```
///
/// Missing fields keep their defaults. The running controller and the date
/// picker pick up the new values immediately.
#[wasm_bindgen]
pub fn init_form_config_js(config: JsValue) -> Result<(), JsValue> {
    let config: FormConfig = serde_wasm_bindgen::from_value(config)?;
    apply_runtime_config(config)
}

/// Same as `init_form_config_js`, for pages that embed the settings as a
/// JSON string (e.g. a `data-config` attribute rendered by the template).
#[wasm_bindgen]
pub fn init_form_config_json(json: &str) -> Result<(), JsValue> {
    let config = FormConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    apply_runtime_config(config)
}

fn apply_runtime_config(config: FormConfig) -> Result<(), JsValue> {
    web_sys::console::log_1(&format!("Form config updated: {:?}", config).into());

    set_current(config.clone());
    crate::interop::reconfigure_datepicker(&config)?;
    crate::state::dispatch_global_message(crate::messages::Message::ConfigChanged(config));
    Ok(())
}
