//! Bindings to the page's JavaScript widgets.
//!
//! * air-datepicker, a jQuery plugin: `$(el).datepicker(opts).data('datepicker')`
//! * List.js: `new List(containerId, { valueNames })`
//!
//! Both are loaded by the page template before this module. Every entry
//! point uses `catch` so a missing script surfaces as an `Err` instead of a
//! wasm trap.

use std::cell::RefCell;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::FormConfig;
use crate::constants::{LIST_VALUE_NAMES, SERVICES_LIST_ID, TIME_INPUT_ID};
use crate::scheduling::{from_js_millis, to_js_millis};

#[wasm_bindgen]
extern "C" {
    pub type JQuery;

    #[wasm_bindgen(catch, js_name = "jQuery")]
    fn jquery(selector: &str) -> Result<JQuery, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn datepicker(this: &JQuery, options: &JsValue) -> Result<JQuery, JsValue>;

    #[wasm_bindgen(method)]
    fn data(this: &JQuery, key: &str) -> JsValue;

    pub type AirDatepicker;

    #[wasm_bindgen(method, getter = selectedDates)]
    fn selected_dates(this: &AirDatepicker) -> js_sys::Array;

    #[wasm_bindgen(method, js_name = selectDate)]
    fn select_date(this: &AirDatepicker, date: &js_sys::Date);

    #[wasm_bindgen(method)]
    fn clear(this: &AirDatepicker);

    #[wasm_bindgen(method, catch)]
    fn update(this: &AirDatepicker, options: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = List)]
    pub type ServiceList;

    #[wasm_bindgen(constructor, catch, js_class = "List")]
    fn new(container_id: &str, options: &JsValue) -> Result<ServiceList, JsValue>;
}

/// Serialisable part of the picker options. `minDate` and `onSelect` are
/// JS objects and get attached separately.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PickerOptions<'a> {
    minutes_step: u32,
    timepicker: bool,
    date_format: &'a str,
    time_format: &'a str,
}

impl<'a> From<&'a FormConfig> for PickerOptions<'a> {
    fn from(config: &'a FormConfig) -> Self {
        Self {
            minutes_step: config.minutes_step,
            timepicker: true,
            date_format: &config.date_format,
            time_format: &config.time_format,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListOptions {
    value_names: [&'static str; 3],
}

thread_local! {
    static DATEPICKER: RefCell<Option<AirDatepicker>> = RefCell::new(None);
}

fn picker_options(config: &FormConfig) -> Result<JsValue, JsValue> {
    let options = serde_wasm_bindgen::to_value(&PickerOptions::from(config))?;
    // No scheduling in the past.
    js_sys::Reflect::set(&options, &"minDate".into(), &js_sys::Date::new_0())?;
    Ok(options)
}

/// Attach the picker to the time input. `on_select` receives the formatted
/// field text every time the selection changes.
pub fn init_datepicker<F>(config: &FormConfig, on_select: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    let options = picker_options(config)?;
    let cb = Closure::<dyn FnMut(String)>::wrap(Box::new(on_select));
    js_sys::Reflect::set(&options, &"onSelect".into(), cb.as_ref())?;
    cb.forget();

    let input = jquery(&format!("#{}", TIME_INPUT_ID))?;
    let instance = input.datepicker(&options)?.data("datepicker");
    if instance.is_undefined() || instance.is_null() {
        return Err(JsValue::from_str("datepicker plugin did not attach"));
    }

    DATEPICKER.with(|dp| *dp.borrow_mut() = Some(instance.unchecked_into()));
    Ok(())
}

/// Push changed options into a running picker; a no-op before it exists.
pub fn reconfigure_datepicker(config: &FormConfig) -> Result<(), JsValue> {
    let options = picker_options(config)?;
    DATEPICKER.with(|dp| match dp.borrow().as_ref() {
        Some(picker) => picker.update(&options),
        None => Ok(()),
    })
}

/// First selected date, if the picker is attached and has one.
pub fn selected_date() -> Option<DateTime<Utc>> {
    DATEPICKER.with(|dp| {
        let dp = dp.borrow();
        let first = dp.as_ref()?.selected_dates().get(0);
        let date = first.dyn_into::<js_sys::Date>().ok()?;
        from_js_millis(date.get_time())
    })
}

pub fn select_date(at: &DateTime<Local>) -> Result<(), JsValue> {
    let date = js_sys::Date::new(&JsValue::from_f64(to_js_millis(at)));
    DATEPICKER.with(|dp| match dp.borrow().as_ref() {
        Some(picker) => {
            picker.select_date(&date);
            Ok(())
        }
        None => Err(JsValue::from_str("datepicker not initialised")),
    })
}

pub fn clear_datepicker() {
    DATEPICKER.with(|dp| {
        if let Some(picker) = dp.borrow().as_ref() {
            picker.clear();
        }
    });
}

/// Hand the services table to List.js for filtering and sorting.
pub fn init_service_list() -> Result<ServiceList, JsValue> {
    let options = serde_wasm_bindgen::to_value(&ListOptions {
        value_names: LIST_VALUE_NAMES,
    })?;
    ServiceList::new(SERVICES_LIST_ID, &options)
}
