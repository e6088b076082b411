// DOM contract of the services page - these ids and selectors are rendered by
// the server-side template and are the single source of truth for lookups.
pub const FORM_SELECTOR: &str = "form.form";
pub const TIME_INPUT_ID: &str = "timeInput";
pub const SUBMIT_BUTTON_ID: &str = "submitButton";
pub const CLEAR_BUTTON_ID: &str = "clearButton";
pub const SET_TIME_BUTTON_ID: &str = "setTime";
pub const TOGGLE_ALL_ID: &str = "toggleAll";
pub const ERROR_BOX_ID: &str = "errorBox";
pub const ERROR_CONTENT_ID: &str = "errorContent";
pub const USER_INPUT_ID: &str = "userInput";
pub const MESSAGE_INPUT_ID: &str = "messageInput";
pub const SERVICES_LIST_ID: &str = "services-list";
pub const ROW_SELECTOR: &str = "table tbody tr";
pub const ROW_CHECKBOX_SELECTOR: &str = "input[type=checkbox]";
pub const SEARCH_INPUT_SELECTOR: &str = "input.search";

// Checkbox `name` prefix the server uses to recover selected service ids.
pub const SERVICE_FIELD_PREFIX: &str = "service";

// Sortable / filterable columns handed to the list widget.
pub const LIST_VALUE_NAMES: [&str; 3] = ["host_name", "service_description", "plugin_output"];

// Submit button affordance
pub const ACKNOWLEDGE_LABEL: &str = "Acknowledge";
pub const SCHEDULE_LABEL: &str = "Schedule Downtime";
pub const SUCCESS_CLASS: &str = "btn-success";
pub const PRIMARY_CLASS: &str = "btn-primary";
pub const HIDDEN_CLASS: &str = "hidden";

// Validation messages shown in the error banner
pub const NO_SELECTION_MESSAGE: &str = "Select services to apply action to!";
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Please provide a username and message";
pub const PAST_TIME_MESSAGE: &str = "Select a future time to avoid nagios confusion";

// Date picker defaults. The display format must stay parseable by the
// backend, which reads the posted value with `%d-%m-%Y %H:%M`.
pub const DEFAULT_MINUTES_STEP: u32 = 5;
pub const DEFAULT_DATE_FORMAT: &str = "dd-mm-yyyy";
pub const DEFAULT_TIME_FORMAT: &str = "hh:ii";
pub const TIME_FIELD_FORMAT: &str = "%d-%m-%Y %H:%M";

// "Set time" shortcut
pub const DEFAULT_SET_TIME_OFFSET_MINUTES: u32 = 5;
pub const END_OF_DAY_HOUR: u32 = 17;
