use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    ACKNOWLEDGE_LABEL, MISSING_CREDENTIALS_MESSAGE, NO_SELECTION_MESSAGE, PAST_TIME_MESSAGE,
    PRIMARY_CLASS, SCHEDULE_LABEL, SUCCESS_CLASS,
};

/// Point-in-time capture of everything the submit check looks at.
///
/// Never stored between events; `dom_utils::read_snapshot` builds a fresh
/// one from the page each time the form is submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub time_value: String,
    pub selected_services: BTreeSet<String>,
    pub username: String,
    pub message: String,
    /// Date resolved from the picker (or the typed field value).
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl FormSnapshot {
    pub fn has_time(&self) -> bool {
        !self.time_value.trim().is_empty()
    }
}

/// Which action the submit button currently advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Affordance {
    /// Empty time field: act on the active problems right now.
    #[default]
    Acknowledge,
    /// Time field filled: schedule a downtime ending at that time.
    ScheduleDowntime,
}

impl Affordance {
    pub fn for_time_value(value: &str) -> Self {
        if value.trim().is_empty() {
            Affordance::Acknowledge
        } else {
            Affordance::ScheduleDowntime
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Affordance::Acknowledge => ACKNOWLEDGE_LABEL,
            Affordance::ScheduleDowntime => SCHEDULE_LABEL,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Affordance::Acknowledge => SUCCESS_CLASS,
            Affordance::ScheduleDowntime => PRIMARY_CLASS,
        }
    }

    /// The class the other state uses, removed when this one is applied.
    pub fn stale_class(&self) -> &'static str {
        match self {
            Affordance::Acknowledge => PRIMARY_CLASS,
            Affordance::ScheduleDowntime => SUCCESS_CLASS,
        }
    }
}

/// The single shared error display above the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBanner {
    pub visible: bool,
    pub text: String,
}

impl ErrorBanner {
    /// Replace whatever was shown before.
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Reasons a submit attempt is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    NoSelection,
    MissingCredentials,
    PastScheduledTime,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ValidationError::NoSelection => NO_SELECTION_MESSAGE,
            ValidationError::MissingCredentials => MISSING_CREDENTIALS_MESSAGE,
            ValidationError::PastScheduledTime => PAST_TIME_MESSAGE,
        };
        f.write_str(text)
    }
}

impl std::error::Error for ValidationError {}

/// Banner text for one or more failures, in check order.
pub fn banner_text(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// What the browser posts once the submit check passes. Built for the debug
/// log; the native form submission carries the same fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub services: Vec<String>,
    pub username: String,
    pub message: String,
    /// End of the downtime window; absent for an acknowledgement.
    pub duration: Option<String>,
}

impl From<&FormSnapshot> for SubmissionPayload {
    fn from(snapshot: &FormSnapshot) -> Self {
        Self {
            services: snapshot.selected_services.iter().cloned().collect(),
            username: snapshot.username.clone(),
            message: snapshot.message.clone(),
            duration: snapshot
                .has_time()
                .then(|| snapshot.time_value.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_time_keeps_acknowledge() {
        assert_eq!(Affordance::for_time_value("   "), Affordance::Acknowledge);
        assert_eq!(
            Affordance::for_time_value("17-10-2026 17:00"),
            Affordance::ScheduleDowntime
        );
    }

    #[test]
    fn banner_overwrites_previous_text() {
        let mut banner = ErrorBanner::default();
        banner.show(ValidationError::NoSelection.to_string());
        banner.show(ValidationError::MissingCredentials.to_string());
        assert!(banner.visible);
        assert_eq!(banner.text, MISSING_CREDENTIALS_MESSAGE);
    }

    #[test]
    fn payload_omits_duration_for_acknowledgements() {
        let snapshot = FormSnapshot {
            selected_services: ["service0".to_string(), "service4".to_string()].into(),
            username: "ops".into(),
            message: "disk replaced".into(),
            ..Default::default()
        };
        let payload = SubmissionPayload::from(&snapshot);
        assert_eq!(payload.services, vec!["service0", "service4"]);
        assert_eq!(payload.duration, None);
    }
}
