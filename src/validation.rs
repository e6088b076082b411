//! Submit-time checks.  Runs synchronously inside the form's submit handler;
//! a non-empty error list means the native submission is cancelled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::FormConfig;
use crate::models::{FormSnapshot, ValidationError};

/// How many failures one submit attempt reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportMode {
    /// Stop at the first failing check.
    #[default]
    FirstFailure,
    /// Run every check and report all failures together.
    AllFailures,
}

/// Checks, in order:
///
/// 1. at least one service selected
/// 2. username and message both filled in
/// 3. a filled-in time resolves to an instant strictly after `now`
///    (skipped when `require_future_time` is off)
pub fn validate(
    snapshot: &FormSnapshot,
    now: DateTime<Utc>,
    config: &FormConfig,
) -> Result<(), Vec<ValidationError>> {
    // All checks are pure; the report mode only limits how many failures
    // are returned.
    let outcomes = [
        check_selection(snapshot),
        check_credentials(snapshot),
        if config.require_future_time {
            check_future_time(snapshot, now)
        } else {
            None
        },
    ];

    let failures = outcomes.into_iter().flatten();
    let errors: Vec<ValidationError> = match config.report_mode {
        ReportMode::FirstFailure => failures.take(1).collect(),
        ReportMode::AllFailures => failures.collect(),
    };

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_selection(snapshot: &FormSnapshot) -> Option<ValidationError> {
    snapshot
        .selected_services
        .is_empty()
        .then_some(ValidationError::NoSelection)
}

fn check_credentials(snapshot: &FormSnapshot) -> Option<ValidationError> {
    let missing = snapshot.username.trim().is_empty() || snapshot.message.trim().is_empty();
    missing.then_some(ValidationError::MissingCredentials)
}

// A filled-in field that resolves to no instant at all cannot be confirmed
// as future and fails the same way a past time does.
fn check_future_time(snapshot: &FormSnapshot, now: DateTime<Utc>) -> Option<ValidationError> {
    if !snapshot.has_time() {
        return None;
    }
    match snapshot.scheduled_at {
        Some(at) if at > now => None,
        _ => Some(ValidationError::PastScheduledTime),
    }
}
