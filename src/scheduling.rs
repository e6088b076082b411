//! Time handling for the downtime field.
//!
//! Two jobs: work out what the "set time" shortcut should put into the
//! picker, and turn whatever ends up in the time field into an instant the
//! submit check can compare against "now".  The field text uses the same
//! `%d-%m-%Y %H:%M` layout the backend parses, so a typed value and a
//! picked value are interchangeable.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SET_TIME_OFFSET_MINUTES, END_OF_DAY_HOUR, TIME_FIELD_FORMAT};

/// What the "set time" button suggests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SetTimePolicy {
    /// `now + N` minutes.
    MinutesFromNow(u32),

    /// A fixed wall-clock time on the current day. Not moved to tomorrow
    /// when it has already passed; the submit check reports that instead.
    TodayAt { hour: u32, minute: u32 },
}

impl Default for SetTimePolicy {
    fn default() -> Self {
        SetTimePolicy::MinutesFromNow(DEFAULT_SET_TIME_OFFSET_MINUTES)
    }
}

impl SetTimePolicy {
    pub fn end_of_day() -> Self {
        SetTimePolicy::TodayAt {
            hour: END_OF_DAY_HOUR,
            minute: 0,
        }
    }

    /// Suggested time relative to `now`, in the same zone. `None` when the
    /// wall-clock time does not exist that day (bad hour, DST gap).
    pub fn suggest<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        match *self {
            SetTimePolicy::MinutesFromNow(minutes) => {
                Some(now.clone() + Duration::minutes(i64::from(minutes)))
            }
            SetTimePolicy::TodayAt { hour, minute } => {
                let naive = now.date_naive().and_hms_opt(hour, minute, 0)?;
                now.timezone().from_local_datetime(&naive).earliest()
            }
        }
    }
}

impl fmt::Display for SetTimePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetTimePolicy::MinutesFromNow(n) => {
                write!(f, "{} minute{} from now", n, if *n == 1 { "" } else { "s" })
            }
            SetTimePolicy::TodayAt { hour, minute } => {
                write!(f, "Today at {:02}:{:02}", hour, minute)
            }
        }
    }
}

/// Parse the raw field text in the zone the operator typed it in.
pub fn parse_time_field<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), TIME_FIELD_FORMAT).ok()?;
    tz.from_local_datetime(&naive).earliest()
}

/// Render a time the way the field (and the backend) expects it.
pub fn format_time_field<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format(TIME_FIELD_FORMAT).to_string()
}

/// Pick the instant the submit check should use: the picker's own selection
/// wins, otherwise fall back to parsing the typed text. Empty field → `None`.
pub fn resolve_scheduled_time<Tz: TimeZone>(
    picker_date: Option<DateTime<Utc>>,
    field_value: &str,
    tz: &Tz,
) -> Option<DateTime<Utc>> {
    if field_value.trim().is_empty() {
        return None;
    }
    picker_date.or_else(|| parse_time_field(field_value, tz).map(|t| t.with_timezone(&Utc)))
}

/// JS `Date.getTime()` milliseconds → UTC instant. NaN (an invalid `Date`)
/// yields `None`.
pub fn from_js_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(ms as i64).single()
}

pub fn to_js_millis<Tz: TimeZone>(at: &DateTime<Tz>) -> f64 {
    at.timestamp_millis() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn minutes_from_now_adds_offset() {
        let now = at(2026, 10, 17, 9, 58);
        let suggested = SetTimePolicy::default().suggest(&now).unwrap();
        assert_eq!(suggested, at(2026, 10, 17, 10, 3));
    }

    #[test]
    fn end_of_day_stays_on_same_date() {
        let now = at(2026, 10, 17, 9, 58);
        assert_eq!(
            SetTimePolicy::end_of_day().suggest(&now).unwrap(),
            at(2026, 10, 17, 17, 0)
        );

        // Already past five: still today, so it lands in the past.
        let late = at(2026, 10, 17, 18, 30);
        assert!(SetTimePolicy::end_of_day().suggest(&late).unwrap() < late);
    }

    #[test]
    fn invalid_hour_gives_none() {
        let now = at(2026, 10, 17, 9, 0);
        let policy = SetTimePolicy::TodayAt { hour: 25, minute: 0 };
        assert_eq!(policy.suggest(&now), None);
    }

    #[test]
    fn parse_respects_zone() {
        let cet = FixedOffset::east_opt(3600).unwrap();
        let parsed = parse_time_field("17-10-2026 17:05", &cet).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), at(2026, 10, 17, 16, 5));
        assert_eq!(format_time_field(&parsed), "17-10-2026 17:05");
    }

    #[test]
    fn parse_rejects_picker_display_garbage() {
        assert_eq!(parse_time_field("tomorrow", &Utc), None);
        assert_eq!(parse_time_field("17/10/2026", &Utc), None);
    }

    #[test]
    fn picker_date_beats_typed_text() {
        let picked = at(2026, 10, 18, 8, 0);
        let resolved = resolve_scheduled_time(Some(picked), "17-10-2026 17:05", &Utc);
        assert_eq!(resolved, Some(picked));

        let typed = resolve_scheduled_time(None, "17-10-2026 17:05", &Utc);
        assert_eq!(typed, Some(at(2026, 10, 17, 17, 5)));

        assert_eq!(resolve_scheduled_time(Some(picked), "  ", &Utc), None);
    }

    #[test]
    fn js_millis_conversion() {
        assert_eq!(from_js_millis(f64::NAN), None);
        let t = at(2026, 10, 17, 12, 0);
        assert_eq!(from_js_millis(to_js_millis(&t)), Some(t));
    }

    #[test]
    fn display_reads_naturally() {
        assert_eq!(SetTimePolicy::MinutesFromNow(1).to_string(), "1 minute from now");
        assert_eq!(SetTimePolicy::default().to_string(), "5 minutes from now");
        assert_eq!(SetTimePolicy::end_of_day().to_string(), "Today at 17:00");
    }
}
