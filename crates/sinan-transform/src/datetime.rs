//! Date normalization for registry timestamps.
//!
//! The registry accepts a single timestamp shape, `YYYY-MM-DDTHH:MM:SS.000Z`
//! (UTC, fixed millisecond field). Source exports mix ISO-8601 strings of
//! varying precision with spreadsheet serial numbers, so everything funnels
//! through [`to_iso_utc`].

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::error::TransformError;

/// Output shape for every timestamp sent to the registry. The millisecond
/// field is literal: sub-second precision is never carried through.
const REGISTRY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

/// Day 0 of spreadsheet serial dates.
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

const SECONDS_PER_DAY: f64 = 86_400.0;

fn format_registry(dt: NaiveDateTime) -> String {
    dt.format(REGISTRY_FORMAT).to_string()
}

fn serial_epoch() -> NaiveDateTime {
    let (year, month, day) = SERIAL_EPOCH;
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("serial epoch is a valid date")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
}

/// Normalizes a date string to `YYYY-MM-DDTHH:MM:SS.000Z` UTC.
///
/// Accepted inputs, tried in order:
/// - ISO-8601 with offset or trailing `Z`, with or without milliseconds
///   (already-normalized values round-trip unchanged)
/// - naive `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS`, taken as UTC
/// - bare `YYYY-MM-DD`, taken as UTC midnight
/// - a spreadsheet serial number (days since 1899-12-30, fractional days
///   allowed), taken as UTC
///
/// Anything else is a [`TransformError::DateFormat`]; callers decide whether
/// that aborts the row (record dates) or becomes "no answer" (questionnaire
/// dates).
pub fn to_iso_utc(raw: &str) -> Result<String, TransformError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TransformError::DateFormat(raw.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(format_registry(dt.with_timezone(&Utc).naive_utc()));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(format_registry(dt));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
        return Ok(format_registry(midnight));
    }
    if let Ok(serial) = trimmed.parse::<f64>() {
        return from_serial(serial).ok_or_else(|| TransformError::DateFormat(raw.to_string()));
    }

    Err(TransformError::DateFormat(raw.to_string()))
}

/// Converts a spreadsheet serial date, rounding to whole seconds.
fn from_serial(serial: f64) -> Option<String> {
    if !serial.is_finite() {
        return None;
    }
    let seconds = (serial * SECONDS_PER_DAY).round();
    if seconds.abs() > i64::MAX as f64 {
        return None;
    }
    let dt = serial_epoch().checked_add_signed(Duration::seconds(seconds as i64))?;
    Some(format_registry(dt))
}

/// Parses a questionnaire date cell (`%Y-%m-%d %H:%M:%S`) into the registry
/// shape. Returns `None` on any mismatch; questionnaire dates never fail a
/// row.
pub fn parse_questionnaire_date(raw: &str) -> Option<String> {
    let dt = NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S").ok()?;
    Some(format_registry(dt))
}

/// Current time in the registry timestamp shape.
pub fn now_timestamp() -> String {
    format_registry(Utc::now().naive_utc())
}

/// Age in whole years between a birth date (any [`to_iso_utc`] input) and
/// `today`, rounded the way the surveillance reports do
/// (`days / 365.25`, half up).
pub fn age_on(birth: &str, today: NaiveDate) -> Option<i64> {
    let normalized = to_iso_utc(birth).ok()?;
    let date = NaiveDate::parse_from_str(&normalized[..10], "%Y-%m-%d").ok()?;
    let days = today.signed_duration_since(date).num_days();
    Some((days as f64 / 365.25).round() as i64)
}
