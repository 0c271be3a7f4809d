//! Lenient conversions for loosely typed request fields

use crate::error::{EventError, INVALID_SCHEDULE, Result};
use crate::models::EventFiles;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Leading optionally-signed decimal integer of `raw` after trimming.
///
/// `"12abc"` is 12, `"7.9"` is 7, `"abc"` has no prefix. Saturates on overflow.
pub fn int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Integer value of any JSON value; non-numeric input is 0
pub fn integer_from_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or_default(),
        Value::String(s) => int_prefix(s).unwrap_or_default(),
        _ => 0,
    }
}

/// String elements of a JSON array; other scalars are rendered, `null` is dropped
pub fn string_list_from_value(value: &Value) -> Vec<String> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
        .collect()
}

/// `{ "image": string | null }`, anything else becomes `{ "image": null }`
pub fn files_from_value(value: &Value) -> EventFiles {
    let image = value
        .as_object()
        .and_then(|files| files.get("image"))
        .and_then(Value::as_str)
        .map(str::to_string);
    EventFiles { image }
}

/// Parse a schedule value. `null` means "not provided".
pub fn schedule_from_value(value: &Value) -> Result<Option<DateTime<Utc>>> {
    let instant = match value {
        Value::Null => return Ok(None),
        Value::String(s) => parse_schedule(s.trim()),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    };
    instant
        .map(|dt| Some(dt.trunc_subsecs(3)))
        .ok_or_else(|| EventError::validation(INVALID_SCHEDULE))
}

fn parse_schedule(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Paging parameter: absent or blank is `default`, otherwise the integer prefix must be >= 1
pub fn positive_integer(raw: Option<&str>, default: u64, message: &str) -> Result<u64> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => int_prefix(raw)
            .filter(|n| *n >= 1)
            .map(|n| n as u64)
            .ok_or_else(|| EventError::validation(message)),
    }
}

pub fn lenient_integer<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(integer_from_value(&value)))
}

pub fn lenient_string_list<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(string_list_from_value(&value)))
}

pub fn lenient_files<'de, D>(deserializer: D) -> std::result::Result<Option<EventFiles>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(files_from_value(&value)))
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`)
pub fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
