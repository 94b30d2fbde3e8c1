//! Built-in date range hooks
//!
//! `after`, `before` and `between` turn a date-like value into `ge` / `lt`
//! bounds on a field. Values that do not parse as a date leave the output
//! untouched.

use super::{CustomHook, Emitted, HookResult};
use crate::output::Condition;
use crate::query::QueryValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use dynqs_parser::{parse_number, Operator};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Separator between the two bounds of a `between` value
pub const BETWEEN_SEPARATOR: char = '|';

/// Length of an epoch timestamp expressed in seconds
const EPOCH_SECONDS_LEN: usize = 10;

/// Largest representable distance from the epoch, in milliseconds (±100M days)
const MAX_EPOCH_MILLIS: u64 = 8_640_000_000_000_000;

/// Which range a built-in date hook produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKind {
    /// `{ ge: date }`
    After,
    /// `{ lt: date }`
    Before,
    /// `{ ge: first, lt: second }` from `first|second`
    Between,
}

impl RangeKind {
    /// Config name of the range kind
    pub fn as_str(self) -> &'static str {
        match self {
            RangeKind::After => "after",
            RangeKind::Before => "before",
            RangeKind::Between => "between",
        }
    }
}

impl FromStr for RangeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "after" => Ok(RangeKind::After),
            "before" => Ok(RangeKind::Before),
            "between" => Ok(RangeKind::Between),
            _ => Err(format!("unknown range kind '{s}'")),
        }
    }
}

/// Parse a date-like value.
///
/// A numeric value is an epoch timestamp: exactly ten characters means
/// seconds, anything else milliseconds. Only the leading integer part is
/// read, so `1.5e3` is 1 ms. Other values are parsed as calendar dates;
/// values without an offset are taken as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if parse_number(trimmed).is_some() {
        let (mut millis, consumed) = integer_prefix(trimmed)?;
        // seconds are scaled by appending zeros, which only count when the
        // whole value is an integer
        if trimmed.chars().count() == EPOCH_SECONDS_LEN && consumed == trimmed.len() {
            millis = millis.checked_mul(1000)?;
        }
        if millis.unsigned_abs() > MAX_EPOCH_MILLIS {
            return None;
        }
        return DateTime::from_timestamp_millis(millis);
    }

    parse_calendar_date(trimmed)
}

// Optional sign followed by the leading run of digits, with its byte length
fn integer_prefix(s: &str) -> Option<(i64, usize)> {
    let unsigned = s.trim_start_matches(['+', '-']);
    let sign_len = s.len() - unsigned.len();
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let end = sign_len + digits;
    s[..end].parse().ok().map(|n| (n, end))
}

fn parse_calendar_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const DATETIME_FORMATS: [&str; 5] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

/// Render a timestamp as ISO-8601 with millisecond precision and `Z`
pub fn to_iso_string(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn date_text(value: &QueryValue) -> Option<String> {
    let text = value.to_text();
    if text.is_none() {
        log::debug!("date hook ignores non-text value {value:?}");
    }
    text
}

fn parse_bound(raw: &str) -> Option<String> {
    let parsed = parse_date(raw).map(|dt| to_iso_string(&dt));
    if parsed.is_none() {
        log::debug!("date hook could not parse '{raw}'");
    }
    parsed
}

/// Evaluate a range hook against one value
pub fn apply_range(kind: RangeKind, field: &str, value: &QueryValue) -> Option<Emitted> {
    let text = date_text(value)?;

    let condition = match kind {
        RangeKind::After => Condition::single(Operator::Ge, parse_bound(&text)?),
        RangeKind::Before => Condition::single(Operator::Lt, parse_bound(&text)?),
        RangeKind::Between => {
            let mut parts = text.split(BETWEEN_SEPARATOR);
            let lower = parts.next().and_then(parse_bound);
            let upper = parts.next().and_then(parse_bound);
            // both bounds or nothing
            Condition::single(Operator::Ge, lower?).with(Operator::Lt, upper?)
        }
    };

    Some(Emitted::new(field, condition))
}

/// Build a range hook writing to `field`
pub fn range_hook(kind: RangeKind, field: impl Into<String>) -> CustomHook {
    let field = field.into();
    Arc::new(move |value: &QueryValue| -> HookResult { Ok(apply_range(kind, &field, value)) })
}

/// Hook setting `{ ge: date }` on `field`
pub fn after(field: impl Into<String>) -> CustomHook {
    range_hook(RangeKind::After, field)
}

/// Hook setting `{ lt: date }` on `field`
pub fn before(field: impl Into<String>) -> CustomHook {
    range_hook(RangeKind::Before, field)
}

/// Hook setting `{ ge: first, lt: second }` on `field` from `first|second`
pub fn between(field: impl Into<String>) -> CustomHook {
    range_hook(RangeKind::Between, field)
}
