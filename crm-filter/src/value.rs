use crate::catalog::{ColumnType, TypeFamily};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Strings accepted as `true` when ingesting legacy boolean columns.
pub const TRUE_INPUTS: &[&str] = &["true", "yes", "y", "1", "on", "t"];
/// Strings accepted as `false` when ingesting legacy boolean columns.
pub const FALSE_INPUTS: &[&str] = &["false", "no", "n", "0", "off", "f"];

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Maps a heterogeneous legacy boolean string to a `bool`.
///
/// Matching is case-insensitive and ignores surrounding whitespace. Anything
/// outside [`TRUE_INPUTS`] and [`FALSE_INPUTS`] is rejected.
pub fn normalize_bool(raw: &str) -> Option<bool> {
    let lowered = raw.trim().to_lowercase();
    if TRUE_INPUTS.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_INPUTS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Calendar day of a date or timestamp. A timestamp with an offset keeps the
/// day it was written in, not its UTC day.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    parse_datetime(raw).map(|dt| dt.date_naive())
}

/// Parses RFC 3339 timestamps, naive timestamps (taken as UTC) and plain
/// dates (midnight UTC).
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A single cell of a row, after the column accessor normalized it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl CellValue {
    /// Absent, null and the empty string count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Date(d) => Some(d.format(DATE_FORMAT).to_string()),
            CellValue::DateTime(dt) => Some(dt.to_rfc3339()),
        }
    }

    /// Numbers, and strings that parse as numbers. Everything else is
    /// non-numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            CellValue::Text(s) => normalize_bool(s),
            CellValue::Number(n) if *n == 1.0 => Some(true),
            CellValue::Number(n) if *n == 0.0 => Some(false),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::DateTime(dt) => Some(dt.date_naive()),
            CellValue::Text(s) => parse_date(s),
            CellValue::Number(ms) => epoch_millis(*ms).map(|dt| dt.date_naive()),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            CellValue::DateTime(dt) => Some(*dt),
            CellValue::Date(d) => d.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()),
            CellValue::Text(s) => parse_datetime(s),
            CellValue::Number(ms) => epoch_millis(*ms),
            _ => None,
        }
    }

    /// Normalizes a raw JSON field for a column of the given type.
    ///
    /// Strings for boolean and temporal columns are parsed here so that
    /// evaluation sees typed values. Strings that don't parse are kept as
    /// text and will simply fail to match.
    pub fn from_json(value: &JsonValue, column_type: ColumnType) -> CellValue {
        match value {
            JsonValue::Null => CellValue::Null,
            JsonValue::Bool(b) => CellValue::Bool(*b),
            // Text columns keep the exact digits; f64 drops them above 2^53.
            JsonValue::Number(n) if column_type.family() == TypeFamily::Text => {
                CellValue::Text(n.to_string())
            }
            JsonValue::Number(n) => n.as_f64().map_or(CellValue::Null, CellValue::Number),
            JsonValue::String(s) => CellValue::from_text(s, column_type),
            JsonValue::Array(items) => CellValue::Text(
                items
                    .iter()
                    .filter_map(|item| CellValue::from_json(item, ColumnType::Text).as_text())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            JsonValue::Object(_) => CellValue::Text(value.to_string()),
        }
    }

    fn from_text(s: &str, column_type: ColumnType) -> CellValue {
        if s.is_empty() {
            return CellValue::Text(String::new());
        }
        let parsed = match column_type.family() {
            TypeFamily::Boolean => normalize_bool(s).map(CellValue::Bool),
            TypeFamily::Temporal if column_type == ColumnType::Datetime => {
                parse_datetime(s).map(CellValue::DateTime)
            }
            TypeFamily::Temporal => parse_date(s).map(CellValue::Date),
            TypeFamily::Numeric | TypeFamily::Text => None,
        };
        parsed.unwrap_or_else(|| CellValue::Text(s.to_string()))
    }
}

fn epoch_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms as i64)
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(dt: DateTime<Utc>) -> Self {
        CellValue::DateTime(dt)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

/// A rule operand as written by the user or stored in a saved view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    pub fn to_cell(&self) -> CellValue {
        match self {
            Scalar::Bool(b) => CellValue::Bool(*b),
            Scalar::Number(n) => CellValue::Number(*n),
            Scalar::Text(s) => CellValue::Text(s.clone()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n as f64)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(f64::from(n))
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}
