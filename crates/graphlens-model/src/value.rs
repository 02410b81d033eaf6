//! Attribute values carried by nodes.
//!
//! A node attribute is one of four kinds: string, integer, float or
//! timestamp. Timestamps travel over JSON as ISO-8601 strings and are
//! recognised again on the way back in by their shape.

use std::collections::BTreeMap;
use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use graphlens_core::{DateFormat, Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Node attribute mapping, keyed by attribute name.
pub type Attributes = BTreeMap<String, AttrValue>;

/// ISO-8601 date-time with a time component and an optional offset.
static ISO_DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|z|[+-]\d{2}:\d{2})?$").unwrap()
});

const NAIVE_ISO: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A point in time, with or without a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Aware(DateTime<FixedOffset>),
}

impl Timestamp {
    /// Local wall-clock reading of this timestamp.
    pub fn wall_clock(&self) -> NaiveDateTime {
        match self {
            Self::Naive(n) => *n,
            Self::Aware(d) => d.naive_local(),
        }
    }

    /// Chronological comparison.
    ///
    /// Two aware timestamps compare as instants. When either side lacks an
    /// offset it is read in the other side's zone, so wall clocks compare.
    pub fn compare(&self, other: &Timestamp) -> Ordering {
        match (self, other) {
            (Self::Aware(a), Self::Aware(b)) => a.cmp(b),
            _ => self.wall_clock().cmp(&other.wall_clock()),
        }
    }

    /// ISO-8601 form used on the wire.
    pub fn to_iso(&self) -> String {
        match self {
            Self::Naive(n) => n.format(NAIVE_ISO).to_string(),
            Self::Aware(d) => d.to_rfc3339(),
        }
    }

    /// Recognise a wire string shaped like an ISO-8601 date-time.
    pub fn from_iso(s: &str) -> Option<Self> {
        if !ISO_DATETIME.is_match(s) {
            return None;
        }
        if let Ok(d) = DateTime::parse_from_rfc3339(s) {
            return Some(Self::Aware(d));
        }
        NaiveDateTime::parse_from_str(s, NAIVE_ISO)
            .ok()
            .map(Self::Naive)
    }

    /// Parse user input in the configured date format.
    ///
    /// RFC 3339 strings are always accepted since they carry no ambiguity.
    pub fn parse_with(input: &str, format: DateFormat) -> Option<Self> {
        let input = input.trim();
        if let Ok(d) = DateTime::parse_from_rfc3339(input) {
            return Some(Self::Aware(d));
        }
        for pattern in format.datetime_patterns() {
            if let Ok(n) = NaiveDateTime::parse_from_str(input, pattern) {
                return Some(Self::Naive(n));
            }
        }
        for pattern in format.date_patterns() {
            if let Ok(d) = NaiveDate::parse_from_str(input, pattern) {
                return d.and_hms_opt(0, 0, 0).map(Self::Naive);
            }
        }
        None
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naive(n) => write!(f, "{}", n.format("%Y-%m-%d %H:%M:%S%.f")),
            Self::Aware(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S%.f%:z")),
        }
    }
}

/// Semantic kind of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Timestamp,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Timestamp => write!(f, "timestamp"),
        }
    }
}

/// A single node attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Float(f64),
    Timestamp(Timestamp),
}

impl AttrValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Str(_) => ValueKind::String,
            Self::Int(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Timestamp(_) => ValueKind::Timestamp,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Order two values of compatible kinds.
    ///
    /// Integers and floats compare numerically with each other. Returns
    /// `None` for incompatible kinds and for NaN.
    pub fn compare(&self, other: &AttrValue) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.compare(b)),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y),
                _ => None,
            },
        }
    }

    /// Convert a scalar JSON value.
    ///
    /// Strings shaped like ISO-8601 date-times become timestamps; booleans,
    /// nulls, arrays and objects are rejected.
    pub fn from_json(value: &serde_json::Value) -> std::result::Result<Self, String> {
        match value {
            serde_json::Value::String(s) => Ok(Timestamp::from_iso(s)
                .map(Self::Timestamp)
                .unwrap_or_else(|| Self::Str(s.clone()))),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(format!("unrepresentable number {n}"))
                }
            }
            serde_json::Value::Bool(_) => Err("booleans are not supported".to_string()),
            serde_json::Value::Null => Err("null is not supported".to_string()),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                Err("nested values are not supported".to_string())
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Str(s) => serde_json::Value::String(s.clone()),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Float(f) => serde_json::Value::from(*f),
            Self::Timestamp(t) => serde_json::Value::String(t.to_iso()),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{x:.1}")
            }
            Self::Float(x) => write!(f, "{x}"),
            Self::Timestamp(t) => write!(f, "{t}"),
        }
    }
}

impl Serialize for AttrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Timestamp(t) => serializer.serialize_str(&t.to_iso()),
        }
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&raw).map_err(serde::de::Error::custom)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for AttrValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for AttrValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Timestamp> for AttrValue {
    fn from(t: Timestamp) -> Self {
        Self::Timestamp(t)
    }
}

impl From<NaiveDateTime> for AttrValue {
    fn from(n: NaiveDateTime) -> Self {
        Self::Timestamp(Timestamp::Naive(n))
    }
}

impl From<DateTime<FixedOffset>> for AttrValue {
    fn from(d: DateTime<FixedOffset>) -> Self {
        Self::Timestamp(Timestamp::Aware(d))
    }
}

/// Convert a JSON object into node attributes, rejecting non-scalar values.
pub fn attributes_from_json(value: &serde_json::Value) -> Result<Attributes> {
    let object = value.as_object().ok_or_else(|| Error::InvalidAttribute {
        key: String::new(),
        reason: "attributes must be a JSON object".to_string(),
    })?;

    object
        .iter()
        .map(|(key, raw)| {
            AttrValue::from_json(raw)
                .map(|v| (key.clone(), v))
                .map_err(|reason| Error::InvalidAttribute {
                    key: key.clone(),
                    reason,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn naive(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_iso_sniffing() {
        assert!(matches!(
            Timestamp::from_iso("2024-05-01T10:00:00+02:00"),
            Some(Timestamp::Aware(_))
        ));
        assert!(matches!(
            Timestamp::from_iso("2024-05-01T10:00:00"),
            Some(Timestamp::Naive(_))
        ));
        assert!(Timestamp::from_iso("2024-05-01").is_none());
        assert!(Timestamp::from_iso("meeting at 2024-05-01T10:00:00").is_none());
    }

    #[test]
    fn test_iso_round_trip() {
        let aware = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2023, 1, 2, 3, 4, 5)
            .unwrap();
        for ts in [Timestamp::Aware(aware), Timestamp::Naive(naive(2020, 2, 29, 23))] {
            assert_eq!(Timestamp::from_iso(&ts.to_iso()), Some(ts));
        }
    }

    #[test]
    fn test_parse_with_formats() {
        let expected = Timestamp::Naive(naive(2024, 3, 1, 0));
        assert_eq!(Timestamp::parse_with(" 2024-03-01 ", DateFormat::Iso), Some(expected));
        assert_eq!(Timestamp::parse_with("01.03.2024", DateFormat::Dmy), Some(expected));
        assert_eq!(Timestamp::parse_with("01.03.2024", DateFormat::Iso), None);
        assert_eq!(
            Timestamp::parse_with("2024-03-01T09:00:00", DateFormat::Iso),
            Some(Timestamp::Naive(naive(2024, 3, 1, 9)))
        );
    }

    #[test]
    fn test_naive_assumes_aware_zone() {
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        let aware = Timestamp::Aware(zone.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        let same_wall = Timestamp::Naive(naive(2024, 1, 1, 12));
        assert_eq!(aware.compare(&same_wall), Ordering::Equal);
        assert_eq!(same_wall.compare(&aware), Ordering::Equal);
    }

    #[test]
    fn test_numeric_cross_compare() {
        assert_eq!(AttrValue::Int(3).compare(&AttrValue::Float(3.0)), Some(Ordering::Equal));
        assert_eq!(AttrValue::Float(2.5).compare(&AttrValue::Int(3)), Some(Ordering::Less));
        assert_eq!(AttrValue::Float(f64::NAN).compare(&AttrValue::Int(3)), None);
        assert_eq!(AttrValue::from("a").compare(&AttrValue::Int(1)), None);
    }

    #[test]
    fn test_display_matches_plain_forms() {
        assert_eq!(AttrValue::Float(3.0).to_string(), "3.0");
        assert_eq!(AttrValue::Float(2.25).to_string(), "2.25");
        assert_eq!(AttrValue::from(naive(2024, 1, 1, 8)).to_string(), "2024-01-01 08:00:00");
    }

    #[test]
    fn test_attributes_from_json() {
        let attrs = attributes_from_json(&serde_json::json!({
            "name": "Ada",
            "age": 36,
            "score": 9.5,
            "born": "1815-12-10T00:00:00",
        }))
        .unwrap();
        assert_eq!(attrs["name"], AttrValue::from("Ada"));
        assert_eq!(attrs["age"], AttrValue::Int(36));
        assert_eq!(attrs["score"], AttrValue::Float(9.5));
        assert_eq!(attrs["born"].kind(), ValueKind::Timestamp);
    }

    #[test]
    fn test_attributes_reject_non_scalars() {
        let err = attributes_from_json(&serde_json::json!({"tags": ["a"]})).unwrap_err();
        assert!(matches!(err, Error::InvalidAttribute { ref key, .. } if key == "tags"));
        assert!(attributes_from_json(&serde_json::json!({"ok": true})).is_err());
        assert!(attributes_from_json(&serde_json::json!([1, 2])).is_err());
    }
}
