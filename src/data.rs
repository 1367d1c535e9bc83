use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Represents errors that can occur while reading row data.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DataError {
    /// A lookup path traversed a value that is not a nested map.
    #[error("value at \"{key}\" is not a nested map")]
    NotAMap { key: String },
}

/// A dynamically typed cell value as supplied by the caller.
///
/// The renderer never interprets these beyond handing them to the backend for
/// formatting; merge comparisons use the formatted string rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(NaiveDateTime),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Interprets the value as a timestamp.
    ///
    /// Strings are accepted in RFC 3339, `%Y-%m-%d %H:%M:%S`, `%Y-%m-%dT%H:%M:%S`
    /// and `%Y-%m-%d` forms.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            Value::String(s) => parse_timestamp(s.trim()),
            _ => None,
        }
    }
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::String(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// A single row record, addressed by column name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Data {
    fields: BTreeMap<String, Value>,
}

/// Rows in sheet order. Insertion order is output order; nothing is sorted implicitly.
pub type DataSlice = Vec<Data>;

impl Data {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, returning the row for chaining.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.fields.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Looks up a value through a path of nested map keys.
    ///
    /// # Returns
    ///
    /// `Ok(Some(value))` when every segment exists, `Ok(None)` when any segment is
    /// absent (a missing field, not an error), and `DataError::NotAMap` when a
    /// segment other than the last resolves to something that is not a map.
    pub fn lookup(&self, path: &[&str]) -> Result<Option<&Value>, DataError> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(None);
        };
        let Some(mut current) = self.fields.get(*first) else {
            return Ok(None);
        };
        let mut current_key = *first;
        for key in rest {
            match current {
                Value::Map(map) => match map.get(*key) {
                    Some(next) => {
                        current = next;
                        current_key = *key;
                    }
                    None => return Ok(None),
                },
                _ => {
                    return Err(DataError::NotAMap {
                        key: current_key.to_string(),
                    })
                }
            }
        }
        Ok(Some(current))
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Data {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Data {
            fields: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
        }
    }
}

/// Sorts rows by a timestamp field, oldest first.
///
/// The sort is stable. Rows whose field is missing or not a parseable timestamp
/// keep their relative order and sort after all dated rows.
pub fn sort_chronologically(rows: &mut [Data], field: &str) {
    rows.sort_by(|a, b| {
        let ta = a.get(field).and_then(Value::as_timestamp);
        let tb = b.get(field).and_then(Value::as_timestamp);
        match (ta, tb) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
