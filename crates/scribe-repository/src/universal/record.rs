//! The generic attribute bag stored by the universal DAO.

use chrono::{DateTime, SecondsFormat, Utc};
use scribe_core::{ScribeError, ScribeResult};
use serde_json::{Map, Value};

/// A storage-agnostic record: an id, timestamps and a bag of named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct UniversalRecord {
    pub id: String,
    pub fields: Map<String, Value>,
    pub time_created: DateTime<Utc>,
    pub time_updated: DateTime<Utc>,
}

impl UniversalRecord {
    /// Creates an empty record stamped with the current time.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            fields: Map::new(),
            time_created: now,
            time_updated: now,
        }
    }

    /// Sets both timestamps.
    #[must_use]
    pub fn with_times(mut self, created: DateTime<Utc>, updated: DateTime<Utc>) -> Self {
        self.time_created = created;
        self.time_updated = updated;
        self
    }

    /// Sets a field, builder style.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_field(name, value);
        self
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Reads a string field; missing or non-string values are an error.
    pub fn str_field(&self, name: &str) -> ScribeResult<&str> {
        self.field(name).and_then(Value::as_str).ok_or_else(|| {
            ScribeError::Internal(format!(
                "Record {} has no string field '{}'",
                self.id, name
            ))
        })
    }

    /// Reads an integer field; missing or non-integer values are an error.
    pub fn i64_field(&self, name: &str) -> ScribeResult<i64> {
        self.field(name).and_then(Value::as_i64).ok_or_else(|| {
            ScribeError::Internal(format!(
                "Record {} has no integer field '{}'",
                self.id, name
            ))
        })
    }

    /// Serializes the field bag into the JSON document column.
    pub fn data_json(&self) -> ScribeResult<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    /// Parses the JSON document column back into a field bag.
    pub fn parse_data(data: Option<&str>) -> ScribeResult<Map<String, Value>> {
        match data {
            None => Ok(Map::new()),
            Some(s) if s.trim().is_empty() => Ok(Map::new()),
            Some(s) => match serde_json::from_str::<Value>(s)? {
                Value::Object(map) => Ok(map),
                other => Err(ScribeError::Internal(format!(
                    "Record data is not a JSON object: {}",
                    other
                ))),
            },
        }
    }
}

/// Formats a timestamp the way it is stored (RFC 3339, nanosecond precision).
#[must_use]
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parses a stored timestamp.
pub fn parse_timestamp(value: &str) -> ScribeResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ScribeError::Internal(format!("Invalid timestamp '{}': {}", value, e)))
}
