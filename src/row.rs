//! Rows fetched from the relational data source

use crate::error::SearchResult;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A scalar value carried by a row field.
///
/// Date/time values keep their native representation until ingestion,
/// where they are normalized to ISO-8601 strings exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    DateTime(DateTime<Utc>),
    Text(String),
}

impl RowValue {
    /// Scalar text form, used for titles, content fields and record ids.
    pub fn as_text(&self) -> String {
        match self {
            RowValue::Null => String::new(),
            RowValue::Bool(b) => b.to_string(),
            RowValue::Integer(i) => i.to_string(),
            RowValue::Float(f) => f.to_string(),
            RowValue::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            RowValue::Text(s) => s.clone(),
        }
    }

    /// JSON form for stored extra-field metadata.
    ///
    /// Dates become ISO-8601 strings; every other value passes through
    /// unchanged.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            RowValue::Null => serde_json::Value::Null,
            RowValue::Bool(b) => serde_json::Value::from(*b),
            RowValue::Integer(i) => serde_json::Value::from(*i),
            RowValue::Float(f) => serde_json::Value::from(*f),
            RowValue::DateTime(dt) => {
                serde_json::Value::from(dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            RowValue::Text(s) => serde_json::Value::from(s.as_str()),
        }
    }
}

impl From<&str> for RowValue {
    fn from(s: &str) -> Self {
        RowValue::Text(s.to_string())
    }
}

impl From<String> for RowValue {
    fn from(s: String) -> Self {
        RowValue::Text(s)
    }
}

impl From<i64> for RowValue {
    fn from(i: i64) -> Self {
        RowValue::Integer(i)
    }
}

impl From<f64> for RowValue {
    fn from(f: f64) -> Self {
        RowValue::Float(f)
    }
}

impl From<bool> for RowValue {
    fn from(b: bool) -> Self {
        RowValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for RowValue {
    fn from(dt: DateTime<Utc>) -> Self {
        RowValue::DateTime(dt)
    }
}

/// One row from the relational data source: a mapping of field name to
/// raw value. Ingestion reads fields without mutating the row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row(BTreeMap<String, RowValue>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion for constructing rows in tests and adapters.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<RowValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RowValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&RowValue> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// The relational data source consumed by the index builder.
///
/// `fields` is exactly the union of the table's title, content, extra and
/// id fields; implementations may over-fetch but must include all of them.
pub trait RowSource {
    fn fetch_rows(&self, table: &str, fields: &[String]) -> SearchResult<Vec<Row>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_text_forms() {
        assert_eq!(RowValue::Text("hello".into()).as_text(), "hello");
        assert_eq!(RowValue::Integer(42).as_text(), "42");
        assert_eq!(RowValue::Bool(true).as_text(), "true");
        assert_eq!(RowValue::Null.as_text(), "");
    }

    #[test]
    fn test_date_to_json_is_iso8601() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let value = RowValue::from(dt);
        assert_eq!(value.to_json(), serde_json::json!("2024-03-01T12:30:00Z"));
    }

    #[test]
    fn test_non_date_json_passthrough() {
        assert_eq!(RowValue::Integer(7).to_json(), serde_json::json!(7));
        assert_eq!(
            RowValue::Text("plain".into()).to_json(),
            serde_json::json!("plain")
        );
    }

    #[test]
    fn test_row_access_is_read_only() {
        let row = Row::new().with("name", "TASK-1").with("priority", 2i64);
        assert_eq!(row.get("name"), Some(&RowValue::Text("TASK-1".into())));
        assert_eq!(row.len(), 2);
        // a second read sees the same value
        assert_eq!(row.get("name"), Some(&RowValue::Text("TASK-1".into())));
    }
}
