//! Column types, values and rows.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// SQL-like data types a table column can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Text/string data.
    Text,
    /// Integer numbers (BIGINT in SQL).
    Integer,
    /// Boolean values.
    Boolean,
    /// Points in time, UTC.
    Timestamp,
}

impl DataType {
    /// Check if a value matches this data type. NULL matches every type.
    pub fn matches(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (_, Value::Null)
                | (DataType::Text, Value::Text(_))
                | (DataType::Integer, Value::Integer(_))
                | (DataType::Boolean, Value::Boolean(_))
                | (DataType::Timestamp, Value::Timestamp(_))
        )
    }

    /// Get the SQL name for this type.
    pub fn sql_name(&self) -> &'static str {
        match self {
            DataType::Text => "TEXT",
            DataType::Integer => "INTEGER",
            DataType::Boolean => "BOOLEAN",
            DataType::Timestamp => "DATETIME",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql_name())
    }
}

/// A single cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Text(String),
    Integer(i64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Text(s) => write!(f, "{}", s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Timestamp(t)
    }
}

/// An ordered tuple of values, one per schema column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Vec<Value>);

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at a column position.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_data_type_matches() {
        assert!(DataType::Text.matches(&Value::from("hello")));
        assert!(!DataType::Text.matches(&Value::Integer(1)));

        assert!(DataType::Integer.matches(&Value::Integer(-17)));
        assert!(DataType::Boolean.matches(&Value::Boolean(true)));

        let ts = Utc.with_ymd_and_hms(2021, 5, 6, 7, 8, 9).unwrap();
        assert!(DataType::Timestamp.matches(&Value::from(ts)));
        assert!(!DataType::Timestamp.matches(&Value::from("2021-05-06")));

        assert!(DataType::Timestamp.matches(&Value::Null));
    }

    #[test]
    fn test_value_display() {
        let ts = Utc.with_ymd_and_hms(2021, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(Value::from(ts).to_string(), "2021-05-06 07:08:09");
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_row_json() {
        let ts = Utc.with_ymd_and_hms(2021, 5, 6, 7, 8, 9).unwrap();
        let row = Row::new(vec![Value::from("abc"), Value::from(ts), Value::Null]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"["abc","2021-05-06T07:08:09Z",null]"#);
    }
}
