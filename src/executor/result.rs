//! Query result types.

use serde_json::{Map, Value as JsonValue};

use crate::catalog::Row;

/// A set of rows from a scan.
#[derive(Debug, Clone)]
pub struct ResultSet {
    /// Column names in order.
    pub columns: Vec<String>,
    /// Rows in the order the table produced them.
    pub rows: Vec<Row>,
}

impl ResultSet {
    /// Create a new empty result set.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Add a row.
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by index.
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Iterate over rows.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Row `index` as a JSON object keyed by column name.
    pub fn record(&self, index: usize) -> Option<serde_json::Result<JsonValue>> {
        self.rows.get(index).map(|row| json_record(&self.columns, row))
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Pair each value of `row` with its column name.
pub fn json_record(columns: &[String], row: &Row) -> serde_json::Result<JsonValue> {
    let mut object = Map::new();
    for (name, value) in columns.iter().zip(row.values()) {
        object.insert(name.clone(), serde_json::to_value(value)?);
    }
    Ok(JsonValue::Object(object))
}

/// Render `row` as one tab-separated line.
///
/// Backslash, tab, carriage return and newline inside a value are escaped
/// as `\\`, `\t`, `\r` and `\n`, so every row is exactly one line and splits
/// back into the same number of fields.
pub fn text_record(row: &Row) -> String {
    let fields: Vec<String> = row.values().iter().map(|v| escape_field(&v.to_string())).collect();
    fields.join("\t")
}

fn escape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Value;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_record_uses_column_names() {
        let mut rs = ResultSet::new(vec!["commit_hash".into(), "date".into(), "message".into()]);
        let when = Utc.timestamp_opt(1_000, 0).unwrap();
        rs.push(Row::new(vec![
            Value::from("abc"),
            Value::Timestamp(when),
            Value::Null,
        ]));

        let record = rs.record(0).unwrap().unwrap();
        assert_eq!(record["commit_hash"], "abc");
        assert_eq!(record["date"], serde_json::to_value(when).unwrap());
        assert!(record["message"].is_null());
        assert!(rs.record(1).is_none());
    }

    #[test]
    fn test_into_iter_keeps_order() {
        let mut rs = ResultSet::new(vec!["n".into()]);
        rs.push(Row::new(vec![Value::Integer(2)]));
        rs.push(Row::new(vec![Value::Integer(1)]));

        let values: Vec<_> = rs.into_iter().map(|r| r.into_values()).collect();
        assert_eq!(values, vec![vec![Value::Integer(2)], vec![Value::Integer(1)]]);
    }

    #[test]
    fn test_text_record_escapes_separators() {
        let row = Row::new(vec![
            Value::from("abc"),
            Value::from("tab\there"),
            Value::from("\n\nsubject\r\nbody with a literal \\n\n"),
            Value::Null,
        ]);

        let line = text_record(&row);
        assert!(!line.contains('\n'));
        assert!(!line.contains('\r'));

        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(
            fields,
            vec![
                "abc",
                "tab\\there",
                "\\n\\nsubject\\r\\nbody with a literal \\\\n\\n",
                "NULL",
            ]
        );
    }
}
