//! Table schema definitions and row validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{DataType, Row};

/// Schema errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("row has {actual} values, schema has {expected} columns")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("column '{column}' expects type {expected}")]
    TypeMismatch { column: String, expected: DataType },

    #[error("null value in non-nullable column: {0}")]
    NullValue(String),
}

/// One column of a table schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Data type.
    pub data_type: DataType,
    /// Name of the table the column belongs to.
    pub source: String,
    /// Whether the column is (part of) the primary key.
    pub primary_key: bool,
    pub nullable: bool,
}

impl Column {
    /// Create a nullable, non-key column.
    pub fn new(name: impl Into<String>, data_type: DataType, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type,
            source: source.into(),
            primary_key: false,
            nullable: true,
        }
    }

    /// Mark the column as primary key (implies NOT NULL).
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Ordered list of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Vec<Column>);

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self(columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get a column definition by name.
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.0.iter().find(|c| c.name == name)
    }

    /// Position of a column by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.0.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of the primary key columns, in schema order.
    pub fn primary_key(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Validate a row against this schema.
    pub fn validate_row(&self, row: &Row) -> Result<(), SchemaError> {
        if row.len() != self.0.len() {
            return Err(SchemaError::ColumnCountMismatch {
                expected: self.0.len(),
                actual: row.len(),
            });
        }

        for (column, value) in self.0.iter().zip(row.values()) {
            if value.is_null() {
                if !column.nullable {
                    return Err(SchemaError::NullValue(column.name.clone()));
                }
                continue;
            }
            if !column.data_type.matches(value) {
                return Err(SchemaError::TypeMismatch {
                    column: column.name.clone(),
                    expected: column.data_type,
                });
            }
        }

        Ok(())
    }
}
