//! Catalog module: column types, values, rows and table schemas.
//!
//! Everything a table hands to the engine is expressed in these types.

mod schema;
mod types;

pub use schema::{Column, Schema, SchemaError};
pub use types::{DataType, Row, Value};
