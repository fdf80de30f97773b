//! System tables: virtual tables computed from version-control metadata
//! rather than read from table storage.

mod log_table;

pub use log_table::{log_table_schema, LogIter, LogTable, SessionLogTable, LOG_TABLE_NAME};
