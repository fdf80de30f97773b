//! Query execution engine for gitlog.
//!
//! Uses the Volcano/Iterator model where each operator produces
//! rows one at a time.

mod error;
mod executor;
mod operators;
mod result;

pub use error::{ExecuteError, ExecuteResult};
pub use executor::{collect, scan};
pub use operators::{LimitOperator, Operator, TableScan};
pub use result::{json_record, text_record, ResultSet};
