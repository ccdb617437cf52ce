//! Relational operators.
//!
//! Operators are lazy computation nodes producing a table. `execute`
//! computes and caches the output; a second call is a no-op. `output`
//! hands out the cached table and is `None` until `execute` has run.

pub mod table_scan;
pub mod table_wrapper;

use std::sync::Arc;

use crate::error::Error;
use crate::storage::Table;

pub use table_scan::TableScan;
pub use table_wrapper::TableWrapper;

/// A lazy unary computation node producing a table.
pub trait Operator {
    /// Compute and cache the output table. Idempotent.
    fn execute(&mut self) -> Result<(), Error>;

    /// The cached output table; `None` before `execute` has run.
    fn output(&self) -> Option<Arc<Table>>;
}
