//! Adapter wrapping an existing table into the operator framework.

use std::sync::Arc;

use crate::error::Error;
use crate::operators::Operator;
use crate::storage::Table;

/// Presents an existing table as an operator output, so stored tables can
/// feed operator chains.
#[derive(Debug)]
pub struct TableWrapper {
    table: Arc<Table>,
    output: Option<Arc<Table>>,
}

impl TableWrapper {
    /// Wrap a table.
    pub fn new(table: Arc<Table>) -> Self {
        Self {
            table,
            output: None,
        }
    }
}

impl Operator for TableWrapper {
    fn execute(&mut self) -> Result<(), Error> {
        if self.output.is_none() {
            self.output = Some(Arc::clone(&self.table));
        }
        Ok(())
    }

    fn output(&self) -> Option<Arc<Table>> {
        self.output.clone()
    }
}
