//! The process-wide table registry.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::debug;

use crate::error::Error;
use crate::storage::Table;

/// Summary row describing one registered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    /// Registered name.
    pub name: String,
    /// Number of columns.
    pub column_count: u16,
    /// Number of rows.
    pub row_count: u64,
    /// Number of chunks.
    pub chunk_count: u32,
}

/// Name-to-table mapping with shared ownership of the registered tables.
///
/// The registry can be used as a plain value, or through the
/// lazily-initialised process-wide instance behind [`TableRegistry::global`].
/// `reset` exists so tests can return the shared instance to its empty
/// state.
#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: RwLock<HashMap<String, Arc<Table>>>,
}

impl TableRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, initialised on first use.
    pub fn global() -> &'static TableRegistry {
        static REGISTRY: OnceLock<TableRegistry> = OnceLock::new();
        REGISTRY.get_or_init(TableRegistry::new)
    }

    /// Register a table under `name`.
    ///
    /// Fails with [`Error::DuplicateTable`] when the name is taken.
    pub fn add_table(&self, name: impl Into<String>, table: Arc<Table>) -> Result<(), Error> {
        let name = name.into();
        let mut tables = self.tables.write();
        if tables.contains_key(&name) {
            return Err(Error::DuplicateTable { name });
        }

        debug!(
            table = %name,
            rows = table.row_count(),
            chunks = table.chunk_count(),
            "registered table"
        );
        tables.insert(name, table);
        Ok(())
    }

    /// Remove the table registered under `name`, releasing the registry's
    /// share of it.
    ///
    /// Fails with [`Error::UnknownTable`] when the name is absent.
    pub fn drop_table(&self, name: &str) -> Result<(), Error> {
        if self.tables.write().remove(name).is_none() {
            return Err(Error::UnknownTable {
                name: name.to_string(),
            });
        }
        debug!(table = %name, "dropped table");
        Ok(())
    }

    /// Fetch a shared handle to the table registered under `name`.
    pub fn get_table(&self, name: &str) -> Result<Arc<Table>, Error> {
        self.tables
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownTable {
                name: name.to_string(),
            })
    }

    /// Whether a table is registered under `name`.
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.read().contains_key(name)
    }

    /// The registered names, in unspecified order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.read().keys().cloned().collect()
    }

    /// Summaries of every registered table, in unspecified order.
    pub fn summaries(&self) -> Vec<TableSummary> {
        self.tables
            .read()
            .iter()
            .map(|(name, table)| TableSummary {
                name: name.clone(),
                column_count: table.column_count(),
                row_count: table.row_count(),
                chunk_count: table.chunk_count(),
            })
            .collect()
    }

    /// Discard every registered table.
    pub fn reset(&self) {
        self.tables.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElementType;
    use crate::value::Value;

    fn sample_table(rows: i32) -> Arc<Table> {
        let mut table = Table::new(2);
        table.add_column("a", ElementType::Int32).unwrap();
        for i in 0..rows {
            table.append(&[Value::Int32(i)]).unwrap();
        }
        Arc::new(table)
    }

    #[test]
    fn test_add_and_get() {
        let registry = TableRegistry::new();
        let table = sample_table(3);
        registry.add_table("users", table.clone()).unwrap();

        assert!(registry.has_table("users"));
        assert!(Arc::ptr_eq(&registry.get_table("users").unwrap(), &table));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let registry = TableRegistry::new();
        registry.add_table("t", sample_table(0)).unwrap();
        assert_eq!(
            registry.add_table("t", sample_table(0)),
            Err(Error::DuplicateTable {
                name: "t".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_table_errors() {
        let registry = TableRegistry::new();
        assert!(matches!(
            registry.get_table("missing"),
            Err(Error::UnknownTable { .. })
        ));
        assert!(matches!(
            registry.drop_table("missing"),
            Err(Error::UnknownTable { .. })
        ));
    }

    #[test]
    fn test_drop_releases_share() {
        let registry = TableRegistry::new();
        registry.add_table("t", sample_table(1)).unwrap();
        registry.drop_table("t").unwrap();
        assert!(!registry.has_table("t"));
    }

    #[test]
    fn test_table_names_and_summaries() {
        let registry = TableRegistry::new();
        registry.add_table("a", sample_table(5)).unwrap();
        registry.add_table("b", sample_table(0)).unwrap();

        let mut names = registry.table_names();
        names.sort();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);

        let mut summaries = registry.summaries();
        summaries.sort_by(|left, right| left.name.cmp(&right.name));
        assert_eq!(
            summaries[0],
            TableSummary {
                name: "a".to_string(),
                column_count: 1,
                row_count: 5,
                chunk_count: 3,
            }
        );
    }

    #[test]
    fn test_reset_empties_registry() {
        let registry = TableRegistry::new();
        registry.add_table("t", sample_table(1)).unwrap();
        registry.reset();
        assert!(!registry.has_table("t"));
        assert!(registry.table_names().is_empty());
    }

    #[test]
    fn test_global_registry_is_shared() {
        let name = "registry_test_global_table";
        TableRegistry::global()
            .add_table(name, sample_table(1))
            .unwrap();
        assert!(TableRegistry::global().has_table(name));
        TableRegistry::global().drop_table(name).unwrap();
    }
}
