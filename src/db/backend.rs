//! Database backend trait and its CozoDB implementation.

use std::collections::BTreeMap;
use std::error::Error;

use cozo::{DataValue, DbInstance, ScriptMutability};
use tracing::debug;

use super::DbError;
use super::extraction::{column_index, extract_string};

/// Type alias for query parameters.
pub type Params = BTreeMap<String, DataValue>;

/// Result of a query execution.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<DataValue>>,
}

/// Trait for the store a command runs against.
///
/// Every operation takes the backend explicitly, so several independent
/// stores can live in one process (tests open one per case).
pub trait DatabaseBackend {
    /// Execute a script with parameters, returning raw rows.
    fn execute_query(&self, script: &str, params: &Params) -> Result<QueryResult, Box<dyn Error>>;

    /// Execute a script without parameters.
    fn execute_query_no_params(&self, script: &str) -> Result<QueryResult, Box<dyn Error>> {
        self.execute_query(script, &Params::new())
    }

    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;

    /// Names of all stored relations currently present.
    fn relation_names(&self) -> Result<Vec<String>, Box<dyn Error>> {
        let result = self.execute_query_no_params("::relations")?;
        let idx = column_index(&result.headers, "name")?;
        Ok(result
            .rows
            .iter()
            .filter_map(|row| row.get(idx).and_then(extract_string))
            .collect())
    }

    /// Check if a relation exists.
    fn relation_exists(&self, name: &str) -> Result<bool, Box<dyn Error>> {
        Ok(self.relation_names()?.iter().any(|r| r == name))
    }
}

/// CozoDB-backed store (SQLite file or in-memory).
pub struct CozoBackend {
    db: DbInstance,
    engine: &'static str,
}

impl CozoBackend {
    pub fn new(db: DbInstance, engine: &'static str) -> Self {
        Self { db, engine }
    }
}

impl DatabaseBackend for CozoBackend {
    fn execute_query(&self, script: &str, params: &Params) -> Result<QueryResult, Box<dyn Error>> {
        debug!(engine = self.engine, script = script.trim(), "executing script");
        let rows = self
            .db
            .run_script(script, params.clone(), ScriptMutability::Mutable)
            .map_err(|e| {
                Box::new(DbError::QueryFailed {
                    message: format!("{:?}", e),
                }) as Box<dyn Error>
            })?;
        Ok(QueryResult {
            headers: rows.headers,
            rows: rows.rows,
        })
    }

    fn backend_name(&self) -> &'static str {
        match self.engine {
            "sqlite" => "CozoSqlite",
            _ => "CozoMem",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_mem_db;
    use rstest::rstest;

    #[rstest]
    fn test_mem_backend_name() {
        let db = open_mem_db();
        assert_eq!(db.backend_name(), "CozoMem");
    }

    #[rstest]
    fn test_fresh_store_has_no_relations() {
        let db = open_mem_db();
        assert!(db.relation_names().unwrap().is_empty());
        assert!(!db.relation_exists("student").unwrap());
    }

    #[rstest]
    fn test_relation_exists_after_create() {
        let db = open_mem_db();
        db.execute_query_no_params(":create probe { k: String => v: Int }")
            .unwrap();
        assert!(db.relation_exists("probe").unwrap());
    }

    #[rstest]
    fn test_invalid_script_is_query_failed() {
        let db = open_mem_db();
        let err = db.execute_query_no_params("this is not cozoscript").unwrap_err();
        assert!(err.downcast_ref::<DbError>().is_some());
    }
}
