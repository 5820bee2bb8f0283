//! Query execution utilities.

use std::error::Error;

use super::backend::{DatabaseBackend, Params, QueryResult};

/// Run a script with parameters.
pub fn run_query(
    db: &dyn DatabaseBackend,
    script: &str,
    params: Params,
) -> Result<QueryResult, Box<dyn Error>> {
    db.execute_query(script, &params)
}

/// Run a script with no parameters
pub fn run_query_no_params(db: &dyn DatabaseBackend, script: &str) -> Result<QueryResult, Box<dyn Error>> {
    run_query(db, script, Params::new())
}

/// Try to create a relation, returning Ok(true) if created, Ok(false) if already exists
pub fn try_create_relation(
    db: &dyn DatabaseBackend,
    name: &str,
    script: &str,
) -> Result<bool, Box<dyn Error>> {
    if db.relation_exists(name)? {
        return Ok(false);
    }
    match run_query_no_params(db, script) {
        Ok(_) => Ok(true),
        Err(e) => {
            let err_str = e.to_string();
            if err_str.contains("AlreadyExists") || err_str.contains("stored_relation_conflict") {
                Ok(false)
            } else {
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_mem_db;
    use rstest::rstest;

    const PROBE: &str = ":create probe { k: String => v: Int }";

    #[rstest]
    fn test_try_create_relation_twice() {
        let db = open_mem_db();
        assert!(try_create_relation(&db, "probe", PROBE).unwrap());
        assert!(!try_create_relation(&db, "probe", PROBE).unwrap());
        assert_eq!(db.relation_names().unwrap(), vec!["probe".to_string()]);
    }

    #[rstest]
    fn test_run_query_with_params() {
        let db = open_mem_db();
        let mut params = Params::new();
        params.insert("x".to_string(), cozo::DataValue::Num(cozo::Num::Int(7)));
        let result = run_query(&db, "?[y] := y = $x + 1", params).unwrap();
        assert_eq!(result.headers, vec!["y".to_string()]);
        assert_eq!(result.rows.len(), 1);
    }
}
