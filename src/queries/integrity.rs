//! Referential-integrity verification.
//!
//! Runs every compiled foreign-key check read-only and reports the dangling
//! rows. The seed loader runs the same checks as `:assert none` guards inside
//! its write transaction.

use std::error::Error;

use cozo::DataValue;
use serde::Serialize;

use crate::db::schema::{ALL_RELATIONS, CozoCompiler};
use crate::db::{DatabaseBackend, run_query_no_params};

/// A row whose foreign key has no matching parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityViolation {
    /// Foreign key name, e.g. `score_student`
    pub constraint: String,
    pub relation: String,
    pub target: String,
    /// Key of the offending row, in key-field order
    pub key: Vec<String>,
    /// The dangling value
    pub value: String,
}

fn render(value: &DataValue) -> String {
    match value {
        DataValue::Str(s) => s.to_string(),
        other => format!("{:?}", other),
    }
}

/// Check every foreign key of every relation.
pub fn verify_integrity(db: &dyn DatabaseBackend) -> Result<Vec<IntegrityViolation>, Box<dyn Error>> {
    let mut violations = Vec::new();

    for relation in ALL_RELATIONS {
        let key_len = relation.key_fields.len();
        for fk in relation.foreign_keys {
            let script = CozoCompiler::compile_foreign_key_check(relation, fk);
            let result = run_query_no_params(db, &script)?;
            let value_idx = if relation.is_key_field(fk.column) {
                relation
                    .key_fields
                    .iter()
                    .position(|f| f.name == fk.column)
                    .unwrap_or(0)
            } else {
                key_len
            };

            for row in &result.rows {
                violations.push(IntegrityViolation {
                    constraint: fk.name.to_string(),
                    relation: relation.name.to_string(),
                    target: fk.target.to_string(),
                    key: row.iter().take(key_len).map(render).collect(),
                    value: row.get(value_idx).map(render).unwrap_or_default(),
                });
            }
        }
    }

    Ok(violations)
}
