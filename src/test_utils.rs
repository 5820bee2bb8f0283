//! Shared test utilities.

use crate::db::schema::CozoCompiler;
use crate::db::{CozoBackend, DatabaseBackend, open_mem_db};
use crate::seed::seed_database;
use crate::types::Entity;

/// Create an in-memory database holding the sample dataset.
pub fn seeded_db() -> CozoBackend {
    let db = open_mem_db();
    seed_database(&db).expect("Seed should succeed");
    db
}

/// Insert rows directly, bypassing the seed loader and its checks.
///
/// Used to set up stores the loader would refuse to produce.
pub fn insert_rows<E: Entity>(db: &dyn DatabaseBackend, rows: &[E]) {
    let literals: Vec<String> = rows.iter().map(E::to_literal).collect();
    let script = CozoCompiler::compile_insert(E::RELATION, &literals);
    db.execute_query_no_params(&script)
        .expect("Direct insert should succeed");
}
