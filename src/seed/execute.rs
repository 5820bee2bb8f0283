use std::collections::HashSet;
use std::error::Error;

use serde::Serialize;
use tracing::{info, warn};

use super::{SeedData, SeedError};
use crate::db::DatabaseBackend;
use crate::db::schema::{ALL_RELATIONS, CozoCompiler, RelationStatus, create_schema, schema_present};
use crate::queries::{RowCounts, row_counts, select_keys};
use crate::types::Entity;

/// Lifecycle of the store as far as this program is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StoreState {
    /// No schema, or schema with no rows
    #[serde(rename = "uninitialized")]
    Uninitialized,
    /// Schema present and populated
    #[serde(rename = "seeded")]
    Seeded,
}

/// Result of the seed operation
#[derive(Debug, Serialize)]
pub struct SeedResult {
    pub relations: Vec<RelationStatus>,
    pub inserted: RowCounts,
    pub state: StoreState,
}

/// Current lifecycle state of a store.
pub fn store_state(db: &dyn DatabaseBackend) -> Result<StoreState, Box<dyn Error>> {
    if !schema_present(db)? {
        return Ok(StoreState::Uninitialized);
    }
    if row_counts(db)?.total() == 0 {
        Ok(StoreState::Uninitialized)
    } else {
        Ok(StoreState::Seeded)
    }
}

/// Create the schema if needed and load the built-in sample dataset.
pub fn seed_database(db: &dyn DatabaseBackend) -> Result<SeedResult, Box<dyn Error>> {
    let data = SeedData::sample()?;
    seed_with(db, &data)
}

/// Create the schema if needed and load `data` as one unit.
///
/// Fails without writing any row if `data` is invalid or any of its keys is
/// already stored.
pub fn seed_with(db: &dyn DatabaseBackend, data: &SeedData) -> Result<SeedResult, Box<dyn Error>> {
    let relations = create_schema(db)?;

    data.validate()?;
    check_existing_keys(db, data)?;

    let inserted = insert_seed_rows(db, data)?;
    info!(
        students = inserted.students,
        teachers = inserted.teachers,
        courses = inserted.courses,
        scores = inserted.scores,
        "seed data committed"
    );

    Ok(SeedResult {
        relations,
        inserted,
        state: store_state(db)?,
    })
}

fn check_existing_keys(db: &dyn DatabaseBackend, data: &SeedData) -> Result<(), Box<dyn Error>> {
    check_relation_keys(db, &data.teachers)?;
    check_relation_keys(db, &data.students)?;
    check_relation_keys(db, &data.courses)?;
    check_relation_keys(db, &data.scores)?;
    Ok(())
}

fn check_relation_keys<E: Entity>(db: &dyn DatabaseBackend, rows: &[E]) -> Result<(), Box<dyn Error>> {
    let existing: HashSet<Vec<String>> = select_keys(db, E::RELATION)?.into_iter().collect();

    if let Some(row) = rows.iter().find(|row| existing.contains(&row.key())) {
        let key = row.key().join(",");
        warn!(relation = E::RELATION.name, key = %key, "seed key already stored");
        return Err(SeedError::DuplicateKey {
            relation: E::RELATION.name.to_string(),
            key,
        }
        .into());
    }
    Ok(())
}

fn insert_script<E: Entity>(rows: &[E]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }
    let literals: Vec<String> = rows.iter().map(E::to_literal).collect();
    Some(CozoCompiler::compile_insert(E::RELATION, &literals))
}

/// Insert every row of `data` plus the foreign-key guards as one chained
/// script, so either all rows commit or none do.
pub fn insert_seed_rows(db: &dyn DatabaseBackend, data: &SeedData) -> Result<RowCounts, Box<dyn Error>> {
    let mut queries: Vec<String> = [
        insert_script(&data.teachers),
        insert_script(&data.students),
        insert_script(&data.courses),
        insert_script(&data.scores),
    ]
    .into_iter()
    .flatten()
    .collect();

    if queries.is_empty() {
        return Ok(RowCounts::default());
    }

    for relation in ALL_RELATIONS {
        for fk in relation.foreign_keys {
            queries.push(CozoCompiler::compile_foreign_key_guard(relation, fk));
        }
    }

    let script = CozoCompiler::compile_chain(&queries);
    db.execute_query_no_params(&script).map_err(|e| {
        warn!(error = %e, "seed transaction rejected");
        SeedError::InsertFailed {
            message: e.to_string(),
        }
    })?;

    Ok(data.counts())
}
