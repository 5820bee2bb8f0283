//! Declarative schema for the school database.
//!
//! # Overview
//!
//! 1. **Core Types** (`definition.rs`):
//!    - `DataType` - String, Int or Date
//!    - `SchemaField` - a column with its type, nullability and width
//!    - `ForeignKey` - a column referencing another relation's key
//!    - `SchemaRelation` - a relation with key fields, value fields and foreign keys
//!
//! 2. **Relation Definitions** (`relations.rs`):
//!    - `TEACHER`, `STUDENT`, `COURSE`, `SCORE`
//!    - `ALL_RELATIONS` - parents before children
//!
//! 3. **Compiler** (`compilers/cozo.rs`): DDL, inserts, selects and foreign-key guards.
//!
//! # Relationships
//!
//! | Parent | Child | Via |
//! |--------|-------|-----|
//! | student | score | score.sid |
//! | course | score | score.cid |
//! | teacher | course | course.tid (nullable) |

pub mod compilers;
mod definition;
mod relations;

pub use compilers::CozoCompiler;
pub use definition::{DataType, ForeignKey, SchemaField, SchemaRelation};
pub use relations::{
    ALL_RELATIONS, CODE_WIDTH, COURSE, SCORE, STUDENT, TEACHER, children_of, relation_by_name,
    relation_names,
};

use std::error::Error;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::db::backend::DatabaseBackend;
use crate::db::query::try_create_relation;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Schema creation failed for '{relation}': {message}")]
    CreationFailed { relation: String, message: String },
}

/// Status of a relation after schema creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelationState {
    #[serde(rename = "created")]
    Created,
    #[serde(rename = "exists")]
    AlreadyExists,
}

/// Schema creation outcome for one relation
#[derive(Debug, Clone, Serialize)]
pub struct RelationStatus {
    pub name: String,
    pub status: RelationState,
}

/// Create every relation that does not exist yet.
///
/// Safe to call repeatedly: existing relations are reported as
/// `AlreadyExists` and left untouched.
pub fn create_schema(db: &dyn DatabaseBackend) -> Result<Vec<RelationStatus>, Box<dyn Error>> {
    let mut result = Vec::with_capacity(ALL_RELATIONS.len());

    for relation in ALL_RELATIONS {
        let ddl = CozoCompiler::compile_relation(relation);
        let created = try_create_relation(db, relation.name, &ddl).map_err(|e| {
            SchemaError::CreationFailed {
                relation: relation.name.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = if created {
            info!(relation = relation.name, "created relation");
            RelationState::Created
        } else {
            RelationState::AlreadyExists
        };

        result.push(RelationStatus {
            name: relation.name.to_string(),
            status,
        });
    }

    Ok(result)
}

/// Whether every relation of the schema is present.
pub fn schema_present(db: &dyn DatabaseBackend) -> Result<bool, Box<dyn Error>> {
    let existing = db.relation_names()?;
    Ok(ALL_RELATIONS
        .iter()
        .all(|r| existing.iter().any(|name| name == r.name)))
}
