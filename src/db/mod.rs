//! Storage layer over CozoDB.
//!
//! This module provides everything the program needs from the store:
//! - Connection management (SQLite-backed, or in-memory for tests)
//! - Script execution with statement echo through `tracing`
//! - Result cell extraction helpers
//! - Declarative schema definitions and their CozoScript compiler
//!
//! # Architecture
//!
//! CozoDB keeps data in stored relations. Each entity (student, course,
//! teacher, score) is one relation whose key columns form its primary key.
//! Queries are CozoScript and return `NamedRows` of `DataValue` cells.
//!
//! Cozo has no foreign-key constraints, so referential integrity is expressed
//! as compiled guard queries (see `schema::compilers::cozo`).

mod backend;
mod config;
mod connection;
mod escape;
mod extraction;
mod query;
pub mod schema;

pub use backend::{CozoBackend, DatabaseBackend, Params, QueryResult};
pub use config::{DEFAULT_DB_PATH, DatabaseConfig};
pub use connection::open_db;
#[cfg(test)]
pub use connection::open_mem_db;

pub use escape::{escape_string, string_literal};

pub use extraction::{column_index, extract_i64, extract_optional_string, extract_string};

pub use query::{run_query, run_query_no_params, try_create_relation};

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to open database '{path}': {message}")]
    OpenFailed { path: String, message: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Missing column '{name}' in query result")]
    MissingColumn { name: String },

    #[error("Unsupported database url '{url}'")]
    UnsupportedUrl { url: String },
}
