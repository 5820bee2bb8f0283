//! Seed loader.
//!
//! Loads the fixed sample dataset in a single transaction. The store moves
//! from `Uninitialized` to `Seeded` and never back; there is no reset.

mod data;
mod execute;
mod output;

pub use data::SeedData;
pub use execute::{SeedResult, StoreState, insert_seed_rows, seed_database, seed_with, store_state};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Duplicate key ({key}) in '{relation}'")]
    DuplicateKey { relation: String, key: String },

    #[error("Value for '{relation}.{column}' is {width} characters wide, limit is {max_len}")]
    FieldTooLong {
        relation: String,
        column: String,
        width: usize,
        max_len: usize,
    },

    #[error("Failed to insert seed data: {message}")]
    InsertFailed { message: String },
}
