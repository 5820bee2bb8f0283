//! school_db library - sample school database
//!
//! Declares the student/course/teacher/score schema over CozoDB and loads a
//! fixed sample dataset on request.

pub mod cli;
pub mod db;
pub mod output;
pub mod queries;
pub mod seed;
pub mod tracing_setup;
pub mod types;

#[cfg(test)]
pub mod test_utils;
