//! Schema compilers.
//!
//! Converts `SchemaRelation` definitions into CozoScript.

pub mod cozo;

pub use cozo::CozoCompiler;
