//! Shared types for school data.

mod entities;

pub use entities::{Course, DATE_FORMAT, Entity, Score, Student, Teacher};
