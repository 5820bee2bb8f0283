//! Read-side queries over the school relations.

pub mod index;
pub mod integrity;
pub mod records;

pub use index::{RelationIndex, ScoreKey};
pub use integrity::{IntegrityViolation, verify_integrity};
pub use records::{
    CourseWithTeacher, RecordsError, RowCounts, count_rows, course_with_teacher, courses_for_teacher,
    find_by_key, find_course, find_score, find_student, find_teacher, row_counts, scores_for_course,
    scores_for_student, select_all, select_keys, select_where,
};
