//! Keyed lookups and row counts over the school relations.

use std::error::Error;

use cozo::DataValue;
use serde::Serialize;
use thiserror::Error;

use crate::db::schema::{COURSE, CozoCompiler, SCORE, SchemaRelation, STUDENT, TEACHER};
use crate::db::{DatabaseBackend, Params, extract_i64, run_query, run_query_no_params};
use crate::types::{Course, Entity, Score, Student, Teacher};

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("Lookup on '{relation}' expects {expected} key values, got {actual}")]
    KeyArity {
        relation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown column '{column}' on '{relation}'")]
    UnknownColumn { relation: String, column: String },
}

/// Row counts for the four relations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowCounts {
    pub students: usize,
    pub teachers: usize,
    pub courses: usize,
    pub scores: usize,
}

impl RowCounts {
    pub fn total(&self) -> usize {
        self.students + self.teachers + self.courses + self.scores
    }
}

/// A course together with its teacher, if one is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseWithTeacher {
    pub course: Course,
    pub teacher: Option<Teacher>,
}

/// Number of rows in a relation.
pub fn count_rows(db: &dyn DatabaseBackend, relation: &SchemaRelation) -> Result<usize, Box<dyn Error>> {
    let result = run_query_no_params(db, &CozoCompiler::compile_count(relation))?;
    let count = result
        .rows
        .first()
        .and_then(|row| row.first())
        .and_then(extract_i64)
        .unwrap_or(0);
    Ok(count as usize)
}

/// Row counts of all four relations.
pub fn row_counts(db: &dyn DatabaseBackend) -> Result<RowCounts, Box<dyn Error>> {
    Ok(RowCounts {
        students: count_rows(db, &STUDENT)?,
        teachers: count_rows(db, &TEACHER)?,
        courses: count_rows(db, &COURSE)?,
        scores: count_rows(db, &SCORE)?,
    })
}

/// Every row of `E`'s relation, ordered by key.
pub fn select_all<E: Entity>(db: &dyn DatabaseBackend) -> Result<Vec<E>, Box<dyn Error>> {
    let result = run_query_no_params(db, &CozoCompiler::compile_select_all(E::RELATION))?;
    result.rows.iter().map(|row| E::from_row(row)).collect()
}

/// Every primary key present in a relation.
pub fn select_keys(db: &dyn DatabaseBackend, relation: &SchemaRelation) -> Result<Vec<Vec<String>>, Box<dyn Error>> {
    let result = run_query_no_params(db, &CozoCompiler::compile_select_keys(relation))?;
    Ok(result
        .rows
        .iter()
        .map(|row| row.iter().map(render_key_cell).collect())
        .collect())
}

fn render_key_cell(value: &DataValue) -> String {
    match value {
        DataValue::Str(s) => s.to_string(),
        other => format!("{:?}", other),
    }
}

/// Fetch one row of `E` by primary key.
pub fn find_by_key<E: Entity>(db: &dyn DatabaseBackend, key: &[&str]) -> Result<Option<E>, Box<dyn Error>> {
    let relation = E::RELATION;
    if key.len() != relation.key_fields.len() {
        return Err(RecordsError::KeyArity {
            relation: relation.name.to_string(),
            expected: relation.key_fields.len(),
            actual: key.len(),
        }
        .into());
    }

    let mut params = Params::new();
    for (field, value) in relation.key_fields.iter().zip(key) {
        params.insert(field.name.to_string(), DataValue::Str((*value).into()));
    }

    let result = run_query(db, &CozoCompiler::compile_select_by_key(relation), params)?;
    let Some(values) = result.rows.into_iter().next() else {
        return Ok(None);
    };

    let mut row: Vec<DataValue> = key.iter().map(|k| DataValue::Str((*k).into())).collect();
    row.extend(values);
    E::from_row(&row).map(Some)
}

/// Rows of `E` whose string `column` equals `value`, ordered by key.
pub fn select_where<E: Entity>(
    db: &dyn DatabaseBackend,
    column: &str,
    value: &str,
) -> Result<Vec<E>, Box<dyn Error>> {
    let relation = E::RELATION;
    if relation.field(column).is_none() {
        return Err(RecordsError::UnknownColumn {
            relation: relation.name.to_string(),
            column: column.to_string(),
        }
        .into());
    }

    let mut params = Params::new();
    params.insert("value".to_string(), DataValue::Str(value.into()));
    let result = run_query(db, &CozoCompiler::compile_select_where(relation, column), params)?;
    result.rows.iter().map(|row| E::from_row(row)).collect()
}

pub fn find_student(db: &dyn DatabaseBackend, sid: &str) -> Result<Option<Student>, Box<dyn Error>> {
    find_by_key(db, &[sid])
}

pub fn find_teacher(db: &dyn DatabaseBackend, tid: &str) -> Result<Option<Teacher>, Box<dyn Error>> {
    find_by_key(db, &[tid])
}

pub fn find_course(db: &dyn DatabaseBackend, cid: &str) -> Result<Option<Course>, Box<dyn Error>> {
    find_by_key(db, &[cid])
}

pub fn find_score(db: &dyn DatabaseBackend, sid: &str, cid: &str) -> Result<Option<Score>, Box<dyn Error>> {
    find_by_key(db, &[sid, cid])
}

/// Scores recorded for a student, ordered by course.
pub fn scores_for_student(db: &dyn DatabaseBackend, sid: &str) -> Result<Vec<Score>, Box<dyn Error>> {
    select_where(db, "sid", sid)
}

/// Scores recorded for a course, ordered by student.
pub fn scores_for_course(db: &dyn DatabaseBackend, cid: &str) -> Result<Vec<Score>, Box<dyn Error>> {
    select_where(db, "cid", cid)
}

/// Courses taught by a teacher.
pub fn courses_for_teacher(db: &dyn DatabaseBackend, tid: &str) -> Result<Vec<Course>, Box<dyn Error>> {
    select_where(db, "tid", tid)
}

/// A course joined to its teacher through `course.tid`.
pub fn course_with_teacher(
    db: &dyn DatabaseBackend,
    cid: &str,
) -> Result<Option<CourseWithTeacher>, Box<dyn Error>> {
    let Some(course) = find_course(db, cid)? else {
        return Ok(None);
    };
    let teacher = match course.tid.as_deref() {
        Some(tid) => find_teacher(db, tid)?,
        None => None,
    };
    Ok(Some(CourseWithTeacher { course, teacher }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_mem_db;
    use crate::db::schema::create_schema;
    use crate::test_utils::{insert_rows, seeded_db};
    use rstest::rstest;

    #[rstest]
    fn test_counts_on_empty_schema() {
        let db = open_mem_db();
        create_schema(&db).unwrap();
        assert_eq!(row_counts(&db).unwrap(), RowCounts::default());
    }

    #[rstest]
    fn test_counts_after_seed() {
        let db = seeded_db();
        let counts = row_counts(&db).unwrap();
        assert_eq!(
            counts,
            RowCounts {
                students: 8,
                teachers: 3,
                courses: 3,
                scores: 17
            }
        );
        assert_eq!(counts.total(), 31);
    }

    #[rstest]
    fn test_find_student() {
        let db = seeded_db();
        let student = find_student(&db, "01").unwrap().expect("student 01");
        assert_eq!(student.sname, "赵雷");
        assert_eq!(student.ssex, "男");
        assert_eq!(student.sage.to_string(), "1990-01-01");
        assert!(find_student(&db, "99").unwrap().is_none());
    }

    #[rstest]
    fn test_find_score_by_composite_key() {
        let db = seeded_db();
        assert_eq!(find_score(&db, "01", "03").unwrap(), Some(Score::new("01", "03", 99)));
        assert!(find_score(&db, "01", "01").unwrap().is_none());
    }

    #[rstest]
    fn test_find_by_key_wrong_arity() {
        let db = seeded_db();
        let err = find_by_key::<Score>(&db, &["01"]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecordsError>(),
            Some(RecordsError::KeyArity { expected: 2, actual: 1, .. })
        ));
    }

    #[rstest]
    fn test_scores_for_student() {
        let db = seeded_db();
        let scores = scores_for_student(&db, "01").unwrap();
        assert_eq!(
            scores,
            vec![Score::new("01", "02", 90), Score::new("01", "03", 99)]
        );
    }

    #[rstest]
    fn test_scores_for_student_without_scores() {
        let db = seeded_db();
        assert!(scores_for_student(&db, "08").unwrap().is_empty());
    }

    #[rstest]
    fn test_scores_for_course() {
        let db = seeded_db();
        let sids: Vec<_> = scores_for_course(&db, "01")
            .unwrap()
            .into_iter()
            .map(|s| s.sid)
            .collect();
        assert_eq!(sids, vec!["02", "03", "04", "05", "06"]);
    }

    #[rstest]
    fn test_select_where_unknown_column() {
        let db = seeded_db();
        assert!(select_where::<Score>(&db, "grade", "A").is_err());
    }

    #[rstest]
    fn test_course_with_teacher() {
        let db = seeded_db();
        let joined = course_with_teacher(&db, "02").unwrap().expect("course 02");
        assert_eq!(joined.course.cname, "数学");
        assert_eq!(joined.teacher.map(|t| t.tname), Some("张三".to_string()));
    }

    #[rstest]
    fn test_course_without_teacher() {
        let db = open_mem_db();
        create_schema(&db).unwrap();
        insert_rows(&db, &[Course::new("09", "体育", None)]);

        let joined = course_with_teacher(&db, "09").unwrap().unwrap();
        assert!(joined.teacher.is_none());
        assert!(course_with_teacher(&db, "10").unwrap().is_none());
    }

    #[rstest]
    fn test_courses_for_teacher() {
        let db = seeded_db();
        let courses = courses_for_teacher(&db, "02").unwrap();
        assert_eq!(courses, vec![Course::new("01", "语文", Some("02"))]);
    }

    #[rstest]
    fn test_select_all_ordered_by_key() {
        let db = seeded_db();
        let teachers: Vec<Teacher> = select_all(&db).unwrap();
        let names: Vec<_> = teachers.iter().map(|t| t.tname.as_str()).collect();
        assert_eq!(names, vec!["张三", "李四", "王五"]);
    }

    #[rstest]
    fn test_select_keys() {
        let db = seeded_db();
        let keys = select_keys(&db, &SCORE).unwrap();
        assert_eq!(keys.len(), 17);
        assert_eq!(keys[0], vec!["01".to_string(), "02".to_string()]);
    }
}
