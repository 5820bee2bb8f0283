//! The fixed sample dataset.

use std::collections::HashSet;
use std::error::Error;

use chrono::NaiveDate;

use super::SeedError;
use crate::queries::RowCounts;
use crate::types::{Course, DATE_FORMAT, Entity, Score, Student, Teacher};

/// (sid, sname, sage, ssex)
const STUDENTS: &[(&str, &str, &str, &str)] = &[
    ("01", "赵雷", "1990-01-01", "男"),
    ("02", "钱电", "1990-12-21", "男"),
    ("03", "孙风", "1990-05-20", "男"),
    ("04", "李云", "1990-08-06", "男"),
    ("05", "周梅", "1991-12-01", "女"),
    ("06", "吴兰", "1992-03-01", "女"),
    ("07", "郑竹", "1989-07-01", "女"),
    ("08", "王菊", "1990-01-20", "女"),
];

/// (cid, cname, tid)
const COURSES: &[(&str, &str, &str)] = &[
    ("01", "语文", "02"),
    ("02", "数学", "01"),
    ("03", "英语", "03"),
];

/// (tid, tname)
const TEACHERS: &[(&str, &str)] = &[("01", "张三"), ("02", "李四"), ("03", "王五")];

/// (sid, cid, score)
const SCORES: &[(&str, &str, i64)] = &[
    ("01", "02", 90),
    ("01", "03", 99),
    ("02", "01", 70),
    ("02", "02", 60),
    ("02", "03", 80),
    ("03", "01", 80),
    ("03", "02", 80),
    ("03", "03", 80),
    ("04", "01", 50),
    ("04", "02", 30),
    ("04", "03", 20),
    ("05", "01", 76),
    ("05", "02", 87),
    ("06", "01", 31),
    ("06", "03", 34),
    ("07", "02", 89),
    ("07", "03", 98),
];

/// A complete set of rows to load in one transaction.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub students: Vec<Student>,
    pub teachers: Vec<Teacher>,
    pub courses: Vec<Course>,
    pub scores: Vec<Score>,
}

impl SeedData {
    /// The built-in sample: 8 students, 3 teachers, 3 courses, 17 scores.
    pub fn sample() -> Result<Self, Box<dyn Error>> {
        let students = STUDENTS
            .iter()
            .map(|(sid, sname, sage, ssex)| -> Result<Student, Box<dyn Error>> {
                let sage = NaiveDate::parse_from_str(sage, DATE_FORMAT)?;
                Ok(Student::new(sid, sname, sage, ssex))
            })
            .collect::<Result<Vec<_>, Box<dyn Error>>>()?;

        Ok(Self {
            students,
            teachers: TEACHERS.iter().map(|(tid, tname)| Teacher::new(tid, tname)).collect(),
            courses: COURSES
                .iter()
                .map(|(cid, cname, tid)| Course::new(cid, cname, Some(*tid)))
                .collect(),
            scores: SCORES
                .iter()
                .map(|(sid, cid, score)| Score::new(sid, cid, *score))
                .collect(),
        })
    }

    pub fn counts(&self) -> RowCounts {
        RowCounts {
            students: self.students.len(),
            teachers: self.teachers.len(),
            courses: self.courses.len(),
            scores: self.scores.len(),
        }
    }

    /// Reject rows that could never be stored: over-wide strings and keys
    /// repeated within the batch.
    pub fn validate(&self) -> Result<(), SeedError> {
        validate_rows(&self.teachers)?;
        validate_rows(&self.students)?;
        validate_rows(&self.courses)?;
        validate_rows(&self.scores)?;
        Ok(())
    }
}

fn validate_rows<E: Entity>(rows: &[E]) -> Result<(), SeedError> {
    let relation = E::RELATION;
    let mut seen = HashSet::with_capacity(rows.len());

    for row in rows {
        for (column, value) in row.string_columns() {
            let (Some(value), Some(max_len)) = (value, relation.field(column).and_then(|f| f.max_len)) else {
                continue;
            };
            let width = value.chars().count();
            if width > max_len {
                return Err(SeedError::FieldTooLong {
                    relation: relation.name.to_string(),
                    column: column.to_string(),
                    width,
                    max_len,
                });
            }
        }

        let key = row.key().join(",");
        if !seen.insert(key.clone()) {
            return Err(SeedError::DuplicateKey {
                relation: relation.name.to_string(),
                key,
            });
        }
    }

    Ok(())
}
