//! The four school entities and their mapping to stored rows.

use std::error::Error;
use std::fmt;

use chrono::NaiveDate;
use cozo::DataValue;
use serde::Serialize;

use crate::db::schema::{COURSE, SCORE, STUDENT, SchemaRelation, TEACHER};
use crate::db::{extract_i64, extract_optional_string, extract_string, string_literal};

/// Storage format of date columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A row type backed by one stored relation.
///
/// Rows are read and written in the relation's `all_fields()` order.
pub trait Entity: Sized {
    /// The relation this entity is stored in.
    const RELATION: &'static SchemaRelation;

    /// Primary key values, in key-field order.
    fn key(&self) -> Vec<String>;

    /// CozoScript literal for this row, e.g. `["01", "02", 90]`.
    fn to_literal(&self) -> String;

    /// String-typed column values, for width validation.
    fn string_columns(&self) -> Vec<(&'static str, Option<&str>)>;

    /// Build from a result row in `all_fields()` order.
    fn from_row(row: &[DataValue]) -> Result<Self, Box<dyn Error>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    pub sid: String,
    pub sname: String,
    pub sage: NaiveDate,
    pub ssex: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Teacher {
    pub tid: String,
    pub tname: String,
}

/// A course; `tid` is `None` when no teacher is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub cid: String,
    pub cname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub sid: String,
    pub cid: String,
    pub score: i64,
}

fn cell<'a>(row: &'a [DataValue], idx: usize, relation: &str) -> Result<&'a DataValue, Box<dyn Error>> {
    row.get(idx)
        .ok_or_else(|| format!("{} row has {} columns, expected more than {}", relation, row.len(), idx).into())
}

fn string_cell(row: &[DataValue], idx: usize, relation: &str) -> Result<String, Box<dyn Error>> {
    let value = cell(row, idx, relation)?;
    extract_string(value).ok_or_else(|| format!("{} column {} is not a string: {:?}", relation, idx, value).into())
}

fn parse_date(value: &str) -> Result<NaiveDate, Box<dyn Error>> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| format!("Invalid date '{}': {}", value, e).into())
}

impl Student {
    pub fn new(sid: &str, sname: &str, sage: NaiveDate, ssex: &str) -> Self {
        Self {
            sid: sid.to_string(),
            sname: sname.to_string(),
            sage,
            ssex: ssex.to_string(),
        }
    }
}

impl Teacher {
    pub fn new(tid: &str, tname: &str) -> Self {
        Self {
            tid: tid.to_string(),
            tname: tname.to_string(),
        }
    }
}

impl Course {
    pub fn new(cid: &str, cname: &str, tid: Option<&str>) -> Self {
        Self {
            cid: cid.to_string(),
            cname: cname.to_string(),
            tid: tid.map(str::to_string),
        }
    }
}

impl Score {
    pub fn new(sid: &str, cid: &str, score: i64) -> Self {
        Self {
            sid: sid.to_string(),
            cid: cid.to_string(),
            score,
        }
    }
}

impl Entity for Student {
    const RELATION: &'static SchemaRelation = &STUDENT;

    fn key(&self) -> Vec<String> {
        vec![self.sid.clone()]
    }

    fn to_literal(&self) -> String {
        format!(
            "[{}, {}, {}, {}]",
            string_literal(Some(self.sid.as_str())),
            string_literal(Some(self.sname.as_str())),
            string_literal(Some(self.sage.format(DATE_FORMAT).to_string().as_str())),
            string_literal(Some(self.ssex.as_str())),
        )
    }

    fn string_columns(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("sid", Some(self.sid.as_str())),
            ("sname", Some(self.sname.as_str())),
            ("ssex", Some(self.ssex.as_str())),
        ]
    }

    fn from_row(row: &[DataValue]) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            sid: string_cell(row, 0, "student")?,
            sname: string_cell(row, 1, "student")?,
            sage: parse_date(&string_cell(row, 2, "student")?)?,
            ssex: string_cell(row, 3, "student")?,
        })
    }
}

impl Entity for Teacher {
    const RELATION: &'static SchemaRelation = &TEACHER;

    fn key(&self) -> Vec<String> {
        vec![self.tid.clone()]
    }

    fn to_literal(&self) -> String {
        format!(
            "[{}, {}]",
            string_literal(Some(self.tid.as_str())),
            string_literal(Some(self.tname.as_str())),
        )
    }

    fn string_columns(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![("tid", Some(self.tid.as_str())), ("tname", Some(self.tname.as_str()))]
    }

    fn from_row(row: &[DataValue]) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            tid: string_cell(row, 0, "teacher")?,
            tname: string_cell(row, 1, "teacher")?,
        })
    }
}

impl Entity for Course {
    const RELATION: &'static SchemaRelation = &COURSE;

    fn key(&self) -> Vec<String> {
        vec![self.cid.clone()]
    }

    fn to_literal(&self) -> String {
        format!(
            "[{}, {}, {}]",
            string_literal(Some(self.cid.as_str())),
            string_literal(Some(self.cname.as_str())),
            string_literal(self.tid.as_deref()),
        )
    }

    fn string_columns(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("cid", Some(self.cid.as_str())),
            ("cname", Some(self.cname.as_str())),
            ("tid", self.tid.as_deref()),
        ]
    }

    fn from_row(row: &[DataValue]) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            cid: string_cell(row, 0, "course")?,
            cname: string_cell(row, 1, "course")?,
            tid: extract_optional_string(cell(row, 2, "course")?)?,
        })
    }
}

impl Entity for Score {
    const RELATION: &'static SchemaRelation = &SCORE;

    fn key(&self) -> Vec<String> {
        vec![self.sid.clone(), self.cid.clone()]
    }

    fn to_literal(&self) -> String {
        format!(
            "[{}, {}, {}]",
            string_literal(Some(self.sid.as_str())),
            string_literal(Some(self.cid.as_str())),
            self.score,
        )
    }

    fn string_columns(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![("sid", Some(self.sid.as_str())), ("cid", Some(self.cid.as_str()))]
    }

    fn from_row(row: &[DataValue]) -> Result<Self, Box<dyn Error>> {
        let value = cell(row, 2, "score")?;
        Ok(Self {
            sid: string_cell(row, 0, "score")?,
            cid: string_cell(row, 1, "score")?,
            score: extract_i64(value).ok_or_else(|| format!("score is not a number: {:?}", value))?,
        })
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Student - Sid: {}, Sname: {}>", self.sid, self.sname)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Course {}>", self.cname)
    }
}

impl fmt::Display for Teacher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Teacher {}>", self.tname)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Score - Student: {}, Course: {}, Score: {}>",
            self.sid, self.cid, self.score
        )
    }
}
