//! Parent-to-children navigation.
//!
//! Student↔Score, Course↔Score and Teacher↔Course are walked through an
//! explicit index built from the stored rows, keyed by the parent's primary
//! key. The index is a snapshot: rebuild it after writing.

use std::collections::BTreeMap;
use std::error::Error;

use serde::Serialize;

use crate::db::DatabaseBackend;
use crate::queries::records::select_all;
use crate::types::{Course, Score};

/// Key of a score row: (sid, cid).
pub type ScoreKey = (String, String);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationIndex {
    /// sid → score keys, ordered by cid
    pub student_scores: BTreeMap<String, Vec<ScoreKey>>,
    /// cid → score keys, ordered by sid
    pub course_scores: BTreeMap<String, Vec<ScoreKey>>,
    /// tid → cids
    pub teacher_courses: BTreeMap<String, Vec<String>>,
}

impl RelationIndex {
    /// Build from in-memory rows.
    pub fn from_rows(courses: &[Course], scores: &[Score]) -> Self {
        let mut index = Self::default();

        for score in scores {
            let key = (score.sid.clone(), score.cid.clone());
            index
                .student_scores
                .entry(score.sid.clone())
                .or_default()
                .push(key.clone());
            index
                .course_scores
                .entry(score.cid.clone())
                .or_default()
                .push(key);
        }

        for course in courses {
            if let Some(tid) = &course.tid {
                index
                    .teacher_courses
                    .entry(tid.clone())
                    .or_default()
                    .push(course.cid.clone());
            }
        }

        for keys in index.student_scores.values_mut() {
            keys.sort_by(|a, b| a.1.cmp(&b.1));
        }
        for keys in index.course_scores.values_mut() {
            keys.sort();
        }
        for cids in index.teacher_courses.values_mut() {
            cids.sort();
        }

        index
    }

    /// Build from the current contents of the store.
    pub fn build(db: &dyn DatabaseBackend) -> Result<Self, Box<dyn Error>> {
        let courses: Vec<Course> = select_all(db)?;
        let scores: Vec<Score> = select_all(db)?;
        Ok(Self::from_rows(&courses, &scores))
    }

    pub fn scores_of_student(&self, sid: &str) -> &[ScoreKey] {
        self.student_scores.get(sid).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn scores_of_course(&self, cid: &str) -> &[ScoreKey] {
        self.course_scores.get(cid).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn courses_of_teacher(&self, tid: &str) -> &[String] {
        self.teacher_courses.get(tid).map(Vec::as_slice).unwrap_or(&[])
    }
}
