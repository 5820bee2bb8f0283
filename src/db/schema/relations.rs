//! The four relations of the school schema.
//!
//! `ALL_RELATIONS` is ordered parents first, so every foreign key points at a
//! relation created earlier in the list.

use super::definition::{ForeignKey, SchemaField, SchemaRelation};

/// Width of identifier and name columns.
pub const CODE_WIDTH: usize = 10;

/// Teacher relation
///
/// Key fields: tid
/// Value fields: tname
pub const TEACHER: SchemaRelation = SchemaRelation {
    name: "teacher",
    key_fields: &[SchemaField::string("tid", CODE_WIDTH)],
    value_fields: &[SchemaField::string("tname", CODE_WIDTH)],
    foreign_keys: &[],
};

/// Student relation
///
/// Key fields: sid
/// Value fields: sname, sage, ssex
pub const STUDENT: SchemaRelation = SchemaRelation {
    name: "student",
    key_fields: &[SchemaField::string("sid", CODE_WIDTH)],
    value_fields: &[
        SchemaField::string("sname", CODE_WIDTH),
        SchemaField::date("sage"),
        SchemaField::string("ssex", CODE_WIDTH),
    ],
    foreign_keys: &[],
};

/// Course relation; `tid` may be null for a course with no teacher.
///
/// Key fields: cid
/// Value fields: cname, tid
pub const COURSE: SchemaRelation = SchemaRelation {
    name: "course",
    key_fields: &[SchemaField::string("cid", CODE_WIDTH)],
    value_fields: &[
        SchemaField::string("cname", CODE_WIDTH),
        SchemaField::nullable_string("tid", CODE_WIDTH),
    ],
    foreign_keys: &[ForeignKey {
        name: "course_teacher",
        column: "tid",
        target: "teacher",
        target_column: "tid",
    }],
};

/// Score relation, one row per (student, course).
///
/// Key fields: sid, cid
/// Value fields: score
pub const SCORE: SchemaRelation = SchemaRelation {
    name: "score",
    key_fields: &[
        SchemaField::string("sid", CODE_WIDTH),
        SchemaField::string("cid", CODE_WIDTH),
    ],
    value_fields: &[SchemaField::int("score")],
    foreign_keys: &[
        ForeignKey {
            name: "score_student",
            column: "sid",
            target: "student",
            target_column: "sid",
        },
        ForeignKey {
            name: "score_course",
            column: "cid",
            target: "course",
            target_column: "cid",
        },
    ],
};

/// All relations, parents before children.
pub const ALL_RELATIONS: &[&SchemaRelation] = &[&TEACHER, &STUDENT, &COURSE, &SCORE];

/// Get list of all relation names managed by this schema
pub fn relation_names() -> Vec<&'static str> {
    ALL_RELATIONS.iter().map(|r| r.name).collect()
}

/// Get a relation definition by name
pub fn relation_by_name(name: &str) -> Option<&'static SchemaRelation> {
    ALL_RELATIONS.iter().copied().find(|r| r.name == name)
}

/// Every (child relation, foreign key) pair whose key references `parent`.
pub fn children_of(parent: &str) -> Vec<(&'static SchemaRelation, &'static ForeignKey)> {
    ALL_RELATIONS
        .iter()
        .copied()
        .flat_map(|rel| rel.foreign_keys.iter().map(move |fk| (rel, fk)))
        .filter(|(_, fk)| fk.target == parent)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_names_in_creation_order() {
        assert_eq!(relation_names(), vec!["teacher", "student", "course", "score"]);
    }

    #[test]
    fn test_foreign_keys_point_backwards() {
        for (pos, rel) in ALL_RELATIONS.iter().enumerate() {
            for fk in rel.foreign_keys {
                let target_pos = ALL_RELATIONS
                    .iter()
                    .position(|r| r.name == fk.target)
                    .expect("foreign key target must be a known relation");
                assert!(target_pos < pos, "{} references later relation {}", fk.name, fk.target);
                let target = relation_by_name(fk.target).unwrap();
                assert!(target.is_key_field(fk.target_column));
                assert!(rel.field(fk.column).is_some());
            }
        }
    }

    #[test]
    fn test_course_teacher_is_nullable() {
        assert!(COURSE.field("tid").unwrap().nullable);
    }

    #[test]
    fn test_score_key_is_composite_and_required() {
        assert_eq!(SCORE.key_names(), vec!["sid", "cid"]);
        assert!(SCORE.key_fields.iter().all(|f| !f.nullable));
    }

    #[test]
    fn test_children_of() {
        let names = |parent: &str| {
            children_of(parent)
                .into_iter()
                .map(|(rel, fk)| (rel.name, fk.column))
                .collect::<Vec<_>>()
        };
        assert_eq!(names("student"), vec![("score", "sid")]);
        assert_eq!(names("course"), vec![("score", "cid")]);
        assert_eq!(names("teacher"), vec![("course", "tid")]);
        assert!(names("score").is_empty());
    }

    #[test]
    fn test_relation_by_name() {
        assert_eq!(relation_by_name("course").map(|r| r.name), Some("course"));
        assert!(relation_by_name("modules").is_none());
    }
}
