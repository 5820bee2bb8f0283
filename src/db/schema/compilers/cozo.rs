//! Cozo Datalog compiler.
//!
//! Generates CozoScript from schema definitions: relation DDL, batch inserts,
//! full-relation selects and the foreign-key guards that stand in for the
//! constraints Cozo does not enforce natively.

use crate::db::schema::definition::{ForeignKey, SchemaField, SchemaRelation};

/// Compiler for generating CozoScript from schema definitions.
pub struct CozoCompiler;

impl CozoCompiler {
    /// Generate Cozo DDL for a single relation.
    ///
    /// Produces output in the format:
    /// ```cozo
    /// :create relation_name {
    ///     key_field1: Type1,
    ///     key_field2: Type2
    ///     =>
    ///     value_field1: Type1,
    ///     value_field2: Type2?
    /// }
    /// ```
    pub fn compile_relation(relation: &SchemaRelation) -> String {
        let render = |fields: &[SchemaField]| {
            fields
                .iter()
                .map(|f| format!("    {}: {}", f.name, f.cozo_column_type()))
                .collect::<Vec<_>>()
                .join(",\n")
        };

        format!(
            ":create {} {{\n{}\n    =>\n{}\n}}",
            relation.name,
            render(relation.key_fields),
            render(relation.value_fields)
        )
    }

    /// Generate a batch insert that fails if any key already exists.
    ///
    /// ```cozo
    /// ?[sid, cid, score] <- [["01", "02", 90], ["01", "03", 99]]
    /// :insert score { sid, cid => score }
    /// ```
    ///
    /// `row_literals` are pre-formatted rows like `["01", "02", 90]`, in
    /// `all_fields()` order.
    pub fn compile_insert(relation: &SchemaRelation, row_literals: &[String]) -> String {
        format!(
            "?[{}] <- [{}]\n:insert {} {{ {} => {} }}",
            Self::column_list(relation),
            row_literals.join(", "),
            relation.name,
            Self::names(relation.key_fields.iter().map(|f| f.name)),
            Self::names(relation.value_fields.iter().map(|f| f.name)),
        )
    }

    /// Select every row of a relation, columns in `all_fields()` order.
    pub fn compile_select_all(relation: &SchemaRelation) -> String {
        let columns = Self::column_list(relation);
        format!("?[{columns}] := *{}{{{columns}}}", relation.name)
    }

    /// Select the key columns of every row.
    pub fn compile_select_keys(relation: &SchemaRelation) -> String {
        let keys = Self::names(relation.key_fields.iter().map(|f| f.name));
        format!("?[{keys}] := *{}{{{keys}}}", relation.name)
    }

    /// Select one row by a `$param` per key column.
    pub fn compile_select_by_key(relation: &SchemaRelation) -> String {
        let bindings = Self::names(relation.key_fields.iter().map(|f| format!("{}: ${}", f.name, f.name)));
        let values = relation
            .value_fields
            .iter()
            .map(|f| f.name)
            .collect::<Vec<_>>();
        let head = Self::names(values.iter().copied());
        format!(
            "?[{head}] := *{}{{{bindings}, {head}}}",
            relation.name
        )
    }

    /// Select the rows whose `column` equals `$value`.
    pub fn compile_select_where(relation: &SchemaRelation, column: &str) -> String {
        let others = relation
            .all_fields()
            .map(|f| f.name)
            .filter(|name| *name != column)
            .collect::<Vec<_>>();
        let columns = Self::column_list(relation);
        format!(
            "?[{columns}] := *{}{{{column}, {}}}, {column} == $value",
            relation.name,
            Self::names(others.iter().copied()),
        )
    }

    /// Count rows of a relation.
    ///
    /// An empty relation yields no rows rather than a zero count.
    pub fn compile_count(relation: &SchemaRelation) -> String {
        let first_key = relation.key_fields[0].name;
        format!("?[count({first_key})] := *{}{{{first_key}}}", relation.name)
    }

    /// Query returning the rows of `relation` whose foreign key dangles.
    ///
    /// Head is the relation's key plus the referencing column. Null values in
    /// a nullable column are not violations.
    /// ```cozo
    /// ?[cid, tid] := *course{cid, tid}, !is_null(tid), not *teacher{tid: tid}
    /// ```
    pub fn compile_foreign_key_check(relation: &SchemaRelation, fk: &ForeignKey) -> String {
        let mut head = relation.key_names();
        if !head.contains(&fk.column) {
            head.push(fk.column);
        }
        let head = Self::names(head.into_iter());

        let nullable = relation.field(fk.column).is_some_and(|f| f.nullable);
        let null_filter = if nullable {
            format!(", !is_null({})", fk.column)
        } else {
            String::new()
        };

        format!(
            "?[{head}] := *{}{{{head}}}{null_filter}, not *{}{{{}: {}}}",
            relation.name, fk.target, fk.target_column, fk.column
        )
    }

    /// Foreign-key check that aborts the enclosing transaction on any hit.
    pub fn compile_foreign_key_guard(relation: &SchemaRelation, fk: &ForeignKey) -> String {
        format!("{}\n:assert none", Self::compile_foreign_key_check(relation, fk))
    }

    /// Chain several queries into one transactional script.
    pub fn compile_chain(queries: &[String]) -> String {
        queries
            .iter()
            .map(|q| format!("{{\n{}\n}}", q))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn column_list(relation: &SchemaRelation) -> String {
        Self::names(relation.all_fields().map(|f| f.name))
    }

    fn names<S: AsRef<str>>(names: impl Iterator<Item = S>) -> String {
        names
            .map(|n| n.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
