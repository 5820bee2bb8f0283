//! Core schema definition types.
//!
//! A `SchemaRelation` describes one stored relation: its key columns, its
//! value columns and the foreign keys that point out of it.

/// Represents a database data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// String/text data
    String,
    /// Integer data
    Int,
    /// Calendar date, stored as an ISO-8601 `YYYY-MM-DD` string
    Date,
}

impl DataType {
    /// Returns the Cozo type name for this data type.
    pub fn cozo_type(&self) -> &'static str {
        match self {
            DataType::String | DataType::Date => "String",
            DataType::Int => "Int",
        }
    }
}

/// Represents a field in a schema relation.
#[derive(Debug, Clone)]
pub struct SchemaField {
    /// Field name (e.g., "sid", "sname")
    pub name: &'static str,

    /// Field data type
    pub data_type: DataType,

    /// Whether the column accepts null.
    pub nullable: bool,

    /// Maximum width in characters for string columns.
    pub max_len: Option<usize>,
}

impl SchemaField {
    /// Non-null string column bounded to `max_len` characters.
    pub const fn string(name: &'static str, max_len: usize) -> Self {
        Self {
            name,
            data_type: DataType::String,
            nullable: false,
            max_len: Some(max_len),
        }
    }

    /// Nullable string column bounded to `max_len` characters.
    pub const fn nullable_string(name: &'static str, max_len: usize) -> Self {
        Self {
            name,
            data_type: DataType::String,
            nullable: true,
            max_len: Some(max_len),
        }
    }

    pub const fn int(name: &'static str) -> Self {
        Self {
            name,
            data_type: DataType::Int,
            nullable: false,
            max_len: None,
        }
    }

    pub const fn date(name: &'static str) -> Self {
        Self {
            name,
            data_type: DataType::Date,
            nullable: false,
            max_len: None,
        }
    }

    /// Cozo column type, with `?` suffix when nullable.
    pub fn cozo_column_type(&self) -> String {
        if self.nullable {
            format!("{}?", self.data_type.cozo_type())
        } else {
            self.data_type.cozo_type().to_string()
        }
    }
}

/// A column whose values must match a key column of another relation.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    /// Constraint name (e.g., "score_student")
    pub name: &'static str,

    /// Referencing column in the owning relation
    pub column: &'static str,

    /// Referenced relation
    pub target: &'static str,

    /// Referenced key column in `target`
    pub target_column: &'static str,
}

/// Represents a complete database relation/table.
#[derive(Debug, Clone)]
pub struct SchemaRelation {
    /// Relation name (e.g., "student", "score")
    pub name: &'static str,

    /// Fields that form the primary key (must be unique together)
    pub key_fields: &'static [SchemaField],

    /// Fields that are associated values
    pub value_fields: &'static [SchemaField],

    /// Foreign keys out of this relation
    pub foreign_keys: &'static [ForeignKey],
}

impl SchemaRelation {
    /// Returns all fields in this relation (key + value).
    pub fn all_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.key_fields.iter().chain(self.value_fields.iter())
    }

    /// Returns the total number of fields.
    pub fn field_count(&self) -> usize {
        self.key_fields.len() + self.value_fields.len()
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.all_fields().find(|f| f.name == name)
    }

    pub fn is_key_field(&self, name: &str) -> bool {
        self.key_fields.iter().any(|f| f.name == name)
    }

    pub fn key_names(&self) -> Vec<&'static str> {
        self.key_fields.iter().map(|f| f.name).collect()
    }
}
