use super::{RelationSpec, SqlType};

/// SQL representation of one persisted field.
///
/// A descriptor without a column name is the "not persisted" sentinel. It is
/// kept in the schema map so the field list stays aligned with the record's
/// declaration, and is filtered out before anything is rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnDescriptor {
    /// Attribute name as declared on the record type
    pub attribute_name: String,

    pub column_name: Option<String>,

    /// Resolved type. `None` for descriptors that only carry a join relation.
    pub sql_type: Option<SqlType>,

    /// Explicit foreign key column name
    pub foreign_key: Option<String>,

    /// Record type the column references
    pub references: Option<String>,

    pub primary_key: bool,

    pub nullability: Option<Nullability>,

    /// Default expression, carried verbatim
    pub default: Option<String>,

    pub join: Option<RelationSpec>,

    /// Overrides the table that owns the descriptor's join table or
    /// constraint
    pub table_name: Option<String>,
}

/// Declared nullability of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullability {
    Null,
    NotNull,
}

impl ColumnDescriptor {
    /// The "not persisted" sentinel for the named attribute.
    pub fn skipped(attribute_name: impl Into<String>) -> ColumnDescriptor {
        ColumnDescriptor {
            attribute_name: attribute_name.into(),
            ..ColumnDescriptor::default()
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.column_name.as_deref().is_some_and(|name| !name.is_empty())
    }

    /// Column name, or `""` for the sentinel.
    pub fn column(&self) -> &str {
        self.column_name.as_deref().unwrap_or("")
    }

    /// Returns `true` when the descriptor renders a column definition: it is
    /// persisted, has a resolved type and no join relation.
    pub fn has_definition(&self) -> bool {
        self.is_persisted() && self.sql_type.is_some() && self.join.is_none()
    }
}

impl Nullability {
    pub fn from_flag(nullable: bool) -> Nullability {
        if nullable {
            Nullability::Null
        } else {
            Nullability::NotNull
        }
    }

    /// SQL clause for the declared nullability.
    pub fn clause(self) -> &'static str {
        match self {
            Nullability::Null => "null",
            Nullability::NotNull => "not null",
        }
    }
}
