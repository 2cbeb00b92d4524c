use super::{ColumnDescriptor, Field, FieldKind, Nullability, RecordRef, SqlType};

/// What a single field contributes to its record's schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Described {
    /// The field is not persisted.
    Skipped,

    /// The field maps to a column, or to a join relation when it is
    /// many-valued.
    Column(ColumnDescriptor),

    /// The field embeds another record type, which is extracted under its own
    /// table key.
    Embedded(RecordRef),
}

/// Describes the SQL representation of one field.
///
/// Rules, in order:
///
/// 1. `skip`, or a missing `column` annotation, leaves the field unpersisted.
/// 2. The SQL type is resolved from the field kind and the optional
///    `datatype` hint. Text defaults to `varchar(255)`, integers to
///    `integer`, booleans to `tinyint(1)` and floats to `float(8,2)`; an
///    explicit hint is kept as is.
/// 3. Lists, and pointers to lists, carry only their join relation.
/// 4. A pointer to a record is an identifier column referencing that record.
/// 5. A record held by value is embedded.
/// 6. Primary key, foreign key and reference annotations are only honored
///    on identifier text and on pointers to records.
/// 7. Maps, functions, channels and pointers to scalars are not persisted.
pub fn describe(field: &Field) -> Described {
    let ann = &field.annotations;

    let Some(column) = ann.column.as_ref().filter(|_| !ann.skip) else {
        return Described::Skipped;
    };

    let mut desc = ColumnDescriptor {
        attribute_name: field.name.clone(),
        column_name: Some(column.clone()),
        table_name: ann.table_name.clone(),
        ..ColumnDescriptor::default()
    };

    let (sql_type, keyed) = match &field.kind {
        FieldKind::Text => {
            let ty = ann.datatype.clone().unwrap_or(SqlType::String);
            let keyed = ty.is_identifier();
            (ty, keyed)
        }
        FieldKind::Integer { .. } => (ann.datatype.clone().unwrap_or(SqlType::Int), false),
        FieldKind::Boolean => (ann.datatype.clone().unwrap_or(SqlType::Bool), false),
        FieldKind::Float => (ann.datatype.clone().unwrap_or(SqlType::Float), false),
        FieldKind::List(_) => return join_only(desc, field),
        FieldKind::Pointer(inner) => match &**inner {
            FieldKind::List(_) => return join_only(desc, field),
            FieldKind::Record(_) => (SqlType::Identifier, true),
            _ => return Described::Skipped,
        },
        FieldKind::Record(record) => return Described::Embedded(*record),
        FieldKind::Map | FieldKind::Function | FieldKind::Channel => {
            return Described::Skipped
        }
    };

    desc.sql_type = Some(sql_type);
    desc.nullability = ann.null.map(Nullability::from_flag);
    desc.default = ann.default.clone();

    if keyed {
        desc.primary_key = ann.primary_key;
        desc.foreign_key = ann.foreign_key.clone();
        desc.references = ann.references.clone();
    }

    Described::Column(desc)
}

fn join_only(mut desc: ColumnDescriptor, field: &Field) -> Described {
    desc.join = field.annotations.join.clone();
    Described::Column(desc)
}
