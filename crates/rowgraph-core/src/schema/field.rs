use super::{Annotations, DescribeRecord, RecordSchema, RelationSpec, SqlType};
use crate::Result;
use std::fmt;

/// One declared field of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Attribute name as declared on the record type
    pub name: String,

    /// Underlying kind of the declared type
    pub kind: FieldKind,

    pub annotations: Annotations,
}

/// The underlying kind of a field's declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Integer { bits: u8, signed: bool },
    Boolean,
    Float,

    /// Array or slice of the inner kind
    List(Box<FieldKind>),

    /// Reference to a value of the inner kind
    Pointer(Box<FieldKind>),

    /// Another record type. Embedded when held by value, referenced when held
    /// behind a pointer.
    Record(RecordRef),

    Map,
    Function,
    Channel,
}

/// Lazily resolved reference to a record type's schema.
///
/// Holding a constructor instead of the schema itself lets a record refer to
/// itself without recursing while its schema is built.
#[derive(Clone, Copy)]
pub struct RecordRef {
    pub name: &'static str,
    pub schema: fn() -> Result<RecordSchema>,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Field {
        Field {
            name: name.into(),
            kind,
            annotations: Annotations::default(),
        }
    }

    /// Creates a field whose annotations are parsed from the tag notation.
    pub fn tagged(name: impl Into<String>, kind: FieldKind, tag: &str) -> Result<Field> {
        Ok(Field {
            name: name.into(),
            kind,
            annotations: Annotations::parse(tag)?,
        })
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.annotations.column = Some(column.into());
        self
    }

    pub fn datatype(mut self, datatype: SqlType) -> Self {
        self.annotations.datatype = Some(datatype);
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.annotations.primary_key = true;
        self
    }

    pub fn foreign_key(mut self, column: impl Into<String>) -> Self {
        self.annotations.foreign_key = Some(column.into());
        self
    }

    pub fn references(mut self, record: impl Into<String>) -> Self {
        self.annotations.references = Some(record.into());
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.annotations.null = Some(nullable);
        self
    }

    pub fn default(mut self, expr: impl Into<String>) -> Self {
        self.annotations.default = Some(expr.into());
        self
    }

    pub fn join(mut self, relation: RelationSpec) -> Self {
        self.annotations.join = Some(relation);
        self
    }

    pub fn table_name(mut self, table: impl Into<String>) -> Self {
        self.annotations.table_name = Some(table.into());
        self
    }

    pub fn skip(mut self) -> Self {
        self.annotations.skip = true;
        self
    }
}

impl FieldKind {
    pub fn int(bits: u8, signed: bool) -> FieldKind {
        FieldKind::Integer { bits, signed }
    }

    pub fn list(inner: FieldKind) -> FieldKind {
        FieldKind::List(Box::new(inner))
    }

    pub fn pointer(inner: FieldKind) -> FieldKind {
        FieldKind::Pointer(Box::new(inner))
    }

    /// An embedded record of type `T`.
    pub fn record<T: DescribeRecord>() -> FieldKind {
        FieldKind::Record(RecordRef::of::<T>())
    }

    /// A pointer to a record of type `T`.
    pub fn record_ptr<T: DescribeRecord>() -> FieldKind {
        FieldKind::pointer(FieldKind::record::<T>())
    }

    /// Strips one level of pointer indirection.
    pub fn pointee(&self) -> &FieldKind {
        match self {
            FieldKind::Pointer(inner) => inner,
            kind => kind,
        }
    }
}

impl RecordRef {
    pub fn of<T: DescribeRecord>() -> RecordRef {
        RecordRef {
            name: T::NAME,
            schema: T::schema,
        }
    }

    pub fn schema(&self) -> Result<RecordSchema> {
        (self.schema)()
    }
}

impl PartialEq for RecordRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordRef").field(&self.name).finish()
    }
}
