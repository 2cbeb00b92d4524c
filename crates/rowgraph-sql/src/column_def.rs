use crate::Serializer;

use rowgraph_core::schema::ColumnDescriptor;
use std::fmt::Write;

impl Serializer {
    /// Renders `<column> <TYPE>[ NOT NULL][ DEFAULT <expr>][ PRIMARY KEY]`.
    ///
    /// Returns `None` for descriptors that do not define a column: the
    /// not-persisted sentinel, join relations, and untyped descriptors.
    ///
    /// `NOT NULL` is emitted whenever nullability was declared, whatever its
    /// value. Generated schemas depend on this, so `null:"true"` renders the
    /// same as `null:"false"`.
    pub fn column_def(&self, desc: &ColumnDescriptor) -> Option<String> {
        if !desc.has_definition() {
            return None;
        }

        let ty = desc.sql_type.as_ref()?;
        let mut ret = format!("{} {}", self.ident(desc.column()), ty.keyword());

        if desc.nullability.is_some() {
            ret.push_str(" NOT NULL");
        }

        if let Some(default) = &desc.default {
            let _ = write!(ret, " DEFAULT {default}");
        }

        if desc.primary_key {
            ret.push_str(" PRIMARY KEY");
        }

        Some(ret)
    }
}
