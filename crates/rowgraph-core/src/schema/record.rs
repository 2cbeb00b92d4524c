use super::{Field, FieldKind};
use crate::{Error, Result};

/// Implemented by every type whose shape can be described to the mapper.
pub trait DescribeRecord {
    /// Type name. Used as the table key during extraction.
    const NAME: &'static str;

    fn schema() -> Result<RecordSchema>;
}

/// Declared fields of a record type, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Builds a [`RecordSchema`], holding on to the first error raised while
/// declaring fields so that declarations can be chained.
#[derive(Debug)]
pub struct RecordSchemaBuilder {
    name: String,
    fields: Vec<Field>,
    error: Option<Error>,
}

impl RecordSchema {
    pub fn builder(name: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder {
            name: name.into(),
            fields: vec![],
            error: None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl RecordSchemaBuilder {
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Declares a field annotated with the tag notation.
    pub fn tagged(mut self, name: &str, kind: FieldKind, tag: &str) -> Self {
        match Field::tagged(name, kind, tag) {
            Ok(field) => self.fields.push(field),
            Err(err) => {
                if self.error.is_none() {
                    self.error = Some(err.context(crate::err!("field `{name}`")));
                }
            }
        }
        self
    }

    pub fn build(self) -> Result<RecordSchema> {
        if let Some(err) = self.error {
            return Err(Error::invalid_schema(self.name, err.to_string()));
        }

        Ok(RecordSchema {
            name: self.name,
            fields: self.fields,
        })
    }
}
