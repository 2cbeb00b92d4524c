use super::{describe, Described, RecordRef, RecordSchema, SchemaMap};
use crate::{Error, Result};

/// Everything extracted from one record type.
#[derive(Debug, Default)]
pub struct SchemaFragment {
    pub map: SchemaMap,

    /// Embedded subtrees that could not be extracted. Each contributed
    /// nothing to `map`.
    pub faults: Vec<Error>,
}

/// Extracts the column descriptors of a record type and of every record it
/// embeds.
///
/// The record's own fields are keyed by its name; each embedded record is
/// keyed by its own type name. Failing to resolve the record's schema is an
/// error. A failing embedded record is recorded as a fault and skipped, so
/// the rest of the type is still extracted.
pub fn extract(record: RecordRef) -> Result<SchemaFragment> {
    let schema = record.schema()?;
    Ok(extract_schema(&schema))
}

/// Extracts an already resolved schema.
pub fn extract_schema(schema: &RecordSchema) -> SchemaFragment {
    let mut fragment = SchemaFragment::default();
    let mut path = vec![schema.name.clone()];
    walk(schema, &mut path, &mut fragment);
    fragment
}

fn walk(schema: &RecordSchema, path: &mut Vec<String>, fragment: &mut SchemaFragment) {
    log::trace!("extracting `{}`", schema.name);

    for field in &schema.fields {
        match describe(field) {
            Described::Skipped => fragment
                .map
                .push(&schema.name, super::ColumnDescriptor::skipped(&field.name)),
            Described::Column(desc) => fragment.map.push(&schema.name, desc),
            Described::Embedded(nested) => {
                if let Err(err) = walk_embedded(nested, path, fragment) {
                    fragment.faults.push(err);
                }
            }
        }
    }
}

fn walk_embedded(
    nested: RecordRef,
    path: &mut Vec<String>,
    fragment: &mut SchemaFragment,
) -> Result<()> {
    if path.iter().any(|name| name == nested.name) {
        return Err(Error::invalid_schema(
            nested.name,
            format!("record embeds itself through `{}`", path.join("` -> `")),
        ));
    }

    let schema = nested.schema()?;

    // Extract into a scratch fragment so a failing subtree leaves no partial
    // columns behind.
    let mut scratch = SchemaFragment::default();
    scratch.map.touch(nested.name);

    path.push(nested.name.to_string());
    walk(&schema, path, &mut scratch);
    path.pop();

    fragment.map.merge(scratch.map);
    fragment.faults.extend(scratch.faults);
    Ok(())
}
