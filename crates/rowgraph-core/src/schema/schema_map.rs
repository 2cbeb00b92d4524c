use super::ColumnDescriptor;
use indexmap::IndexMap;

/// Column descriptors keyed by table key, in declaration order.
///
/// Merging appends; a key present on both sides ends up with both
/// sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaMap {
    tables: IndexMap<String, Vec<ColumnDescriptor>>,
}

impl SchemaMap {
    pub fn new() -> SchemaMap {
        SchemaMap::default()
    }

    pub fn push(&mut self, key: impl Into<String>, desc: ColumnDescriptor) {
        self.tables.entry(key.into()).or_default().push(desc);
    }

    /// Ensures `key` is present, even when it ends up with no descriptors.
    pub fn touch(&mut self, key: impl Into<String>) {
        self.tables.entry(key.into()).or_default();
    }

    pub fn get(&self, key: &str) -> Option<&[ColumnDescriptor]> {
        self.tables.get(key).map(|descs| &descs[..])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tables.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|key| &key[..])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ColumnDescriptor])> {
        self.tables.iter().map(|(key, descs)| (&key[..], &descs[..]))
    }

    pub fn merge(&mut self, other: SchemaMap) {
        for (key, descs) in other.tables {
            self.tables.entry(key).or_default().extend(descs);
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
