use super::Error;

/// Error when the entity graph persister reaches a record that is already on
/// the path from the root it is saving.
#[derive(Debug)]
pub(super) struct CyclicGraph {
    table: Box<str>,
    id: Box<str>,
}

impl std::error::Error for CyclicGraph {}

impl core::fmt::Display for CyclicGraph {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cyclic record graph: {} {:?} is its own ancestor",
            self.table, self.id
        )
    }
}

impl Error {
    /// Creates a cyclic graph error for the record identified by `table` and `id`.
    pub fn cyclic_graph(table: impl Into<String>, id: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::CyclicGraph(CyclicGraph {
            table: table.into().into(),
            id: id.into().into(),
        }))
    }

    /// Returns `true` if this error is a cyclic graph error.
    pub fn is_cyclic_graph(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::CyclicGraph(_))
    }
}
