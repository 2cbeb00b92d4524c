use super::Error;

/// The kind of row operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOp {
    Select,
    Insert,
    Update,
    Delete,
}

impl RowOp {
    pub fn as_str(self) -> &'static str {
        match self {
            RowOp::Select => "SELECT",
            RowOp::Insert => "INSERT",
            RowOp::Update => "UPDATE",
            RowOp::Delete => "DELETE",
        }
    }
}

impl core::fmt::Display for RowOp {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when a single-row statement fails, tagged with the table, the
/// operation and the identity involved when it is known.
#[derive(Debug)]
pub(super) struct RowOperation {
    table: Box<str>,
    op: RowOp,
    id: Option<Box<str>>,
}

impl std::error::Error for RowOperation {}

impl core::fmt::Display for RowOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{} {} {:?}", self.table, self.op, id),
            None => write!(f, "{} {}", self.table, self.op),
        }
    }
}

impl Error {
    /// Wraps `cause` with the table, operation and identity of a row statement.
    pub fn row_operation(
        table: impl Into<String>,
        op: RowOp,
        id: Option<&str>,
        cause: Error,
    ) -> Error {
        cause.context(Error::from(super::ErrorKind::RowOperation(RowOperation {
            table: table.into().into(),
            op,
            id: id.map(Into::into),
        })))
    }

    /// Returns `true` if this error is a failed row operation.
    pub fn is_row_operation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RowOperation(_))
    }
}
