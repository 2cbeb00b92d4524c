use super::Error;

/// One rejected schema statement and the database error it produced.
#[derive(Debug, Clone)]
pub struct DdlFailure {
    /// Statement text as sent to the database
    pub statement: String,

    /// Underlying database error
    pub cause: Error,
}

impl DdlFailure {
    pub fn new(statement: impl Into<String>, cause: Error) -> Self {
        Self {
            statement: statement.into(),
            cause,
        }
    }
}

impl core::fmt::Display for DdlFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}: {}", self.statement.trim(), self.cause)
    }
}

/// Error aggregating every schema statement that failed while applying a
/// schema.
///
/// Schema application never stops at the first failure, so this error carries
/// the complete list. Statements that are not listed were applied.
#[derive(Debug)]
pub(super) struct DdlFailed {
    failures: Vec<DdlFailure>,
}

impl std::error::Error for DdlFailed {}

impl core::fmt::Display for DdlFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} schema statement(s) failed", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  {failure}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error reporting every failed schema statement.
    pub fn ddl_failed(failures: Vec<DdlFailure>) -> Error {
        Error::from(super::ErrorKind::DdlFailed(DdlFailed { failures }))
    }

    /// Returns `true` if this error reports failed schema statements.
    pub fn is_ddl_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DdlFailed(_))
    }

    /// The failed schema statements, if this is a `ddl_failed` error.
    pub fn ddl_failures(&self) -> Option<&[DdlFailure]> {
        match self.kind() {
            super::ErrorKind::DdlFailed(err) => Some(&err.failures),
            _ => None,
        }
    }
}
