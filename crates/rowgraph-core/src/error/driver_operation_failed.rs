use super::Error;

/// A database library rejected a connection attempt or a statement.
///
/// Drivers wrap `rusqlite`, `mysql_async` and `url` errors in this kind; the
/// mapper adds the table and row on top with [`Error::row_operation`], or the
/// statement with [`DdlFailure`](super::DdlFailure).
#[derive(Debug)]
pub(super) struct DriverOperationFailed {
    cause: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for DriverOperationFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

impl core::fmt::Display for DriverOperationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.cause)?;

        // Database errors often repeat their message in the source.
        let mut last = self.cause.to_string();
        let mut source = self.cause.source();
        while let Some(err) = source {
            let message = err.to_string();
            if message != last {
                write!(f, ": {message}")?;
            }
            last = message;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Wraps an error raised by a driver's database library.
    pub fn driver_operation_failed(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::DriverOperationFailed(
            DriverOperationFailed {
                cause: Box::new(err),
            },
        ))
    }

    pub fn is_driver_operation_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DriverOperationFailed(_))
    }
}
