use super::Error;

/// Error when a record type's schema description is malformed or
/// contradictory.
///
/// This occurs when:
/// - An annotation tag cannot be parsed (unterminated quote, unknown `null` value)
/// - A join relation does not name exactly two `Table:key` participants
/// - A record embeds itself, directly or through other embedded records
///
/// These errors are raised while extracting column descriptors. They are
/// recovered per record type: the faulty type contributes no tables while the
/// others are extracted normally.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    record: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema for `{}`: {}", self.record, self.message)
    }
}

impl Error {
    /// Creates an invalid schema error for the named record type.
    pub fn invalid_schema(record: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            record: record.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}
