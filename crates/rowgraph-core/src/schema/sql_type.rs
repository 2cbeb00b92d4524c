/// Logical SQL type of a column.
///
/// The same vocabulary serves as the explicit `datatype` hint on a field and
/// as the type resolved for it, so an explicit hint is carried through
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// Opaque 35 character key, rendered `varchar(35)`
    Identifier,

    /// Point in time, rendered `DATETIME`
    Timestamp,

    /// Elapsed time, stored as an integer
    Duration,

    /// Unbounded text, rendered `TEXT`
    Long,

    /// Integer of any width or signedness
    Int,

    Bool,

    /// Fixed precision float, rendered `FLOAT(8,2)`
    Float,

    /// Bounded text, rendered `varchar(255)`
    String,

    /// Any hint the mapper does not recognize
    Other(String),
}

impl SqlType {
    /// Parses a `datatype` hint. Both the short names and the names used by
    /// qualified type names (`uuid.UUID`, `time.TIME`, ...) are
    /// understood; anything else is kept as [`SqlType::Other`].
    pub fn parse(hint: &str) -> SqlType {
        match hint {
            "uuid.UUID" | "identifier" => SqlType::Identifier,
            "time.TIME" | "timestamp" | "datetime" => SqlType::Timestamp,
            "time.Duration" | "duration" => SqlType::Duration,
            "long" => SqlType::Long,
            "int" | "integer" => SqlType::Int,
            "bool" | "boolean" => SqlType::Bool,
            "float" => SqlType::Float,
            "string" => SqlType::String,
            other => SqlType::Other(other.to_string()),
        }
    }

    /// Keyword emitted in a column definition.
    ///
    /// Only the recognized logical types have a dedicated keyword; every other
    /// type, explicit hints included, falls back to `varchar(255)`.
    pub fn keyword(&self) -> &'static str {
        match self {
            SqlType::Identifier => "varchar(35)",
            SqlType::Timestamp => "DATETIME",
            SqlType::Bool => "TINYINT(1)",
            SqlType::Float => "FLOAT(8,2)",
            SqlType::Int | SqlType::Duration => "INT",
            SqlType::Long => "TEXT",
            SqlType::String | SqlType::Other(_) => "varchar(255)",
        }
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, SqlType::Identifier)
    }
}

impl core::fmt::Display for SqlType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(match self {
            SqlType::Identifier => "varchar(35)",
            SqlType::Timestamp => "datetime",
            SqlType::Duration => "duration",
            SqlType::Long => "long",
            SqlType::Int => "integer",
            SqlType::Bool => "tinyint(1)",
            SqlType::Float => "float(8,2)",
            SqlType::String => "varchar(255)",
            SqlType::Other(other) => other,
        })
    }
}
