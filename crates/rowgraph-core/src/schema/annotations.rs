use super::{RelationSpec, SqlType};
use crate::{bail, Result};

/// Persistence annotations attached to one field of a record type.
///
/// A field is only persisted when it names a `column` and is not marked
/// `skip`. The remaining annotations refine how the column is rendered; which
/// of them apply depends on the field's kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    /// Column name. Required to persist the field.
    pub column: Option<String>,

    /// Logical datatype hint
    pub datatype: Option<SqlType>,

    pub primary_key: bool,

    /// Explicit foreign key column name
    pub foreign_key: Option<String>,

    /// Record type referenced by a pointer-to-record field
    pub references: Option<String>,

    /// Declared nullability; `None` leaves it unspecified
    pub null: Option<bool>,

    /// SQL expression used as the column default, e.g. `NOW()`
    pub default: Option<String>,

    /// Relation stored in a join table
    pub join: Option<RelationSpec>,

    /// Overrides the table the field's join table or constraint belongs to
    pub table_name: Option<String>,

    /// Force-exclude the field
    pub skip: bool,
}

impl Annotations {
    /// Parses the tag notation
    /// `column:"id" datatype:"uuid.UUID" null:"false" primaryKey:"true"`.
    ///
    /// Keys outside the persistence vocabulary (`json`, ...) are ignored.
    /// `dbskip` takes effect whatever its value.
    pub fn parse(tag: &str) -> Result<Annotations> {
        let mut ret = Annotations::default();

        for pair in TagPairs::new(tag) {
            let (key, value) = pair?;

            match key {
                "column" => ret.column = Some(value),
                "datatype" => ret.datatype = Some(SqlType::parse(&value)),
                "primaryKey" => ret.primary_key = parse_flag(key, &value)?,
                "foreignKey" => ret.foreign_key = non_empty(value),
                "references" => ret.references = non_empty(value),
                "null" => {
                    ret.null = match &value[..] {
                        "" => None,
                        "true" => Some(true),
                        "false" => Some(false),
                        other => bail!("`null` must be \"true\" or \"false\"; got {other:?}"),
                    }
                }
                "default" => ret.default = non_empty(value),
                "join" => ret.join = Some(RelationSpec::parse(&value)?),
                "tableName" => ret.table_name = non_empty(value),
                "dbskip" => ret.skip = true,
                _ => {}
            }
        }

        Ok(ret)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => bail!("`{key}` must be a boolean; got {other:?}"),
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Iterates the `key:"value"` pairs of a tag.
struct TagPairs<'a> {
    rest: &'a str,
}

impl<'a> TagPairs<'a> {
    fn new(tag: &'a str) -> Self {
        Self { rest: tag }
    }

    fn next_pair(&mut self) -> Result<(&'a str, String)> {
        let Some((key, after)) = self.rest.split_once(':') else {
            let rest = self.rest;
            self.rest = "";
            bail!("expected `key:\"value\"` in tag; found {rest:?}");
        };

        if key.is_empty() || key.contains(|c: char| c.is_whitespace() || c == '"') {
            self.rest = "";
            bail!("invalid tag key {key:?}");
        }

        let Some(quoted) = after.strip_prefix('"') else {
            self.rest = "";
            bail!("value of `{key}` must be quoted");
        };

        let mut value = String::new();
        let mut chars = quoted.char_indices();

        while let Some((i, ch)) = chars.next() {
            match ch {
                '"' => {
                    self.rest = quoted[i + 1..].trim_start();
                    return Ok((key, value));
                }
                '\\' => match chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                ch => value.push(ch),
            }
        }

        self.rest = "";
        bail!("unterminated value for `{key}`")
    }
}

impl<'a> Iterator for TagPairs<'a> {
    type Item = Result<(&'a str, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rest = self.rest.trim_start();
        if self.rest.is_empty() {
            return None;
        }

        Some(self.next_pair())
    }
}
