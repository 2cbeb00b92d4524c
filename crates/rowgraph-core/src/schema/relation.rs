use crate::{bail, Result};

/// How many rows on each side of a relation may be associated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// Each row of the second participant belongs to at most one row of the
    /// first. The join table enforces this with a unique second key.
    OneToMany,

    /// Any pairing is allowed.
    ManyToMany,
}

/// One side of a relation: the participating record's table and the join
/// table column holding its identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Participant {
    pub table: String,
    pub key: String,
}

/// A many-valued relation between two record types, stored in a join table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationSpec {
    pub kind: RelationKind,
    pub first: Participant,
    pub second: Participant,
}

impl Participant {
    pub fn new(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            key: key.into(),
        }
    }
}

impl RelationSpec {
    pub fn many_to_many(first: Participant, second: Participant) -> Self {
        Self {
            kind: RelationKind::ManyToMany,
            first,
            second,
        }
    }

    pub fn one_to_many(first: Participant, second: Participant) -> Self {
        Self {
            kind: RelationKind::OneToMany,
            first,
            second,
        }
    }

    /// Parses the `Table:key,Table:key` join notation. Exactly two
    /// participants are required; the relation is many-to-many.
    pub fn parse(spec: &str) -> Result<RelationSpec> {
        let participants = spec
            .split(',')
            .map(parse_participant)
            .collect::<Result<Vec<_>>>()?;

        let [first, second] = <[Participant; 2]>::try_from(participants).map_err(|found| {
            crate::err!(
                "join `{spec}` must name exactly two participants; found {}",
                found.len()
            )
        })?;

        Ok(RelationSpec::many_to_many(first, second))
    }
}

fn parse_participant(src: &str) -> Result<Participant> {
    let Some((table, key)) = src.trim().split_once(':') else {
        bail!("join participant `{src}` must have the form `Table:key`");
    };

    let (table, key) = (table.trim(), key.trim());
    if table.is_empty() || key.is_empty() || key.contains(':') {
        bail!("join participant `{src}` must have the form `Table:key`");
    }

    Ok(Participant::new(table, key))
}

impl core::fmt::Display for RelationSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{}:{},{}:{}",
            self.first.table, self.first.key, self.second.table, self.second.key
        )
    }
}
