//! Ad-hoc select queries.
//!
//! A [`Query`] is a plain value: every chaining method consumes it and
//! returns the extended query, so nothing is shared between callers.

use crate::Serializer;

use rowgraph_core::stmt::{Statement, Value};
use std::fmt;

/// A table taking part in a query, with the alias it is referred to by and
/// the column used to join or filter on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    pub alias: String,
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
}

/// Comparison operator of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: String,
    alias: String,
    columns: Vec<String>,
    joins: Vec<Join>,
    filters: Vec<Filter>,
}

#[derive(Debug, Clone, PartialEq)]
struct Join {
    kind: JoinKind,
    table: TableRef,
    other: TableRef,
}

#[derive(Debug, Clone, PartialEq)]
struct Filter {
    connective: Connective,
    target: TableRef,
    op: CmpOp,
    value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

impl TableRef {
    pub fn new(name: impl Into<String>, alias: impl Into<String>, key: impl Into<String>) -> Self {
        TableRef {
            name: name.into(),
            alias: alias.into(),
            key: key.into(),
        }
    }
}

impl Query {
    /// `SELECT <alias>.<column>, ... FROM <table> <alias>`. No columns
    /// selects `<alias>.*`.
    pub fn select<I, S>(table: impl Into<String>, alias: impl Into<String>, columns: I) -> Query
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Query {
            table: table.into(),
            alias: alias.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            joins: vec![],
            filters: vec![],
        }
    }

    /// `<KIND> JOIN <table> <alias> ON <alias>.<key> = <other alias>.<other key>`
    pub fn join(mut self, kind: JoinKind, table: TableRef, other: TableRef) -> Query {
        self.joins.push(Join { kind, table, other });
        self
    }

    /// Adds a condition. Successive filters are combined with `AND`.
    pub fn filter(self, target: TableRef, op: CmpOp, value: impl Into<Value>) -> Query {
        self.and(target, op, value)
    }

    pub fn and(mut self, target: TableRef, op: CmpOp, value: impl Into<Value>) -> Query {
        self.filters.push(Filter {
            connective: Connective::And,
            target,
            op,
            value: value.into(),
        });
        self
    }

    pub fn or(mut self, target: TableRef, op: CmpOp, value: impl Into<Value>) -> Query {
        self.filters.push(Filter {
            connective: Connective::Or,
            target,
            op,
            value: value.into(),
        });
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

impl Serializer {
    pub fn query(&self, query: &Query) -> Statement {
        let columns = if query.columns.is_empty() {
            format!("{}.*", query.alias)
        } else {
            query
                .columns
                .iter()
                .map(|column| format!("{}.{}", query.alias, self.ident(column)))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut sql = format!(
            "SELECT {columns} FROM {} {}",
            self.ident(&query.table),
            query.alias
        );

        for join in &query.joins {
            sql.push_str(&format!(
                " {} {} {} ON {}.{} = {}.{}",
                join.kind,
                self.ident(&join.table.name),
                join.table.alias,
                join.table.alias,
                self.ident(&join.table.key),
                join.other.alias,
                self.ident(&join.other.key),
            ));
        }

        let mut params = vec![];

        for (i, filter) in query.filters.iter().enumerate() {
            let prefix = match (i, filter.connective) {
                (0, _) => "WHERE",
                (_, Connective::And) => "AND",
                (_, Connective::Or) => "OR",
            };

            sql.push_str(&format!(
                " {prefix} {}.{} {} ?",
                filter.target.alias,
                self.ident(&filter.target.key),
                filter.op,
            ));
            params.push(filter.value.clone());
        }

        Statement::with_params(sql, params)
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
        })
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "<>",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Like => "LIKE",
        })
    }
}
