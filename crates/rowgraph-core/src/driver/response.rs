use crate::{err, stmt::Row, Result};

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Operation result, as a list of rows
    Values(Vec<Row>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(rows: Vec<Row>) -> Self {
        Self {
            rows: Rows::Values(rows),
        }
    }

    pub fn empty_values() -> Self {
        Self::values(vec![])
    }

    /// Returns the rows of a query response.
    pub fn into_values(self) -> Result<Vec<Row>> {
        match self.rows {
            Rows::Values(rows) => Ok(rows),
            Rows::Count(count) => Err(err!("expected rows, got a count of {count}")),
        }
    }
}

impl Rows {
    /// Number of rows impacted, or returned.
    pub fn count(&self) -> u64 {
        match self {
            Self::Count(count) => *count,
            Self::Values(rows) => rows.len() as u64,
        }
    }

    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }
}
