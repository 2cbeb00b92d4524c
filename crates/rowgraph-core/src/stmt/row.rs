use super::Value;
use crate::{Error, Result};

use std::sync::Arc;

/// One result row: column names shared across the result set and the row's
/// values in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns the raw value of `column`. Lookup falls back to a
    /// case-insensitive match since MySQL echoes column names as declared.
    pub fn value(&self, column: &str) -> Option<&Value> {
        let index = self
            .columns
            .iter()
            .position(|c| c == column)
            .or_else(|| {
                self.columns
                    .iter()
                    .position(|c| c.eq_ignore_ascii_case(column))
            })?;
        self.values.get(index)
    }

    /// Converts the value of `column` into `T`.
    pub fn get<T>(&self, column: &str) -> Result<T>
    where
        T: TryFrom<Value, Error = Error>,
    {
        let value = self
            .value(column)
            .ok_or_else(|| crate::err!("row has no column `{column}`; columns={:?}", self.columns))?;
        T::try_from(value.clone())
    }

    /// Like [`Row::get`], mapping SQL `NULL` to `None`.
    pub fn get_opt<T>(&self, column: &str) -> Result<Option<T>>
    where
        T: TryFrom<Value, Error = Error>,
    {
        match self.value(column) {
            Some(Value::Null) => Ok(None),
            _ => self.get(column).map(Some),
        }
    }
}
