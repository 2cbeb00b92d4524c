mod value;

use rowgraph_core::{
    async_trait,
    driver::{Capability, Driver, Operation, Response},
    stmt::{Row, Statement},
    Error, Result,
};
use rusqlite::Connection;
use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};
use url::Url;

/// SQLite driver over a single connection.
///
/// Statements are executed one at a time; concurrent callers wait on the
/// connection lock.
#[derive(Debug)]
pub struct Sqlite {
    connection: Mutex<Connection>,
}

impl Sqlite {
    /// Opens the database named by a `sqlite:` URL. `sqlite::memory:` opens a
    /// private in-memory database.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Self::in_memory()
        } else {
            Self::open(url.path())
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(Error::driver_operation_failed)?;
        Ok(Self::from_connection(connection))
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).map_err(Error::driver_operation_failed)?;
        Ok(Self::from_connection(connection))
    }

    fn from_connection(connection: Connection) -> Self {
        Self {
            connection: Mutex::new(connection),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| rowgraph_core::err!("sqlite connection lock poisoned"))
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        let connection = self.lock()?;

        match op {
            Operation::Ddl(sql) => {
                log::trace!("sqlite ddl: {sql}");
                connection
                    .execute_batch(&sql)
                    .map_err(Error::driver_operation_failed)?;
                Ok(Response::count(0))
            }
            Operation::Execute(stmt) => execute(&connection, &stmt),
            Operation::Query(stmt) => query(&connection, &stmt),
        }
    }
}

fn execute(connection: &Connection, stmt: &Statement) -> Result<Response> {
    let mut prepared = connection
        .prepare_cached(&stmt.sql)
        .map_err(Error::driver_operation_failed)?;

    let count = prepared
        .execute(rusqlite::params_from_iter(stmt.params.iter().map(value::Value)))
        .map_err(Error::driver_operation_failed)?;

    Ok(Response::count(count as u64))
}

fn query(connection: &Connection, stmt: &Statement) -> Result<Response> {
    let mut prepared = connection
        .prepare_cached(&stmt.sql)
        .map_err(Error::driver_operation_failed)?;

    let columns: Arc<[String]> = prepared
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = prepared
        .query(rusqlite::params_from_iter(stmt.params.iter().map(value::Value)))
        .map_err(Error::driver_operation_failed)?;

    let mut ret = vec![];

    while let Some(row) = rows.next().map_err(Error::driver_operation_failed)? {
        let values = (0..columns.len())
            .map(|index| value::from_sql(row, index))
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::driver_operation_failed)?;

        ret.push(Row::new(columns.clone(), values));
    }

    Ok(Response::values(ret))
}
