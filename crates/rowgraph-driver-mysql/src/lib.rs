mod config;
pub use config::Config;

mod value;

use mysql_async::{
    prelude::{Queryable, ToValue},
    Conn, Params, Pool,
};
use rowgraph_core::{
    async_trait,
    driver::{Capability, Driver, Operation, Response},
    stmt::{Row, Statement},
    Error, Result,
};
use std::sync::Arc;
use url::Url;

/// MySQL driver over a connection pool. Each operation checks out its own
/// connection, so schema statements run in parallel.
#[derive(Debug)]
pub struct MySql {
    pool: Pool,
}

impl MySql {
    /// Creates a driver for a `mysql://` URL without contacting the server.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "mysql" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `mysql` scheme; url={url_str}"
            )));
        }

        if url.host_str().is_none() {
            return Err(Error::invalid_connection_url(format!(
                "missing host in connection URL; url={url_str}"
            )));
        }

        if url.path().is_empty() || url.path() == "/" {
            return Err(Error::invalid_connection_url(format!(
                "no database specified - missing path in connection URL; url={url_str}"
            )));
        }

        let opts = mysql_async::Opts::from_url(url.as_ref())
            .map_err(|err| Error::invalid_connection_url(err.to_string()))?;
        let opts = mysql_async::OptsBuilder::from_opts(opts).client_found_rows(true);

        Ok(Self {
            pool: Pool::new(opts),
        })
    }

    /// Creates a driver from a URL and checks the server is reachable.
    pub async fn connect_url(url: impl Into<String>) -> Result<Self> {
        let driver = Self::new(url)?;
        driver.ping().await?;
        Ok(driver)
    }

    /// Creates a driver from a [`Config`] and checks the server is
    /// reachable.
    pub async fn connect(config: &Config) -> Result<Self> {
        let driver = Self {
            pool: Pool::new(config.to_opts()?),
        };
        driver.ping().await?;

        log::info!(
            "connected to mysql; addr={} dbname={}",
            config.addr(),
            config.dbname()
        );

        Ok(driver)
    }

    async fn conn(&self) -> Result<Conn> {
        self.pool
            .get_conn()
            .await
            .map_err(Error::driver_operation_failed)
    }
}

impl From<Pool> for MySql {
    fn from(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Driver for MySql {
    fn capability(&self) -> &'static Capability {
        &Capability::MYSQL
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        let mut conn = self.conn().await?;

        match op {
            Operation::Ddl(sql) => {
                conn.query_drop(sql)
                    .await
                    .map_err(Error::driver_operation_failed)?;
                Ok(Response::count(0))
            }
            Operation::Execute(stmt) => {
                conn.exec_drop(stmt.sql.as_str(), params(&stmt))
                    .await
                    .map_err(Error::driver_operation_failed)?;
                Ok(Response::count(conn.affected_rows()))
            }
            Operation::Query(stmt) => {
                let rows: Vec<mysql_async::Row> = conn
                    .exec(stmt.sql.as_str(), params(&stmt))
                    .await
                    .map_err(Error::driver_operation_failed)?;

                Ok(Response::values(convert_rows(rows)))
            }
        }
    }

    async fn ping(&self) -> Result<()> {
        self.conn()
            .await?
            .ping()
            .await
            .map_err(Error::driver_operation_failed)
    }
}

fn params(stmt: &Statement) -> Params {
    if stmt.params.is_empty() {
        return Params::Empty;
    }

    Params::Positional(
        stmt.params
            .iter()
            .map(|param| value::Value(param).to_value())
            .collect(),
    )
}

fn convert_rows(rows: Vec<mysql_async::Row>) -> Vec<Row> {
    let Some(first) = rows.first() else {
        return vec![];
    };

    let columns: Arc<[String]> = first
        .columns_ref()
        .iter()
        .map(|column| column.name_str().into_owned())
        .collect();

    rows.into_iter()
        .map(|row| {
            let values = row
                .unwrap_raw()
                .into_iter()
                .map(|value| value::from_sql(value.unwrap_or(mysql_async::Value::NULL)))
                .collect();
            Row::new(columns.clone(), values)
        })
        .collect()
}
