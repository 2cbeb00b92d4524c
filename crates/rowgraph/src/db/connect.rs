use crate::Result;

use rowgraph_core::{driver::Driver, Error};

use std::sync::Arc;
use url::Url;

/// Opens a driver for a connection URL.
///
/// The scheme selects the driver: `sqlite:` (feature `sqlite`) or `mysql:`
/// (feature `mysql`). MySQL connections are pinged before returning.
pub async fn connect(url: &str) -> Result<Arc<dyn Driver>> {
    let parsed = Url::parse(url)
        .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

    match parsed.scheme() {
        "mysql" => connect_mysql(url).await,
        "sqlite" => connect_sqlite(url),
        scheme => Err(Error::invalid_connection_url(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "mysql")]
async fn connect_mysql(url: &str) -> Result<Arc<dyn Driver>> {
    let driver = rowgraph_driver_mysql::MySql::connect_url(url).await?;
    Ok(Arc::new(driver))
}

#[cfg(not(feature = "mysql"))]
async fn connect_mysql(_url: &str) -> Result<Arc<dyn Driver>> {
    Err(Error::invalid_connection_url("`mysql` feature not enabled"))
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Arc<dyn Driver>> {
    let driver = rowgraph_driver_sqlite::Sqlite::new(url)?;
    Ok(Arc::new(driver))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Arc<dyn Driver>> {
    Err(Error::invalid_connection_url("`sqlite` feature not enabled"))
}
