use super::Db;
use crate::{Record, Result};

use rowgraph_core::{driver::Driver, schema::RecordRef};
use rowgraph_sql::Serializer;

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    records: Vec<RecordRef>,
}

impl Builder {
    /// Registers a record type. Registering the same type twice has no
    /// effect.
    pub fn register<T: Record>(&mut self) -> &mut Self {
        let record = RecordRef::of::<T>();

        if !self.records.contains(&record) {
            self.records.push(record);
        }

        self
    }

    pub fn records(&self) -> &[RecordRef] {
        &self.records
    }

    /// Connects to the database named by `url`; see [`connect`](super::connect).
    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        let driver = super::connect(url).await?;
        Ok(self.build_shared(driver))
    }

    pub fn build(&mut self, driver: impl Driver) -> Db {
        self.build_shared(Arc::new(driver))
    }

    pub fn build_shared(&mut self, driver: Arc<dyn Driver>) -> Db {
        log::info!("registered {} record type(s)", self.records.len());

        Db {
            serializer: Serializer::for_capability(driver.capability()),
            driver,
            records: self.records.clone().into(),
        }
    }
}
