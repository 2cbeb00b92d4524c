mod builder;
pub use builder::Builder;

mod connect;
pub use connect::connect;

use crate::{ddl, persist::Persister, DdlReport, Entity, Extraction, Record};

use rowgraph_core::{
    driver::{Driver, Operation},
    err,
    schema::{normalize, RecordRef},
    stmt::{Row, Statement, Value},
    Error, Result, RowOp,
};
use rowgraph_sql::{synthesize, Query, SchemaPlan, Serializer};

use std::sync::Arc;

/// A handle to a database and the record types registered with it.
///
/// Cloning is cheap; clones share the driver.
#[derive(Debug, Clone)]
pub struct Db {
    driver: Arc<dyn Driver>,
    serializer: Serializer,
    records: Arc<[RecordRef]>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    pub fn records(&self) -> &[RecordRef] {
        &self.records
    }

    /// Extracts the column descriptors of every registered record type.
    pub async fn extract(&self) -> Extraction {
        Extraction::run(&self.records).await
    }

    /// Schema statements for every registered record type, along with the
    /// extraction faults met while deriving them.
    pub async fn schema_plan(&self) -> (SchemaPlan, Vec<Error>) {
        let extraction = self.extract().await;
        (synthesize(&extraction.map, self.serializer), extraction.faults)
    }

    /// Creates every missing table, join table and foreign key constraint.
    ///
    /// Failures do not stop the remaining statements; they are collected in
    /// the returned report. Nothing is rolled back.
    pub async fn create_tables(&self) -> DdlReport {
        let (plan, faults) = self.schema_plan().await;
        let mut report = ddl::apply(self.driver.clone(), &plan).await;
        report.faults = faults;
        report
    }

    /// Loads the record with the given id.
    pub async fn get<T: Record>(&self, id: &str) -> Result<T> {
        let table = T::table_name();
        let stmt = self.serializer.get(&table, id);

        let rows = self
            .query_rows(stmt)
            .await
            .map_err(|err| Error::row_operation(&table, RowOp::Select, Some(id), err))?;

        match rows.first() {
            Some(row) => T::load(row),
            None => Err(Error::record_not_found(format!("{table} {id:?}"))),
        }
    }

    /// Loads every record with the given id.
    pub async fn select<T: Record>(&self, id: &str) -> Result<Vec<T>> {
        let table = T::table_name();
        let stmt = self.serializer.select_by_id(&table, id);

        let rows = self
            .query_rows(stmt)
            .await
            .map_err(|err| Error::row_operation(&table, RowOp::Select, Some(id), err))?;

        rows.iter().map(T::load).collect()
    }

    /// Loads every record whose id is in `ids`.
    pub async fn select_in<T: Record>(&self, ids: &[&str]) -> Result<Vec<T>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let table = T::table_name();
        let stmt = self.serializer.select_in(&table, ids);

        let rows = self
            .query_rows(stmt)
            .await
            .map_err(|err| Error::row_operation(&table, RowOp::Select, None, err))?;

        rows.iter().map(T::load).collect()
    }

    /// Runs an ad-hoc query, loading each row as a `T`.
    pub async fn query<T: Record>(&self, query: &Query) -> Result<Vec<T>> {
        let stmt = self.serializer.query(query);

        let rows = self
            .query_rows(stmt)
            .await
            .map_err(|err| Error::row_operation(query.table(), RowOp::Select, None, err))?;

        rows.iter().map(T::load).collect()
    }

    /// Inserts the row of a single entity. Children are not saved.
    pub async fn insert(&self, entity: &dyn Entity) -> Result<()> {
        let table = entity.table();
        let id = entity.identity().ok();
        let (columns, values): (Vec<String>, Vec<Value>) = entity.values()?.into_iter().unzip();

        if columns.is_empty() {
            return Err(Error::row_operation(
                &table,
                RowOp::Insert,
                id.as_deref(),
                err!("`{}` declares no persisted column", entity.type_name()),
            ));
        }

        let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
        let stmt = self.serializer.insert(&table, &columns, values);

        log::debug!("insert {table}; id={id:?} columns={columns:?}");

        self.execute(stmt)
            .await
            .map(|_| ())
            .map_err(|err| Error::row_operation(&table, RowOp::Insert, id.as_deref(), err))
    }

    /// Updates the given columns of the `T` with id `id`, returning the number
    /// of rows changed.
    pub async fn update<T: Record>(&self, id: &str, assignments: &[(&str, Value)]) -> Result<u64> {
        let table = T::table_name();

        if assignments.is_empty() {
            return Ok(0);
        }

        let stmt = self.serializer.update(&table, id, assignments);

        self.execute(stmt)
            .await
            .map_err(|err| Error::row_operation(&table, RowOp::Update, Some(id), err))
    }

    /// Deletes the row of an entity.
    pub async fn delete(&self, entity: &dyn Entity) -> Result<()> {
        let table = entity.table();
        let id = entity.identity()?;
        let stmt = self.serializer.delete(&table, &id);

        self.execute(stmt)
            .await
            .map(|_| ())
            .map_err(|err| Error::row_operation(&table, RowOp::Delete, Some(&id), err))
    }

    /// Saves `root`, every record it owns and the join rows relating them.
    ///
    /// This is not transactional. When a row fails to save, the save stops and
    /// the rows written before it remain.
    pub async fn save(&self, root: &dyn Entity) -> Result<()> {
        self.save_all(&[root]).await
    }

    /// Saves each record graph in turn; see [`Db::save`].
    pub async fn save_all(&self, records: &[&dyn Entity]) -> Result<()> {
        Persister::new(self).save_all(records).await
    }

    /// Ids of the `C` records associated with `parent` through the
    /// `<parent>_<child>` join table.
    pub async fn child_ids<P: Record, C: Record>(&self, parent: &P) -> Result<Vec<String>> {
        let parent_name = normalize(P::NAME);
        let child_name = normalize(C::NAME);
        let join_table = format!("{parent_name}_{child_name}");
        let child_key = format!("{child_name}_id");
        let parent_id = parent.id()?;

        let stmt = self.serializer.child_ids(
            &join_table,
            &format!("{parent_name}_id"),
            &child_key,
            &parent_id,
        );

        let rows = self
            .query_rows(stmt)
            .await
            .map_err(|err| Error::row_operation(&join_table, RowOp::Select, Some(&parent_id), err))?;

        rows.iter().map(|row| row.get(&child_key)).collect()
    }

    /// Loads the `C` records associated with `parent`; see [`Db::child_ids`].
    pub async fn children<P: Record, C: Record>(&self, parent: &P) -> Result<Vec<C>> {
        let ids = self
            .child_ids::<P, C>(parent)
            .await
            .map_err(|err| err.context(err!("get child ids")))?;

        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();

        self.select_in::<C>(&ids)
            .await
            .map_err(|err| err.context(err!("get child records")))
    }

    async fn query_rows(&self, stmt: Statement) -> Result<Vec<Row>> {
        self.driver.exec(Operation::Query(stmt)).await?.into_values()
    }

    async fn execute(&self, stmt: Statement) -> Result<u64> {
        let response = self.driver.exec(Operation::Execute(stmt)).await?;
        Ok(response.rows.count())
    }
}
