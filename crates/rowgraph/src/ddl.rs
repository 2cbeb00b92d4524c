use crate::TaskGroup;

use rowgraph_core::{
    driver::{Driver, Operation},
    DdlFailure, Error, Result,
};
use rowgraph_sql::SchemaPlan;

use std::sync::Arc;

/// Outcome of applying a [`SchemaPlan`].
///
/// Statements are applied in two phases, table creation and then foreign key
/// constraints. A failing statement never stops the others; every failure is
/// kept here together with its statement.
#[derive(Debug, Default)]
pub struct DdlReport {
    /// Statements the database accepted
    pub applied: usize,

    pub failures: Vec<DdlFailure>,

    /// The driver cannot add constraints to existing tables, so the
    /// constraint phase did not run.
    pub constraints_skipped: bool,

    /// Faults raised while extracting the schema
    pub faults: Vec<Error>,
}

impl DdlReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Converts the report into an error naming every failed statement.
    pub fn into_result(self) -> Result<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(Error::ddl_failed(self.failures))
        }
    }
}

/// Applies `plan`: every table and join table concurrently, then, once all
/// of them completed, every constraint concurrently.
pub(crate) async fn apply(driver: Arc<dyn Driver>, plan: &SchemaPlan) -> DdlReport {
    let mut report = DdlReport::default();

    log::info!(
        "applying schema; tables={} joins={} alters={}",
        plan.tables.len(),
        plan.joins.len(),
        plan.alters.len()
    );

    run_phase(&driver, plan.creates(), &mut report).await;

    if plan.alters.is_empty() {
        return finish(report);
    }

    if !driver.capability().alter_add_constraint {
        log::warn!(
            "driver cannot add constraints to existing tables; skipping {} constraint(s)",
            plan.alters.len()
        );
        report.constraints_skipped = true;
        return finish(report);
    }

    log::info!("tables created; adding constraints");
    run_phase(&driver, plan.constraints(), &mut report).await;

    finish(report)
}

async fn run_phase<'a>(
    driver: &Arc<dyn Driver>,
    statements: impl Iterator<Item = &'a str>,
    report: &mut DdlReport,
) {
    let mut group = TaskGroup::new();

    for statement in statements {
        let driver = driver.clone();
        let statement = statement.to_string();

        group.spawn(async move {
            log::debug!("exec DDL: {statement}");
            match driver.exec(Operation::Ddl(statement.clone())).await {
                Ok(_) => Ok(()),
                Err(err) => Err(DdlFailure::new(statement, err)),
            }
        });
    }

    for res in group.join().await {
        match res {
            Ok(Ok(())) => report.applied += 1,
            Ok(Err(failure)) => report.failures.push(failure),
            Err(err) => report.failures.push(DdlFailure::new("<panicked statement>", err)),
        }
    }
}

fn finish(report: DdlReport) -> DdlReport {
    for failure in &report.failures {
        log::warn!("schema statement failed: {failure}");
    }

    log::info!(
        "schema applied; ok={} failed={}",
        report.applied,
        report.failures.len()
    );

    report
}
