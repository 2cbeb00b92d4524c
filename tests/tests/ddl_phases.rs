use rowgraph::driver::Capability;
use std::time::Duration;
use tests::{
    models::{Broken, Customer, Order, Product},
    LoggingDriver,
};

fn register(builder: &mut rowgraph::db::Builder) {
    builder
        .register::<Customer>()
        .register::<Order>()
        .register::<Product>();
}

fn is_create(sql: &str) -> bool {
    sql.starts_with("CREATE TABLE")
}

fn is_alter(sql: &str) -> bool {
    sql.starts_with("ALTER TABLE")
}

#[tokio::test]
async fn constraints_wait_for_every_table() {
    let driver = LoggingDriver::fake(&Capability::MYSQL)
        .delay("`product` (", Duration::from_millis(50))
        .delay("`order_product`", Duration::from_millis(20));
    let log = driver.log();
    let db = tests::fake_db(driver, register);

    let report = db.create_tables().await;
    assert!(report.is_ok());
    assert!(!report.constraints_skipped);

    // customer, address, order, product, order_product, then three constraints
    assert_eq!(report.applied, 8);

    let statements = log.statements();
    assert_eq!(statements.iter().filter(|sql| is_create(sql)).count(), 5);
    assert_eq!(statements.iter().filter(|sql| is_alter(sql)).count(), 3);

    let last_create = log.last_finished_at(is_create).unwrap();
    let first_alter = log.started_at(is_alter).unwrap();
    assert!(
        last_create < first_alter,
        "constraint started before every table was created: {:#?}",
        log.events()
    );
}

#[tokio::test]
async fn failures_are_collected() {
    let driver = LoggingDriver::fake(&Capability::MYSQL).fail("`address`", "disk full");
    let log = driver.log();
    let db = tests::fake_db(driver, register);

    let report = db.create_tables().await;

    // the failing statement does not stop the others
    assert_eq!(log.len(), 8);
    assert_eq!(report.applied, 7);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].statement.contains("`address`"));
    assert!(report.failures[0].cause.to_string().contains("disk full"));

    let err = report.into_result().unwrap_err();
    assert!(err.is_ddl_failed());
    assert_eq!(err.ddl_failures().unwrap().len(), 1);
    assert!(err.to_string().contains("`address`"), "{err}");
}

#[tokio::test]
async fn failed_constraint_is_reported() {
    let driver = LoggingDriver::fake(&Capability::MYSQL).fail("fk_order_customer", "no such table");
    let db = tests::fake_db(driver, register);

    let report = db.create_tables().await;

    assert_eq!(report.applied, 7);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].statement.starts_with("ALTER TABLE `order`"));
}

#[tokio::test]
async fn constraints_skipped_without_alter_support() {
    let driver = LoggingDriver::fake(&Capability::SQLITE);
    let log = driver.log();
    let db = tests::fake_db(driver, register);

    let report = db.create_tables().await;

    assert!(report.is_ok());
    assert!(report.constraints_skipped);
    assert_eq!(report.applied, 5);
    assert!(log.statements().iter().all(|sql| is_create(sql)));
    assert!(log.statements().iter().any(|sql| sql.contains("\"order\"")));
}

#[tokio::test]
async fn extraction_faults_are_reported() {
    let driver = LoggingDriver::fake(&Capability::MYSQL);
    let db = tests::fake_db(driver, |builder| {
        builder.register::<Product>().register::<Broken>();
    });

    let report = db.create_tables().await;

    assert!(report.is_ok());
    assert_eq!(report.applied, 1);
    assert_eq!(report.faults.len(), 1);
    assert!(report.faults[0].is_invalid_schema());
}

#[tokio::test]
async fn nothing_to_apply() {
    let driver = LoggingDriver::fake(&Capability::MYSQL);
    let log = driver.log();
    let db = tests::fake_db(driver, |_| {});

    let report = db.create_tables().await;

    assert!(report.is_ok());
    assert_eq!(report.applied, 0);
    assert!(log.is_empty());
}
