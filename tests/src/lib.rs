mod exec_log;
pub use exec_log::{Event, ExecLog};

pub use logging_driver::LoggingDriver;

pub mod models;

use rowgraph::Db;

/// Installs the test logger once per test binary. Set `RUST_LOG` to see the
/// mapper's output.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A database handle over a [`LoggingDriver`] that answers every statement
/// without a database.
pub fn fake_db(driver: LoggingDriver, register: impl FnOnce(&mut rowgraph::db::Builder)) -> Db {
    init_logging();

    let mut builder = Db::builder();
    register(&mut builder);
    builder.build(driver)
}

/// A fresh in-memory SQLite database with every sample record registered and
/// its tables created.
pub async fn sqlite_db() -> (Db, ExecLog) {
    init_logging();

    let sqlite = rowgraph_driver_sqlite::Sqlite::in_memory().unwrap();
    let driver = LoggingDriver::wrap(sqlite);
    let log = driver.log();

    let mut builder = Db::builder();
    builder
        .register::<models::Customer>()
        .register::<models::Order>()
        .register::<models::Product>();

    let db = builder.build(driver);
    let report = db.create_tables().await;
    assert!(report.is_ok(), "{:#?}", report.failures);

    log.clear();
    (db, log)
}
