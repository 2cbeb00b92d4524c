pub mod db;
pub use db::Db;

mod ddl;
pub use ddl::DdlReport;

mod extract;
pub use extract::Extraction;

mod persist;

mod record;
pub use record::{new_id, Association, Entity, Record};

mod task_group;
pub use task_group::TaskGroup;

pub use rowgraph_core::{driver, schema, stmt, Error, Result};
pub use rowgraph_sql::{CmpOp, JoinKind, Query, TableRef};
