mod column_def;

pub mod ddl;
pub use ddl::{synthesize, AlterSpec, CreateTable, JoinTableSpec, SchemaPlan};

pub mod query;
pub use query::{CmpOp, JoinKind, Query, TableRef};

mod row;

mod serializer;
pub use serializer::{Ident, Serializer};

/// Column every record table is keyed by, and every foreign key references.
pub const ID_COLUMN: &str = "id";
