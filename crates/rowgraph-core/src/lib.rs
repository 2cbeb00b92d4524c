pub mod driver;
pub use driver::Driver;

mod error;
pub use error::{DdlFailure, Error, IntoError, RowOp};

pub mod schema;
pub use schema::{RecordSchema, SchemaMap};

pub mod stmt;

/// A Result type alias that uses rowgraph's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
