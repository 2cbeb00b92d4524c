mod capability;
pub use capability::{Capability, Flavor};

mod operation;
pub use operation::Operation;

mod response;
pub use response::{Response, Rows};

use crate::{async_trait, stmt::Statement, Result};

use std::fmt::Debug;

/// A database the mapper can talk to.
///
/// Implementations are shared behind an `Arc` and called from many tasks at
/// once while a schema is applied, so `exec` takes `&self`. Serializing
/// access, or handing out pooled connections, is the driver's concern.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Describes the driver's capability, which informs SQL generation.
    fn capability(&self) -> &'static Capability;

    /// Execute a database operation
    async fn exec(&self, op: Operation) -> Result<Response>;

    /// Round-trip a trivial statement to verify the database is reachable.
    async fn ping(&self) -> Result<()> {
        self.exec(Operation::Query(Statement::new("SELECT 1")))
            .await
            .map(|_| ())
    }
}
