use rowgraph_core::{err, Result};

use std::future::Future;
use tokio::task::JoinSet;

/// A set of independent units of work joined at a single barrier.
///
/// Units run concurrently on the tokio runtime. [`join`](TaskGroup::join)
/// waits for every unit and returns their outputs in completion order; a unit
/// that panicked yields an error instead of tearing down the caller.
#[derive(Debug)]
pub struct TaskGroup<T> {
    tasks: JoinSet<T>,
}

impl<T: Send + 'static> TaskGroup<T> {
    pub fn new() -> TaskGroup<T> {
        TaskGroup {
            tasks: JoinSet::new(),
        }
    }

    pub fn spawn<F>(&mut self, unit: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.tasks.spawn(unit);
    }

    /// Spawns a unit that runs on the blocking thread pool.
    pub fn spawn_blocking<F>(&mut self, unit: F)
    where
        F: FnOnce() -> T + Send + 'static,
    {
        self.tasks.spawn_blocking(unit);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub async fn join(mut self) -> Vec<Result<T>> {
        let mut ret = Vec::with_capacity(self.tasks.len());

        while let Some(res) = self.tasks.join_next().await {
            ret.push(res.map_err(|join_err| err!("task failed: {join_err}")));
        }

        ret
    }
}

impl<T: Send + 'static> Default for TaskGroup<T> {
    fn default() -> Self {
        TaskGroup::new()
    }
}
