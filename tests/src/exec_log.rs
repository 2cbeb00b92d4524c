use rowgraph_core::driver::Operation;
use std::sync::{Arc, Mutex};

/// Something that happened to an operation passing through a
/// [`LoggingDriver`](crate::LoggingDriver).
#[derive(Debug, Clone)]
pub enum Event {
    /// The operation was dispatched to the driver
    Started(Operation),

    /// The driver finished it; `ok` is false when it failed
    Finished { sql: String, ok: bool },
}

/// A handle on the operations logged by a driver, shared with it.
#[derive(Debug, Clone, Default)]
pub struct ExecLog {
    events: Arc<Mutex<Vec<Event>>>,
}

impl ExecLog {
    pub(crate) fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Operations in dispatch order
    pub fn operations(&self) -> Vec<Operation> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Started(op) => Some(op),
                Event::Finished { .. } => None,
            })
            .collect()
    }

    /// SQL of every dispatched operation, in dispatch order
    pub fn statements(&self) -> Vec<String> {
        self.operations()
            .iter()
            .map(|op| op.sql().to_string())
            .collect()
    }

    /// SQL of every dispatched non-query operation.
    pub fn writes(&self) -> Vec<String> {
        self.operations()
            .iter()
            .filter(|op| !matches!(op, Operation::Query(_)))
            .map(|op| op.sql().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.operations().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index in the event list of the first start matching `predicate`.
    pub fn started_at(&self, predicate: impl Fn(&str) -> bool) -> Option<usize> {
        self.events().iter().position(|event| match event {
            Event::Started(op) => predicate(op.sql()),
            _ => false,
        })
    }

    /// Index in the event list of the last finish matching `predicate`.
    pub fn last_finished_at(&self, predicate: impl Fn(&str) -> bool) -> Option<usize> {
        self.events().iter().rposition(|event| match event {
            Event::Finished { sql, .. } => predicate(sql),
            _ => false,
        })
    }
}
