use crate::TaskGroup;

use rowgraph_core::{
    schema::{extract, RecordRef, SchemaFragment, SchemaMap},
    Error, Result,
};

use std::panic::{self, AssertUnwindSafe};

/// Column descriptors of every registered record type.
#[derive(Debug, Default)]
pub struct Extraction {
    pub map: SchemaMap,

    /// Record types, or embedded subtrees, that contributed nothing because
    /// their description is faulty.
    pub faults: Vec<Error>,
}

impl Extraction {
    /// Extracts every record concurrently, one blocking unit per type, then
    /// merges the fragments in registration order.
    ///
    /// A faulty type never fails the whole extraction: it is logged, kept in
    /// `faults` and contributes nothing.
    pub async fn run(records: &[RecordRef]) -> Extraction {
        let mut group = TaskGroup::new();

        for (index, record) in records.iter().copied().enumerate() {
            group.spawn_blocking(move || (index, extract_unwinding(record)));
        }

        let mut fragments = vec![];
        let mut lost = vec![];
        let mut reported = vec![false; records.len()];
        let mut ret = Extraction::default();

        for res in group.join().await {
            match res {
                Ok((index, res)) => {
                    reported[index] = true;
                    match res {
                        Ok(fragment) => fragments.push((index, records[index].name, fragment)),
                        Err(err) => ret.push_fault(records[index].name, err),
                    }
                }
                Err(err) => lost.push(err),
            }
        }

        // A unit that never reported was cancelled along with the runtime.
        let unreported = reported
            .iter()
            .enumerate()
            .filter(|(_, reported)| !**reported)
            .map(|(index, _)| records[index].name);
        for (name, err) in unreported.zip(lost) {
            ret.push_fault(name, err);
        }

        fragments.sort_by_key(|(index, ..)| *index);

        for (_, name, fragment) in fragments {
            for fault in fragment.faults {
                ret.push_fault(name, fault);
            }
            ret.map.merge(fragment.map);
        }

        log::info!(
            "extracted {} record type(s) into {} table key(s); faults={}",
            records.len(),
            ret.map.len(),
            ret.faults.len()
        );

        ret
    }

    fn push_fault(&mut self, record: &str, err: Error) {
        let err = if err.is_invalid_schema() {
            err
        } else {
            Error::invalid_schema(record, err.to_string())
        };

        log::warn!("skipping `{record}`: {err}");
        self.faults.push(err);
    }

    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Extracts `record`, turning a panic in its schema description into an
/// error for that type.
fn extract_unwinding(record: RecordRef) -> Result<SchemaFragment> {
    panic::catch_unwind(AssertUnwindSafe(|| extract(record))).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());

        Err(Error::invalid_schema(
            record.name,
            format!("schema description panicked: {message}"),
        ))
    })
}
