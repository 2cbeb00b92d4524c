use crate::{Db, Entity};

use async_recursion::async_recursion;
use rowgraph_core::{Error, Result};

/// Saves record graphs.
///
/// Every record is inserted before its children, children are visited
/// depth-first in the order their parent lists them, and the join rows
/// relating parents to children are written once all records of the call are
/// saved. The first failure stops the save; rows already written stay.
pub(crate) struct Persister<'a> {
    db: &'a Db,

    /// Join rows discovered so far, written last
    joins: Vec<Box<dyn Entity>>,

    /// `(table, id)` of the records between the root and the current one
    path: Vec<(String, String)>,
}

impl<'a> Persister<'a> {
    pub(crate) fn new(db: &'a Db) -> Persister<'a> {
        Persister {
            db,
            joins: vec![],
            path: vec![],
        }
    }

    pub(crate) async fn save_all(mut self, records: &[&dyn Entity]) -> Result<()> {
        for record in records {
            let key = self.enter(*record)?;
            self.db.insert(*record).await?;

            let children = record.child_entities()?;
            self.save_children(*record, &children).await?;
            self.leave(key);
        }

        log::debug!("saving {} join row(s)", self.joins.len());

        for join in std::mem::take(&mut self.joins) {
            self.db.insert(&*join).await?;
        }

        Ok(())
    }

    #[async_recursion]
    async fn save_children(&mut self, parent: &dyn Entity, children: &[&dyn Entity]) -> Result<()> {
        for child in children {
            let key = self.enter(*child)?;
            self.db.insert(*child).await?;

            if let Some(join) = parent.join_with(*child)? {
                self.joins.push(join);
            }

            let grandchildren = child.child_entities()?;
            if !grandchildren.is_empty() {
                self.save_children(*child, &grandchildren).await?;
            }

            self.leave(key);
        }

        Ok(())
    }

    fn enter(&mut self, record: &dyn Entity) -> Result<(String, String)> {
        let key = (record.table(), record.identity()?);

        if self.path.contains(&key) {
            return Err(Error::cyclic_graph(key.0, key.1));
        }

        self.path.push(key.clone());
        Ok(key)
    }

    fn leave(&mut self, key: (String, String)) {
        let popped = self.path.pop();
        debug_assert_eq!(popped.as_ref(), Some(&key));
    }
}
