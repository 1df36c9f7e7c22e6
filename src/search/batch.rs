use std::collections::HashMap;

use crate::sap::SapDocument;

/// Documents staged for one atomic commit.
///
/// Created by [`super::SapIndex::new_batch`] and consumed by
/// [`super::SapIndex::commit`].
#[derive(Debug, Default)]
pub struct IndexBatch {
    staged: Vec<(String, SapDocument)>,
    /// Position of each id in `staged`.
    positions: HashMap<String, usize>,
}

impl IndexBatch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stage a document under `id`. Staging an id twice keeps the later document
    /// in the position of the first.
    pub fn index(&mut self, id: impl Into<String>, doc: SapDocument) {
        let id = id.into();
        match self.positions.get(&id) {
            Some(&slot) => self.staged[slot].1 = doc,
            None => {
                self.positions.insert(id.clone(), self.staged.len());
                self.staged.push((id, doc));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Staged ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.staged.iter().map(|(id, _)| id.as_str())
    }

    pub(crate) fn into_staged(self) -> Vec<(String, SapDocument)> {
        self.staged
    }
}
