/**
 * Versioned Ordering Sequence
 *
 * A `Sequence` is the persisted display order of a container's children:
 * the column ids of a board or the task ids of a column. Each structural
 * change bumps `version`, so a compare-and-set on the version is enough to
 * detect a concurrent overwrite.
 *
 * The primitives here never fail. Contract checks (duplicates, membership,
 * index validity) live in the ordering engine.
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordered, duplicate-free list of child ids with a monotonic version stamp
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    ids: Vec<Uuid>,
    version: u64,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sequence from existing ids at version 0
    pub fn from_ids(ids: Vec<Uuid>) -> Self {
        Self { ids, version: 0 }
    }

    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.ids.contains(id)
    }

    pub fn position(&self, id: &Uuid) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    pub(crate) fn push(&mut self, id: Uuid) {
        self.ids.push(id);
        self.bump();
    }

    /// Insert at `index`, clamped to the current length
    pub(crate) fn insert_clamped(&mut self, index: usize, id: Uuid) -> usize {
        let index = index.min(self.ids.len());
        self.ids.insert(index, id);
        self.bump();
        index
    }

    /// Remove every occurrence of `id`, returning the first index it held
    pub(crate) fn remove(&mut self, id: &Uuid) -> Option<usize> {
        let first = self.position(id)?;
        self.ids.retain(|candidate| candidate != id);
        self.bump();
        Some(first)
    }

    pub(crate) fn replace(&mut self, ids: Vec<Uuid>) {
        self.ids = ids;
        self.bump();
    }

    /// Drain all ids, leaving an empty sequence
    pub(crate) fn take_all(&mut self) -> Vec<Uuid> {
        let ids = std::mem::take(&mut self.ids);
        self.bump();
        ids
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}
