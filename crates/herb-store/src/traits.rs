use std::collections::BTreeMap;

use herb_types::{Batch, BatchId};

use crate::error::{StoreError, StoreResult};

/// Read access to batches, used wherever an id has to be checked against
/// the batches that actually exist.
pub trait BatchReader {
    fn batches(&self) -> &BTreeMap<BatchId, Batch>;

    fn contains(&self, id: &BatchId) -> bool {
        self.batches().contains_key(id)
    }

    /// Fails with `BatchNotFound` for unknown ids.
    fn get(&self, id: &BatchId) -> StoreResult<&Batch> {
        self.batches()
            .get(id)
            .ok_or_else(|| StoreError::BatchNotFound(id.clone()))
    }

    /// Snapshot of every batch, keyed by id.
    fn list(&self) -> BTreeMap<BatchId, Batch> {
        self.batches().clone()
    }

    fn len(&self) -> usize {
        self.batches().len()
    }

    fn is_empty(&self) -> bool {
        self.batches().is_empty()
    }
}
