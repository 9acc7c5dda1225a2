use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use herb_types::{BatchId, Clock, RecallRecord, SystemClock};
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::traits::BatchReader;

/// Lifecycle status of a batch as shown on dashboards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BatchStatus {
    Active,
    Recalled,
}

impl BatchStatus {
    pub const ALL: [BatchStatus; 2] = [BatchStatus::Active, BatchStatus::Recalled];
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchStatus::Active => f.write_str("Active"),
            BatchStatus::Recalled => f.write_str("Recalled"),
        }
    }
}

/// Set of recalled batch ids with the reason for each.
pub struct RecallSet {
    clock: Arc<dyn Clock>,
    recalls: BTreeMap<BatchId, RecallRecord>,
}

impl RecallSet {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            recalls: BTreeMap::new(),
        }
    }

    /// Mark a batch recalled.
    ///
    /// The batch must exist in `batches`; otherwise the set is unchanged.
    /// There is no un-recall. Recalling a recalled batch again succeeds and
    /// returns the first record, which is kept as is.
    pub fn recall<B: BatchReader>(
        &mut self,
        batches: &B,
        id: &BatchId,
        reason: impl Into<String>,
    ) -> StoreResult<RecallRecord> {
        if !batches.contains(id) {
            return Err(StoreError::BatchNotFound(id.clone()));
        }
        if let Some(existing) = self.recalls.get(id) {
            tracing::debug!(batch_id = %id, "batch already recalled");
            return Ok(existing.clone());
        }

        let record = RecallRecord {
            reason: reason.into(),
            recalled_at: self.clock.now(),
        };
        tracing::debug!(batch_id = %id, "batch recalled");
        self.recalls.insert(id.clone(), record.clone());
        Ok(record)
    }

    pub fn is_recalled(&self, id: &BatchId) -> bool {
        self.recalls.contains_key(id)
    }

    pub fn status(&self, id: &BatchId) -> BatchStatus {
        if self.is_recalled(id) {
            BatchStatus::Recalled
        } else {
            BatchStatus::Active
        }
    }

    pub fn get(&self, id: &BatchId) -> Option<&RecallRecord> {
        self.recalls.get(id)
    }

    /// Snapshot of all recall markers.
    pub fn list(&self) -> BTreeMap<BatchId, RecallRecord> {
        self.recalls.clone()
    }

    pub fn len(&self) -> usize {
        self.recalls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recalls.is_empty()
    }
}

impl Default for RecallSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecallSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecallSet")
            .field("recalls", &self.recalls.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use herb_types::{GeoPoint, Species};

    use super::*;
    use crate::memory::BatchStore;

    fn store_with_batch() -> (BatchStore, BatchId) {
        let mut store = BatchStore::default();
        let id = store
            .create_batch(Species::Brahmi, GeoPoint::new(9.49, 76.33).unwrap(), "Anil")
            .unwrap()
            .id;
        (store, id)
    }

    #[test]
    fn recall_then_is_recalled() {
        let (store, id) = store_with_batch();
        let mut recalls = RecallSet::default();

        assert!(!recalls.is_recalled(&id));
        assert_eq!(recalls.status(&id), BatchStatus::Active);

        let record = recalls.recall(&store, &id, "spoilage").unwrap();
        assert_eq!(record.reason, "spoilage");
        assert!(recalls.is_recalled(&id));
        assert_eq!(recalls.status(&id), BatchStatus::Recalled);
        assert_eq!(recalls.get(&id), Some(&record));
    }

    #[test]
    fn unknown_batch_leaves_set_unchanged() {
        let (store, _) = store_with_batch();
        let mut recalls = RecallSet::default();
        let unknown = BatchId::parse("NEE-20000101-000000").unwrap();

        let err = recalls.recall(&store, &unknown, "x").unwrap_err();
        assert_eq!(err, StoreError::BatchNotFound(unknown.clone()));
        assert!(recalls.is_empty());
        assert!(!recalls.is_recalled(&unknown));
    }

    #[test]
    fn second_recall_keeps_first_record() {
        let (store, id) = store_with_batch();
        let mut recalls = RecallSet::default();
        let first = recalls.recall(&store, &id, "first").unwrap();

        let again = recalls.recall(&store, &id, "second").unwrap();
        assert_eq!(again, first);
        assert_eq!(recalls.get(&id).unwrap().reason, "first");
        assert_eq!(recalls.status(&id), BatchStatus::Recalled);
        assert_eq!(recalls.len(), 1);
    }

    #[test]
    fn status_display() {
        assert_eq!(BatchStatus::Recalled.to_string(), "Recalled");
        assert_eq!(BatchStatus::ALL.len(), 2);
    }
}
