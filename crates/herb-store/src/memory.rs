use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use herb_types::{
    Batch, BatchId, Clock, GeoPoint, ProcessingStep, Species, SystemClock, TestResult, Validate,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::BatchReader;

/// In-memory batch store.
///
/// Batches are created once and then only grow. There is no delete.
pub struct BatchStore {
    clock: Arc<dyn Clock>,
    batches: BTreeMap<BatchId, Batch>,
}

impl BatchStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            batches: BTreeMap::new(),
        }
    }

    /// Create a batch stamped with the current time.
    ///
    /// The id is derived from species and creation second; if that id is
    /// already taken the call fails with `DuplicateBatch` and the existing
    /// batch is left untouched.
    pub fn create_batch(
        &mut self,
        species: Species,
        location: GeoPoint,
        collector: impl Into<String>,
    ) -> StoreResult<Batch> {
        location.validate()?;
        let batch = Batch::collect(species, location, collector, self.clock.now());

        if self.batches.contains_key(&batch.id) {
            return Err(StoreError::DuplicateBatch(batch.id));
        }

        tracing::debug!(batch_id = %batch.id, species = %species, "batch created");
        self.batches.insert(batch.id.clone(), batch.clone());
        Ok(batch)
    }

    /// Append a processing step to an existing batch.
    pub fn add_processing_step(&mut self, id: &BatchId, step: ProcessingStep) -> StoreResult<()> {
        let batch = self.get_mut(id)?;
        batch.processing_steps.push(step);
        Ok(())
    }

    /// Append a test result to an existing batch.
    pub fn add_test_result(&mut self, id: &BatchId, result: TestResult) -> StoreResult<()> {
        let batch = self.get_mut(id)?;
        batch.test_results.push(result);
        Ok(())
    }

    fn get_mut(&mut self, id: &BatchId) -> StoreResult<&mut Batch> {
        self.batches
            .get_mut(id)
            .ok_or_else(|| StoreError::BatchNotFound(id.clone()))
    }
}

impl Default for BatchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BatchStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchStore")
            .field("batches", &self.batches.len())
            .finish()
    }
}

impl BatchReader for BatchStore {
    fn batches(&self) -> &BTreeMap<BatchId, Batch> {
        &self.batches
    }
}
