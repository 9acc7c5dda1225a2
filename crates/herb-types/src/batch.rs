use serde::{Deserialize, Serialize};

use crate::identity::BatchId;
use crate::location::GeoPoint;
use crate::processing::ProcessingStep;
use crate::species::Species;
use crate::temporal::Timestamp;
use crate::testing::TestResult;

/// One traceable unit of harvested material and its history.
///
/// Species, location, collector and creation time are fixed at collection.
/// Afterwards a batch only grows: steps and results are appended in the
/// order they were applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: BatchId,
    pub species: Species,
    pub location: GeoPoint,
    pub collector: String,
    pub created_at: Timestamp,
    pub processing_steps: Vec<ProcessingStep>,
    pub test_results: Vec<TestResult>,
}

impl Batch {
    /// A freshly collected batch with empty history.
    pub fn collect(
        species: Species,
        location: GeoPoint,
        collector: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: BatchId::generate(species, created_at),
            species,
            location,
            collector: collector.into(),
            created_at,
            processing_steps: Vec::new(),
            test_results: Vec::new(),
        }
    }
}

/// Why and when a batch was recalled. Recall is terminal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecallRecord {
    pub reason: String,
    pub recalled_at: Timestamp,
}
