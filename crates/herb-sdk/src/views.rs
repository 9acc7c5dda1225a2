//! Read-only views rendered by the presentation layer.

use herb_ledger::ExplorerRow;
use herb_metrics::{health_score_for, predict_quality, QualityReport};
use herb_store::{BatchReader, BatchStatus, RecallSet};
use herb_types::{Batch, BatchId, GeoPoint, RecallRecord, Species, Timestamp};
use serde::Serialize;

use crate::link::journey_link;

/// Degrees between consecutive journey waypoints.
const WAYPOINT_STEP_DEG: f64 = 0.05;

/// Which batches the dashboard shows. An empty list matches nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardFilter {
    pub species: Vec<Species>,
    pub statuses: Vec<BatchStatus>,
}

impl DashboardFilter {
    pub fn with_species(mut self, species: Vec<Species>) -> Self {
        self.species = species;
        self
    }

    pub fn with_statuses(mut self, statuses: Vec<BatchStatus>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn matches(&self, species: Species, status: BatchStatus) -> bool {
        self.species.contains(&species) && self.statuses.contains(&status)
    }
}

impl Default for DashboardFilter {
    fn default() -> Self {
        Self {
            species: Species::ALL.to_vec(),
            statuses: BatchStatus::ALL.to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardRow {
    pub batch_id: BatchId,
    pub species: Species,
    pub collector: String,
    pub created_at: Timestamp,
    pub steps_completed: usize,
    pub tests_done: usize,
    pub status: BatchStatus,
    pub health_score: u8,
    pub journey_link: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: BatchStatus,
    pub count: usize,
}

/// Filtered batch overview plus the status distribution of the shown rows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dashboard {
    pub rows: Vec<DashboardRow>,
    /// Only statuses that occur in `rows`.
    pub status_counts: Vec<StatusCount>,
}

impl Dashboard {
    pub(crate) fn build<B: BatchReader>(
        batches: &B,
        recalls: &RecallSet,
        filter: &DashboardFilter,
        base_url: &str,
    ) -> Self {
        let rows: Vec<DashboardRow> = batches
            .batches()
            .values()
            .filter_map(|batch| {
                let status = recalls.status(&batch.id);
                filter.matches(batch.species, status).then(|| DashboardRow {
                    batch_id: batch.id.clone(),
                    species: batch.species,
                    collector: batch.collector.clone(),
                    created_at: batch.created_at,
                    steps_completed: batch.processing_steps.len(),
                    tests_done: batch.test_results.len(),
                    status,
                    health_score: health_score_for(&batch.processing_steps, &batch.test_results),
                    journey_link: journey_link(base_url, &batch.id),
                })
            })
            .collect();

        let status_counts = BatchStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: rows.iter().filter(|r| r.status == status).count(),
            })
            .filter(|c| c.count > 0)
            .collect();

        Self {
            rows,
            status_counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointKind {
    Harvest,
    Processing,
    Testing,
}

/// A marker on the journey map.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Waypoint {
    pub kind: WaypointKind,
    pub label: String,
    pub position: GeoPoint,
    pub timestamp: Timestamp,
    pub details: String,
}

/// Map markers for a batch: the harvest point, then one marker per
/// processing step offset north-east and one per test offset south-west.
pub fn waypoints(batch: &Batch) -> Vec<Waypoint> {
    let origin = batch.location;
    let mut points = vec![Waypoint {
        kind: WaypointKind::Harvest,
        label: "Harvest".to_string(),
        position: origin,
        timestamp: batch.created_at,
        details: format!("Batch {}, collector {}", batch.id, batch.collector),
    }];

    for (i, step) in batch.processing_steps.iter().enumerate() {
        let d = WAYPOINT_STEP_DEG * (i + 1) as f64;
        points.push(Waypoint {
            kind: WaypointKind::Processing,
            label: step.kind().to_string(),
            position: origin.offset(d, d),
            timestamp: step.timestamp,
            details: step.params.describe(),
        });
    }
    for (i, result) in batch.test_results.iter().enumerate() {
        let d = WAYPOINT_STEP_DEG * (i + 1) as f64;
        points.push(Waypoint {
            kind: WaypointKind::Testing,
            label: result.kind().to_string(),
            position: origin.offset(-d, -d),
            timestamp: result.timestamp,
            details: result.measurement.describe(),
        });
    }
    points
}

/// Everything the journey page shows for one batch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JourneyView {
    pub batch: Batch,
    pub status: BatchStatus,
    pub recall: Option<RecallRecord>,
    pub health_score: u8,
    pub quality: QualityReport,
    pub waypoints: Vec<Waypoint>,
    /// Ledger entries for this batch, in append order.
    pub history: Vec<ExplorerRow>,
    pub journey_link: String,
}

impl JourneyView {
    pub(crate) fn build(
        batch: &Batch,
        recall: Option<&RecallRecord>,
        history: Vec<ExplorerRow>,
        base_url: &str,
    ) -> Self {
        let status = if recall.is_some() {
            BatchStatus::Recalled
        } else {
            BatchStatus::Active
        };
        Self {
            batch: batch.clone(),
            status,
            recall: recall.cloned(),
            health_score: health_score_for(&batch.processing_steps, &batch.test_results),
            quality: predict_quality(&batch.processing_steps, &batch.test_results),
            waypoints: waypoints(batch),
            history,
            journey_link: journey_link(base_url, &batch.id),
        }
    }
}
