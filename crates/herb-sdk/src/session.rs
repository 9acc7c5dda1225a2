use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use herb_geo::{GeofenceChecker, GeofenceVerdict};
use herb_ledger::{
    Action, ExplorerRow, InMemoryLedger, LedgerWriter, ProjectionBuilder, ReplayEngine,
    SequenceValidator, ValidationReport,
};
use herb_metrics::{health_score_for, predict_quality, QualityReport};
use herb_store::{BatchReader, BatchStatus, BatchStore, RecallSet};
use herb_types::{
    Batch, BatchId, Clock, GeoPoint, ProcessingParams, ProcessingStep, RecallRecord, Species,
    SystemClock, TestMeasurement, TestResult, Validate,
};
use rand::Rng;
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::{SdkError, SdkResult};
use crate::link::journey_link;
use crate::sensor::{simulate_esp8266, SensorReading};
use crate::views::{Dashboard, DashboardFilter, JourneyView};

/// Identifier of one operator session, used to correlate log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of checking the ledger against live session state.
#[derive(Clone, Debug, PartialEq)]
pub struct AuditCheck {
    pub validation: ValidationReport,
    /// `true` when replaying the ledger rebuilds the live batches and the
    /// live recall markers (ids and reasons).
    pub replay_matches: bool,
    pub skipped_entries: Vec<u64>,
}

impl AuditCheck {
    pub fn is_consistent(&self) -> bool {
        self.validation.is_valid() && self.replay_matches && self.skipped_entries.is_empty()
    }
}

/// One operator session: ledger, batch store, recall set and geofence.
///
/// Created at session start and dropped at session end. All mutation goes
/// through `&mut self`.
pub struct Session {
    id: SessionId,
    config: SessionConfig,
    clock: Arc<dyn Clock>,
    geofence: GeofenceChecker,
    ledger: InMemoryLedger,
    batches: BatchStore,
    recalls: RecallSet,
}

impl Session {
    /// Start a session on the system clock.
    pub fn new(config: SessionConfig) -> SdkResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Start a session whose ledger, store and recall set share `clock`.
    pub fn with_clock(config: SessionConfig, clock: Arc<dyn Clock>) -> SdkResult<Self> {
        let geofence = GeofenceChecker::new(&config.geofence)?;
        let id = SessionId::new();
        tracing::info!(session = %id, zones = geofence.zones().count(), "session started");

        Ok(Self {
            id,
            config,
            geofence,
            ledger: InMemoryLedger::with_clock(clock.clone()),
            batches: BatchStore::with_clock(clock.clone()),
            recalls: RecallSet::with_clock(clock.clone()),
            clock,
        })
    }

    // ---- Collection ----

    /// Simulated device location: the reference point of the species zone.
    pub fn default_location(&self, species: Species) -> SdkResult<GeoPoint> {
        Ok(self.geofence.reference(species)?)
    }

    pub fn check_location(&self, species: Species, point: GeoPoint) -> SdkResult<GeofenceVerdict> {
        Ok(self.geofence.check(point, species)?)
    }

    /// Record a harvest. The location must pass the species geofence.
    pub fn collect(
        &mut self,
        species: Species,
        location: GeoPoint,
        collector: &str,
    ) -> SdkResult<Batch> {
        let verdict = self.geofence.check(location, species)?;
        if !verdict.within_allowed {
            tracing::warn!(
                session = %self.id,
                species = %species,
                distance_km = verdict.distance_km,
                "collection refused outside geofence"
            );
            return Err(SdkError::OutsideGeofence {
                species,
                distance_km: verdict.distance_km,
                max_distance_km: verdict.max_distance_km,
            });
        }

        let batch = self.batches.create_batch(species, location, collector)?;
        self.ledger.append(Action::Collection {
            batch_id: batch.id.clone(),
            species,
            location,
            collector: batch.collector.clone(),
            created_at: batch.created_at,
        });

        tracing::info!(session = %self.id, batch_id = %batch.id, species = %species, "batch collected");
        Ok(batch)
    }

    // ---- Processing and testing ----

    pub fn add_processing_step(
        &mut self,
        id: &BatchId,
        params: ProcessingParams,
    ) -> SdkResult<ProcessingStep> {
        params.validate()?;
        let step = ProcessingStep::new(params, self.clock.now());
        self.batches.add_processing_step(id, step.clone())?;
        self.ledger.append(Action::Processing {
            batch_id: id.clone(),
            step: step.clone(),
        });

        tracing::info!(session = %self.id, batch_id = %id, step = %step.kind(), "processing step recorded");
        Ok(step)
    }

    pub fn add_test_result(
        &mut self,
        id: &BatchId,
        measurement: TestMeasurement,
    ) -> SdkResult<TestResult> {
        measurement.validate()?;
        let result = TestResult::new(measurement, self.clock.now());
        self.batches.add_test_result(id, result.clone())?;
        self.ledger.append(Action::Testing {
            batch_id: id.clone(),
            result: result.clone(),
        });

        tracing::info!(session = %self.id, batch_id = %id, test = %result.kind(), "test result recorded");
        Ok(result)
    }

    // ---- Recall ----

    /// Mark a batch recalled. A repeat recall succeeds, keeps the first
    /// record and is still written to the ledger with its own reason.
    pub fn recall(&mut self, id: &BatchId, reason: &str) -> SdkResult<RecallRecord> {
        let record = self.recalls.recall(&self.batches, id, reason)?;
        self.ledger.append(Action::Recall {
            batch_id: id.clone(),
            reason: reason.to_string(),
        });

        tracing::info!(session = %self.id, batch_id = %id, "batch recalled");
        Ok(record)
    }

    pub fn is_recalled(&self, id: &BatchId) -> bool {
        self.recalls.is_recalled(id)
    }

    pub fn status(&self, id: &BatchId) -> BatchStatus {
        self.recalls.status(id)
    }

    // ---- Queries ----

    pub fn batch(&self, id: &BatchId) -> SdkResult<&Batch> {
        Ok(self.batches.get(id)?)
    }

    pub fn health_score(&self, id: &BatchId) -> SdkResult<u8> {
        let batch = self.batch(id)?;
        Ok(health_score_for(&batch.processing_steps, &batch.test_results))
    }

    pub fn predicted_quality(&self, id: &BatchId) -> SdkResult<QualityReport> {
        let batch = self.batch(id)?;
        Ok(predict_quality(&batch.processing_steps, &batch.test_results))
    }

    pub fn journey_link(&self, id: &BatchId) -> SdkResult<String> {
        let batch = self.batch(id)?;
        Ok(journey_link(&self.config.journey.base_url, &batch.id))
    }

    pub fn dashboard(&self, filter: &DashboardFilter) -> Dashboard {
        Dashboard::build(
            &self.batches,
            &self.recalls,
            filter,
            &self.config.journey.base_url,
        )
    }

    pub fn journey(&self, id: &BatchId) -> SdkResult<JourneyView> {
        let batch = self.batch(id)?;
        let history = ProjectionBuilder::batch_history(&self.ledger, id);
        Ok(JourneyView::build(
            batch,
            self.recalls.get(id),
            history,
            &self.config.journey.base_url,
        ))
    }

    pub fn explorer(&self) -> Vec<ExplorerRow> {
        ProjectionBuilder::explorer(&self.ledger)
    }

    pub fn read_sensor<R: Rng>(&self, rng: &mut R) -> SensorReading {
        let reading = simulate_esp8266(rng);
        tracing::debug!(
            session = %self.id,
            temperature = reading.temperature_celsius,
            humidity = reading.humidity_percent,
            "sensor reading"
        );
        reading
    }

    // ---- Provenance ----

    /// Validate ledger ordering and compare a full replay with live state.
    pub fn verify(&self) -> AuditCheck {
        let validation = SequenceValidator::validate(&self.ledger);
        let replayed = ReplayEngine::replay(&self.ledger);

        let reasons = |m: &BTreeMap<BatchId, RecallRecord>| -> BTreeMap<BatchId, String> {
            m.iter().map(|(id, r)| (id.clone(), r.reason.clone())).collect()
        };
        let replay_matches = &replayed.batches == self.batches.batches()
            && reasons(&replayed.recalls) == reasons(&self.recalls.list());

        if !replay_matches {
            tracing::warn!(session = %self.id, "ledger replay diverges from live state");
        }

        AuditCheck {
            validation,
            replay_matches,
            skipped_entries: replayed.skipped_entries,
        }
    }

    // ---- Accessors ----

    pub fn id(&self) -> SessionId { self.id }
    pub fn config(&self) -> &SessionConfig { &self.config }
    pub fn geofence(&self) -> &GeofenceChecker { &self.geofence }
    pub fn ledger(&self) -> &InMemoryLedger { &self.ledger }
    pub fn batches(&self) -> &BatchStore { &self.batches }
    pub fn recalls(&self) -> &RecallSet { &self.recalls }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("ledger", &self.ledger)
            .field("batches", &self.batches)
            .field("recalls", &self.recalls)
            .finish()
    }
}
