//! Session API for GreenHerbs traceability.
//!
//! A [`Session`] owns the ledger, the batch store, the recall set and the
//! geofence checker for one operator session. Every successful mutation is
//! mirrored by exactly one ledger entry; failed mutations leave all state
//! untouched.

pub mod config;
pub mod error;
pub mod link;
pub mod sensor;
pub mod session;
pub mod views;

pub use config::{JourneyConfig, SessionConfig, DEFAULT_BASE_URL};
pub use error::{SdkError, SdkResult};
pub use link::journey_link;
pub use sensor::{simulate_esp8266, SensorReading};
pub use session::{AuditCheck, Session, SessionId};
pub use views::{
    Dashboard, DashboardFilter, DashboardRow, JourneyView, StatusCount, Waypoint, WaypointKind,
};

// Re-export key types
pub use herb_geo::{GeofenceChecker, GeofenceConfig, GeofenceVerdict, ReferenceZone};
pub use herb_ledger::{ActionKind, ExplorerRow, LedgerEntry, LedgerReader, ValidationReport};
pub use herb_metrics::{Criterion, QualityReport};
pub use herb_store::{BatchReader, BatchStatus};
pub use herb_types::{
    Batch, BatchId, Clock, GeoPoint, ManualClock, ProcessingParams, ProcessingStep, RecallRecord,
    Species, SystemClock, TestMeasurement, TestResult, Timestamp,
};
