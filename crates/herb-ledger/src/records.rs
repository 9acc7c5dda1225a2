use std::fmt;

use herb_types::{BatchId, GeoPoint, ProcessingStep, Species, TestResult, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Kind tag of an action payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Collection,
    Processing,
    Testing,
    Recall,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Collection => "collection",
            ActionKind::Processing => "processing",
            ActionKind::Testing => "testing",
            ActionKind::Recall => "recall",
        };
        f.write_str(name)
    }
}

/// What happened. Each variant carries enough to rebuild the change it
/// records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Collection {
        batch_id: BatchId,
        species: Species,
        location: GeoPoint,
        collector: String,
        created_at: Timestamp,
    },
    Processing {
        batch_id: BatchId,
        step: ProcessingStep,
    },
    Testing {
        batch_id: BatchId,
        result: TestResult,
    },
    Recall {
        batch_id: BatchId,
        reason: String,
    },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Collection { .. } => ActionKind::Collection,
            Action::Processing { .. } => ActionKind::Processing,
            Action::Testing { .. } => ActionKind::Testing,
            Action::Recall { .. } => ActionKind::Recall,
        }
    }

    pub fn batch_id(&self) -> &BatchId {
        match self {
            Action::Collection { batch_id, .. }
            | Action::Processing { batch_id, .. }
            | Action::Testing { batch_id, .. }
            | Action::Recall { batch_id, .. } => batch_id,
        }
    }
}

/// One immutable ledger record.
///
/// Fields are private; entries are built only by a ledger and handed out
/// by value or shared reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    index: u64,
    timestamp: Timestamp,
    payload: Action,
}

impl LedgerEntry {
    pub(crate) fn new(index: u64, timestamp: Timestamp, payload: Action) -> Self {
        Self {
            index,
            timestamp,
            payload,
        }
    }

    /// 1-based position in the ledger.
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn payload(&self) -> &Action {
        &self.payload
    }

    pub fn kind(&self) -> ActionKind {
        self.payload.kind()
    }

    pub fn batch_id(&self) -> &BatchId {
        self.payload.batch_id()
    }

    /// Pretty JSON of the payload, as shown in the explorer.
    pub fn payload_json(&self) -> Result<String, LedgerError> {
        serde_json::to_string_pretty(&self.payload)
            .map_err(|e| LedgerError::Serialization(e.to_string()))
    }
}
