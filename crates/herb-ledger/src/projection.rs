use herb_types::{BatchId, Timestamp};
use serde::Serialize;

use crate::records::{Action, ActionKind, LedgerEntry};
use crate::traits::LedgerReader;

/// Row in the ledger explorer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExplorerRow {
    pub index: u64,
    pub timestamp: Timestamp,
    pub kind: ActionKind,
    pub batch_id: BatchId,
    pub summary: String,
}

/// Deterministic read-side views over a ledger.
pub struct ProjectionBuilder;

impl ProjectionBuilder {
    /// One row per entry, in append order.
    pub fn explorer<R: LedgerReader>(reader: &R) -> Vec<ExplorerRow> {
        reader.entries().iter().map(explorer_row).collect()
    }

    /// Rows touching a single batch.
    pub fn batch_history<R: LedgerReader>(reader: &R, batch_id: &BatchId) -> Vec<ExplorerRow> {
        reader
            .entries()
            .iter()
            .filter(|e| e.batch_id() == batch_id)
            .map(explorer_row)
            .collect()
    }

    /// Number of entries per action kind, in a fixed kind order.
    pub fn action_counts<R: LedgerReader>(reader: &R) -> Vec<(ActionKind, u64)> {
        [
            ActionKind::Collection,
            ActionKind::Processing,
            ActionKind::Testing,
            ActionKind::Recall,
        ]
        .into_iter()
        .map(|kind| {
            let count = reader.entries().iter().filter(|e| e.kind() == kind).count() as u64;
            (kind, count)
        })
        .collect()
    }
}

fn explorer_row(entry: &LedgerEntry) -> ExplorerRow {
    ExplorerRow {
        index: entry.index(),
        timestamp: entry.timestamp(),
        kind: entry.kind(),
        batch_id: entry.batch_id().clone(),
        summary: summarize(entry.payload()),
    }
}

fn summarize(action: &Action) -> String {
    match action {
        Action::Collection {
            species,
            collector,
            location,
            ..
        } => {
            let collector = if collector.trim().is_empty() {
                "unknown collector"
            } else {
                collector.as_str()
            };
            format!("{species} collected by {collector} at {location}")
        }
        Action::Processing { step, .. } => {
            format!("{}: {}", step.kind(), step.params.describe())
        }
        Action::Testing { result, .. } => {
            format!("{}: {}", result.kind(), result.measurement.describe())
        }
        Action::Recall { reason, .. } if reason.trim().is_empty() => {
            "recalled (no reason given)".to_string()
        }
        Action::Recall { reason, .. } => format!("recalled: {reason}"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use herb_types::{
        GeoPoint, ProcessingParams, ProcessingStep, Species, TestMeasurement, TestResult,
    };

    use super::*;
    use crate::memory::InMemoryLedger;
    use crate::traits::LedgerWriter;

    fn id(s: &str) -> BatchId {
        BatchId::parse(s).unwrap()
    }

    fn populated() -> InMemoryLedger {
        let mut ledger = InMemoryLedger::default();
        ledger.append(Action::Collection {
            batch_id: id("TUL-1"),
            species: Species::Tulsi,
            location: GeoPoint::new(27.58, 77.70).unwrap(),
            collector: "Meera".into(),
            created_at: Utc::now(),
        });
        ledger.append(Action::Processing {
            batch_id: id("TUL-1"),
            step: ProcessingStep::new(
                ProcessingParams::Drying {
                    duration_hours: 6,
                    temperature_celsius: 35.0,
                },
                Utc::now(),
            ),
        });
        ledger.append(Action::Testing {
            batch_id: id("NEE-1"),
            result: TestResult::new(TestMeasurement::MicrobialLoad { cfu_per_gram: 120 }, Utc::now()),
        });
        ledger.append(Action::Recall {
            batch_id: id("TUL-1"),
            reason: String::new(),
        });
        ledger
    }

    #[test]
    fn explorer_has_one_row_per_entry() {
        let ledger = populated();
        let rows = ProjectionBuilder::explorer(&ledger);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].summary, "Tulsi collected by Meera at (27.5800, 77.7000)");
        assert_eq!(rows[1].summary, "Drying: 6 h at 35 °C");
        assert_eq!(rows[2].summary, "Microbial Load: 120 CFU/g");
        assert_eq!(rows[3].summary, "recalled (no reason given)");
    }

    #[test]
    fn explorer_is_deterministic() {
        let ledger = populated();
        assert_eq!(
            ProjectionBuilder::explorer(&ledger),
            ProjectionBuilder::explorer(&ledger)
        );
    }

    #[test]
    fn batch_history_filters() {
        let ledger = populated();
        let rows = ProjectionBuilder::batch_history(&ledger, &id("TUL-1"));
        let indices: Vec<u64> = rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 4]);
    }

    #[test]
    fn counts_by_kind() {
        let counts = ProjectionBuilder::action_counts(&populated());
        assert_eq!(
            counts,
            vec![
                (ActionKind::Collection, 1),
                (ActionKind::Processing, 1),
                (ActionKind::Testing, 1),
                (ActionKind::Recall, 1),
            ]
        );
    }
}
