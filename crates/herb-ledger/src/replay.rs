use std::collections::BTreeMap;

use herb_types::{Batch, BatchId, RecallRecord};

use crate::records::Action;
use crate::traits::LedgerReader;

/// Batches and recalls rebuilt from ledger entries alone.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayResult {
    pub batches: BTreeMap<BatchId, Batch>,
    /// Recall markers; `recalled_at` is the timestamp of the first recall
    /// entry for the batch. Later recalls leave the marker as it is.
    pub recalls: BTreeMap<BatchId, RecallRecord>,
    pub applied_entries: u64,
    /// Indices of entries that could not be applied (an action on a batch
    /// never collected, a repeated collection).
    pub skipped_entries: Vec<u64>,
}

/// Deterministic replay of a ledger into batch state.
pub struct ReplayEngine;

impl ReplayEngine {
    pub fn replay<R: LedgerReader>(reader: &R) -> ReplayResult {
        let mut batches: BTreeMap<BatchId, Batch> = BTreeMap::new();
        let mut recalls = BTreeMap::new();
        let mut applied_entries = 0;
        let mut skipped_entries = Vec::new();

        for entry in reader.entries() {
            let applied = match entry.payload() {
                Action::Collection {
                    batch_id,
                    species,
                    location,
                    collector,
                    created_at,
                } => {
                    if batches.contains_key(batch_id) {
                        false
                    } else {
                        batches.insert(
                            batch_id.clone(),
                            Batch {
                                id: batch_id.clone(),
                                species: *species,
                                location: *location,
                                collector: collector.clone(),
                                created_at: *created_at,
                                processing_steps: Vec::new(),
                                test_results: Vec::new(),
                            },
                        );
                        true
                    }
                }
                Action::Processing { batch_id, step } => match batches.get_mut(batch_id) {
                    Some(batch) => {
                        batch.processing_steps.push(step.clone());
                        true
                    }
                    None => false,
                },
                Action::Testing { batch_id, result } => match batches.get_mut(batch_id) {
                    Some(batch) => {
                        batch.test_results.push(result.clone());
                        true
                    }
                    None => false,
                },
                Action::Recall { batch_id, reason } => {
                    if batches.contains_key(batch_id) {
                        recalls
                            .entry(batch_id.clone())
                            .or_insert_with(|| RecallRecord {
                                reason: reason.clone(),
                                recalled_at: entry.timestamp(),
                            });
                        true
                    } else {
                        false
                    }
                }
            };

            if applied {
                applied_entries += 1;
            } else {
                tracing::warn!(index = entry.index(), kind = %entry.kind(), "replay skipped entry");
                skipped_entries.push(entry.index());
            }
        }

        ReplayResult {
            batches,
            recalls,
            applied_entries,
            skipped_entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use herb_types::{
        GeoPoint, ProcessingParams, ProcessingStep, Species, TestMeasurement, TestResult,
    };

    use super::*;
    use crate::memory::InMemoryLedger;
    use crate::traits::LedgerWriter;

    fn collection(id: &BatchId) -> Action {
        Action::Collection {
            batch_id: id.clone(),
            species: Species::Brahmi,
            location: GeoPoint::new(9.49, 76.33).unwrap(),
            collector: "Anil".into(),
            created_at: Utc.with_ymd_and_hms(2025, 9, 14, 7, 0, 0).unwrap(),
        }
    }

    #[test]
    fn replay_rebuilds_history_in_order() {
        let id = BatchId::parse("BRA-20250914-070000").unwrap();
        let mut ledger = InMemoryLedger::default();
        ledger.append(collection(&id));
        ledger.append(Action::Processing {
            batch_id: id.clone(),
            step: ProcessingStep::new(ProcessingParams::Cleaning, Utc::now()),
        });
        ledger.append(Action::Processing {
            batch_id: id.clone(),
            step: ProcessingStep::new(
                ProcessingParams::Drying {
                    duration_hours: 4,
                    temperature_celsius: 38.0,
                },
                Utc::now(),
            ),
        });
        ledger.append(Action::Testing {
            batch_id: id.clone(),
            result: TestResult::new(TestMeasurement::MoistureContent { percentage: 9.5 }, Utc::now()),
        });
        let recall_entry = ledger.append(Action::Recall {
            batch_id: id.clone(),
            reason: "pest damage".into(),
        });

        let result = ReplayEngine::replay(&ledger);
        assert_eq!(result.applied_entries, 5);
        assert!(result.skipped_entries.is_empty());

        let batch = &result.batches[&id];
        assert_eq!(batch.collector, "Anil");
        assert_eq!(batch.processing_steps.len(), 2);
        assert_eq!(batch.processing_steps[0].params, ProcessingParams::Cleaning);
        assert_eq!(batch.test_results.len(), 1);

        let recall = &result.recalls[&id];
        assert_eq!(recall.reason, "pest damage");
        assert_eq!(recall.recalled_at, recall_entry.timestamp());
    }

    #[test]
    fn actions_on_unknown_batches_are_skipped() {
        let known = BatchId::parse("BRA-1").unwrap();
        let unknown = BatchId::parse("BRA-2").unwrap();
        let mut ledger = InMemoryLedger::default();
        ledger.append(collection(&known));
        ledger.append(Action::Recall {
            batch_id: unknown,
            reason: "n/a".into(),
        });
        ledger.append(collection(&known));

        let result = ReplayEngine::replay(&ledger);
        assert_eq!(result.applied_entries, 1);
        assert_eq!(result.skipped_entries, vec![2, 3]);
        assert!(result.recalls.is_empty());
    }

    #[test]
    fn repeat_recall_is_applied_and_keeps_first_marker() {
        let id = BatchId::parse("BRA-20250914-070000").unwrap();
        let mut ledger = InMemoryLedger::default();
        ledger.append(collection(&id));
        let first = ledger.append(Action::Recall {
            batch_id: id.clone(),
            reason: "mould".into(),
        });
        ledger.append(Action::Recall {
            batch_id: id.clone(),
            reason: "confirmed by lab".into(),
        });

        let result = ReplayEngine::replay(&ledger);
        assert_eq!(result.applied_entries, 3);
        assert!(result.skipped_entries.is_empty());
        assert_eq!(result.recalls.len(), 1);
        assert_eq!(result.recalls[&id].reason, "mould");
        assert_eq!(result.recalls[&id].recalled_at, first.timestamp());
    }
}
