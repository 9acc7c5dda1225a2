use crate::records::LedgerEntry;
use crate::traits::LedgerReader;

/// Result of checking a ledger's ordering invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub entry_count: u64,
    pub sequence_gapless: bool,
    pub timestamps_ordered: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific problem found during validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub index: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    SequenceGap,
    TimestampRegression,
}

/// Checks that indices run 1..=N and timestamps never decrease.
pub struct SequenceValidator;

impl SequenceValidator {
    pub fn validate<R: LedgerReader>(reader: &R) -> ValidationReport {
        Self::validate_entries(reader.entries())
    }

    pub fn validate_entries(entries: &[LedgerEntry]) -> ValidationReport {
        let mut violations = Vec::new();
        let mut sequence_gapless = true;
        let mut timestamps_ordered = true;

        for (position, entry) in entries.iter().enumerate() {
            let expected = position as u64 + 1;
            if entry.index() != expected {
                sequence_gapless = false;
                violations.push(Violation {
                    index: entry.index(),
                    kind: ViolationKind::SequenceGap,
                    description: format!("expected index {expected}, got {}", entry.index()),
                });
            }

            if position > 0 {
                let previous = &entries[position - 1];
                if entry.timestamp() < previous.timestamp() {
                    timestamps_ordered = false;
                    violations.push(Violation {
                        index: entry.index(),
                        kind: ViolationKind::TimestampRegression,
                        description: format!(
                            "timestamp {} is before entry {} at {}",
                            entry.timestamp(),
                            previous.index(),
                            previous.timestamp()
                        ),
                    });
                }
            }
        }

        ValidationReport {
            entry_count: entries.len() as u64,
            sequence_gapless,
            timestamps_ordered,
            violations,
        }
    }
}
