use std::fmt;
use std::sync::Arc;

use herb_types::{Clock, SystemClock, Timestamp};

use crate::records::{Action, LedgerEntry};
use crate::traits::{LedgerReader, LedgerWriter};

/// Session-scoped ledger held in memory.
///
/// Mutation goes through `&mut self`, so a ledger has one writer at a time
/// by construction.
pub struct InMemoryLedger {
    clock: Arc<dyn Clock>,
    entries: Vec<LedgerEntry>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Vec::new(),
        }
    }

    /// Current time, held back to the previous entry's timestamp if the
    /// wall clock stepped backwards.
    fn next_timestamp(&self) -> Timestamp {
        let now = self.clock.now();
        match self.entries.last() {
            Some(last) if last.timestamp() > now => last.timestamp(),
            _ => now,
        }
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryLedger")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl LedgerWriter for InMemoryLedger {
    fn append(&mut self, payload: Action) -> LedgerEntry {
        let index = self.entries.len() as u64 + 1;
        let entry = LedgerEntry::new(index, self.next_timestamp(), payload);

        tracing::debug!(
            index,
            kind = %entry.kind(),
            batch_id = %entry.batch_id(),
            "ledger append"
        );

        self.entries.push(entry.clone());
        entry
    }
}

impl LedgerReader for InMemoryLedger {
    fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }
}
