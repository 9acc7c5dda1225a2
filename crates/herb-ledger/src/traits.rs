use herb_types::BatchId;

use crate::error::LedgerError;
use crate::records::{Action, LedgerEntry};

/// Write boundary: the only way entries come into existence.
pub trait LedgerWriter {
    /// Record `payload` as the next entry and return a copy of it.
    fn append(&mut self, payload: Action) -> LedgerEntry;
}

/// Read boundary. Implementors expose their entries in append order; every
/// query is derived from that slice.
pub trait LedgerReader {
    fn entries(&self) -> &[LedgerEntry];

    /// Snapshot of all entries in append order.
    fn list(&self) -> Vec<LedgerEntry> {
        self.entries().to_vec()
    }

    fn len(&self) -> u64 {
        self.entries().len() as u64
    }

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn head(&self) -> Option<&LedgerEntry> {
        self.entries().last()
    }

    /// Entry at a 1-based index.
    fn get(&self, index: u64) -> Option<&LedgerEntry> {
        let position = usize::try_from(index.checked_sub(1)?).ok()?;
        self.entries().get(position)
    }

    /// Entries `from..=to` (1-based). Indices past the end are clipped.
    fn read_range(&self, from: u64, to: u64) -> Result<Vec<LedgerEntry>, LedgerError> {
        if from == 0 || to == 0 || from > to {
            return Err(LedgerError::InvalidRange { from, to });
        }

        let entries = self.entries();
        let start = (from - 1) as usize;
        if start >= entries.len() {
            return Ok(vec![]);
        }
        let end_exclusive = to.min(entries.len() as u64) as usize;
        Ok(entries[start..end_exclusive].to_vec())
    }

    /// Audit history of one batch, in append order.
    fn entries_for(&self, batch_id: &BatchId) -> Vec<LedgerEntry> {
        self.entries()
            .iter()
            .filter(|e| e.batch_id() == batch_id)
            .cloned()
            .collect()
    }
}
