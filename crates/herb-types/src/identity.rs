use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::species::Species;
use crate::temporal::Timestamp;

/// Identifier of a harvest batch.
///
/// Generated as `{species prefix}-{YYYYMMDD-HHMMSS}` from the creation
/// instant, so two batches of one species created within the same second
/// get the same id. The batch store refuses the second one.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    /// Derive the id for a batch of `species` created at `created_at`.
    pub fn generate(species: Species, created_at: Timestamp) -> Self {
        Self(format!(
            "{}-{}",
            species.id_prefix(),
            created_at.format("%Y%m%d-%H%M%S")
        ))
    }

    /// Wrap an id typed or scanned by an operator. Only emptiness is
    /// checked; lookups decide whether the batch exists.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TypeError::InvalidBatchId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The species prefix part (`TUL` for `TUL-20250914-101500`).
    pub fn prefix(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }
}

impl fmt::Debug for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BatchId({})", self.0)
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
