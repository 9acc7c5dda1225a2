//! Append-only action ledger for GreenHerbs.
//!
//! Every change made to a batch or to the recall set is mirrored here as one
//! immutable [`LedgerEntry`]. This crate provides:
//! - Action payload and entry types
//! - `LedgerWriter` / `LedgerReader` trait boundaries
//! - `InMemoryLedger`, the session-scoped implementation
//! - Explorer projection (one summary row per entry)
//! - Replay of batches and recalls from the ledger alone
//! - Sequence validation (gapless indices, ordered timestamps)

pub mod error;
pub mod memory;
pub mod projection;
pub mod records;
pub mod replay;
pub mod traits;
pub mod validation;

pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use projection::{ExplorerRow, ProjectionBuilder};
pub use records::{Action, ActionKind, LedgerEntry};
pub use replay::{ReplayEngine, ReplayResult};
pub use traits::{LedgerReader, LedgerWriter};
pub use validation::{SequenceValidator, ValidationReport, Violation, ViolationKind};
