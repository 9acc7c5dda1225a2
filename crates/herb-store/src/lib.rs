//! Mutable batch state for one GreenHerbs session.
//!
//! - [`BatchStore`] maps batch ids to batch records
//! - [`RecallSet`] marks batches recalled
//!
//! Neither type records anything in the ledger; the session pairs each
//! successful mutation here with one ledger append.

pub mod error;
pub mod memory;
pub mod recall;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::BatchStore;
pub use recall::{BatchStatus, RecallSet};
pub use traits::BatchReader;
