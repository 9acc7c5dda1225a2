use herb_types::{BatchId, TypeError};

/// Errors from batch store and recall set operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// No batch with this id was ever collected.
    #[error("batch not found: {0}")]
    BatchNotFound(BatchId),

    /// A batch with the generated id already exists (same species, same
    /// second).
    #[error("batch already exists: {0}")]
    DuplicateBatch(BatchId),

    #[error(transparent)]
    Input(#[from] TypeError),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
