/// Errors produced by ledger reads.
///
/// Appending never fails; only range queries can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid index range: from={from}, to={to}")]
    InvalidRange { from: u64, to: u64 },

    #[error("serialization error: {0}")]
    Serialization(String),
}
