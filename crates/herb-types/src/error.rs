use thiserror::Error;

/// Errors produced while constructing or validating herb types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypeError {
    #[error("invalid species: {0}")]
    InvalidSpecies(String),

    #[error("{field} out of range: {value} not in {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid {field}: {value}")]
    InvalidChoice { field: &'static str, value: String },

    #[error("invalid batch id: {0}")]
    InvalidBatchId(String),
}

impl TypeError {
    /// Returns `true` for errors raised by numeric range checks.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, TypeError::OutOfRange { .. })
    }
}
