//! Derived metrics over a batch's recorded history.
//!
//! Both metrics are pure functions of the processing steps and test results
//! recorded so far:
//! - [`health_score`] rewards workflow completeness (counts only)
//! - [`predict_quality`] scores five fixed measurement thresholds

pub mod health;
pub mod quality;

pub use health::{health_score, health_score_for, EXPECTED_STEPS, EXPECTED_TESTS};
pub use quality::{predict_quality, Criterion, CriterionOutcome, QualityReport};
