use herb_types::{ProcessingStep, TestResult};

/// Processing steps a complete workflow records.
pub const EXPECTED_STEPS: u64 = 5;
/// Tests a complete workflow records.
pub const EXPECTED_TESTS: u64 = 3;

const STEP_WEIGHT: u64 = 60;
const TEST_WEIGHT: u64 = 40;

/// Workflow completeness, 0–100:
/// `min(100, steps/5 * 60 + tests/3 * 40)` truncated to an integer.
///
/// Evaluated over a common denominator so truncation is exact (3 steps give
/// 36, not 35 from a float that lands just under).
pub fn health_score(steps: usize, tests: usize) -> u8 {
    let steps = steps as u64;
    let tests = tests as u64;
    let denominator = EXPECTED_STEPS * EXPECTED_TESTS;
    let numerator = steps
        .saturating_mul(STEP_WEIGHT * EXPECTED_TESTS)
        .saturating_add(tests.saturating_mul(TEST_WEIGHT * EXPECTED_STEPS));
    (numerator / denominator).min(100) as u8
}

/// [`health_score`] for recorded history. Only the counts matter.
pub fn health_score_for(steps: &[ProcessingStep], tests: &[TestResult]) -> u8 {
    health_score(steps.len(), tests.len())
}
