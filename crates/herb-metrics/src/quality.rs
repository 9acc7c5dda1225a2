use herb_types::{ProcessingParams, ProcessingStep, TestMeasurement, TestResult};
use serde::Serialize;

/// One of the five fixed quality rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Drying temperature ≤ 40 °C.
    DryingTemperature,
    /// Grinding speed ≤ 3000 RPM.
    GrindingSpeed,
    /// Moisture ≤ 12 %.
    Moisture,
    /// Microbial load ≤ 500 CFU/g.
    MicrobialLoad,
    /// Lead ≤ 0.5 ppm.
    Lead,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::DryingTemperature,
        Criterion::GrindingSpeed,
        Criterion::Moisture,
        Criterion::MicrobialLoad,
        Criterion::Lead,
    ];

    /// Inclusive upper bound for the observed value.
    pub fn limit(&self) -> f64 {
        match self {
            Criterion::DryingTemperature => 40.0,
            Criterion::GrindingSpeed => 3000.0,
            Criterion::Moisture => 12.0,
            Criterion::MicrobialLoad => 500.0,
            Criterion::Lead => 0.5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Criterion::DryingTemperature => "drying temperature ≤ 40 °C",
            Criterion::GrindingSpeed => "grinding speed ≤ 3000 RPM",
            Criterion::Moisture => "moisture ≤ 12 %",
            Criterion::MicrobialLoad => "microbial load ≤ 500 CFU/g",
            Criterion::Lead => "lead ≤ 0.5 ppm",
        }
    }

    /// Value this criterion judges, taken from the earliest matching record.
    /// Later records of the same kind are ignored, even if they correct an
    /// earlier measurement.
    fn observe(&self, steps: &[ProcessingStep], tests: &[TestResult]) -> Option<f64> {
        match self {
            Criterion::DryingTemperature => steps.iter().find_map(|s| match s.params {
                ProcessingParams::Drying {
                    temperature_celsius,
                    ..
                } => Some(temperature_celsius),
                _ => None,
            }),
            Criterion::GrindingSpeed => steps.iter().find_map(|s| match s.params {
                ProcessingParams::Grinding { speed_rpm, .. } => Some(f64::from(speed_rpm)),
                _ => None,
            }),
            Criterion::Moisture => tests.iter().find_map(|t| match t.measurement {
                TestMeasurement::MoistureContent { percentage } => Some(percentage),
                _ => None,
            }),
            Criterion::MicrobialLoad => tests.iter().find_map(|t| match t.measurement {
                TestMeasurement::MicrobialLoad { cfu_per_gram } => Some(f64::from(cfu_per_gram)),
                _ => None,
            }),
            Criterion::Lead => tests.iter().find_map(|t| match t.measurement {
                TestMeasurement::HeavyMetals { lead_ppm } => Some(lead_ppm),
                _ => None,
            }),
        }
    }
}

/// How a batch fared against one criterion.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CriterionOutcome {
    pub criterion: Criterion,
    /// `None` when nothing of the relevant kind has been recorded.
    pub observed: Option<f64>,
    pub passed: bool,
}

/// Predicted quality with its per-criterion breakdown.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QualityReport {
    pub outcomes: Vec<CriterionOutcome>,
    /// Share of passed criteria, 0.0–100.0, one decimal.
    pub percentage: f64,
}

impl QualityReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }
}

/// Scores recorded history against the five criteria. A criterion with no
/// matching record fails.
pub fn predict_quality(steps: &[ProcessingStep], tests: &[TestResult]) -> QualityReport {
    let outcomes: Vec<CriterionOutcome> = Criterion::ALL
        .iter()
        .map(|criterion| {
            let observed = criterion.observe(steps, tests);
            CriterionOutcome {
                criterion: *criterion,
                observed,
                passed: observed.is_some_and(|v| v <= criterion.limit()),
            }
        })
        .collect();

    let passed = outcomes.iter().filter(|o| o.passed).count();
    let percentage = round_one_decimal(passed as f64 / Criterion::ALL.len() as f64 * 100.0);

    QualityReport {
        outcomes,
        percentage,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use herb_types::{Fineness, Timestamp};

    use super::*;

    fn at() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 9, 14, 12, 0, 0).unwrap()
    }

    fn drying(temperature_celsius: f64) -> ProcessingStep {
        ProcessingStep::new(
            ProcessingParams::Drying {
                duration_hours: 8,
                temperature_celsius,
            },
            at(),
        )
    }

    fn grinding(speed_rpm: u32) -> ProcessingStep {
        ProcessingStep::new(
            ProcessingParams::Grinding {
                duration_minutes: 15,
                speed_rpm,
                fineness: Fineness::Medium,
            },
            at(),
        )
    }

    fn test(measurement: TestMeasurement) -> TestResult {
        TestResult::new(measurement, at())
    }

    fn all_good_tests() -> Vec<TestResult> {
        vec![
            test(TestMeasurement::MoistureContent { percentage: 10.0 }),
            test(TestMeasurement::MicrobialLoad { cfu_per_gram: 400 }),
            test(TestMeasurement::HeavyMetals { lead_ppm: 0.3 }),
        ]
    }

    #[test]
    fn everything_within_limits_is_100() {
        let report = predict_quality(&[drying(35.0), grinding(2500)], &all_good_tests());
        assert_eq!(report.percentage, 100.0);
        assert_eq!(report.passed(), 5);
    }

    #[test]
    fn nothing_recorded_is_0() {
        let report = predict_quality(&[], &[]);
        assert_eq!(report.percentage, 0.0);
        assert!(report.outcomes.iter().all(|o| o.observed.is_none() && !o.passed));
    }

    #[test]
    fn each_criterion_is_worth_20() {
        let report = predict_quality(&[drying(40.0), grinding(3001)], &[]);
        assert_eq!(report.percentage, 20.0);

        let report = predict_quality(&[], &all_good_tests());
        assert_eq!(report.percentage, 60.0);
    }

    #[test]
    fn earliest_record_of_a_kind_wins() {
        // A hot first drying is not rescued by a later cool one.
        let report = predict_quality(&[drying(55.0), drying(30.0)], &[]);
        let drying_outcome = &report.outcomes[0];
        assert_eq!(drying_outcome.criterion, Criterion::DryingTemperature);
        assert_eq!(drying_outcome.observed, Some(55.0));
        assert!(!drying_outcome.passed);
    }

    #[test]
    fn unrelated_steps_are_skipped() {
        let cleaning = ProcessingStep::new(ProcessingParams::Cleaning, at());
        let report = predict_quality(&[cleaning, grinding(1200)], &[]);
        assert_eq!(report.outcomes[1].observed, Some(1200.0));
        assert_eq!(report.percentage, 20.0);
    }

    #[test]
    fn limits_are_inclusive() {
        let tests = vec![
            test(TestMeasurement::MoistureContent { percentage: 12.0 }),
            test(TestMeasurement::MicrobialLoad { cfu_per_gram: 500 }),
            test(TestMeasurement::HeavyMetals { lead_ppm: 0.5 }),
        ];
        let report = predict_quality(&[drying(40.0), grinding(3000)], &tests);
        assert_eq!(report.percentage, 100.0);
    }

    #[test]
    fn report_serializes_breakdown() {
        let report = predict_quality(&[drying(35.0)], &[]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"][0]["criterion"], "drying_temperature");
        assert_eq!(json["percentage"], 20.0);
    }
}
