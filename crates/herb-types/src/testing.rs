use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::temporal::Timestamp;
use crate::validation::{check_range, Validate};

pub const MOISTURE_PERCENT: (f64, f64) = (0.0, 100.0);
pub const MICROBIAL_CFU: (u32, u32) = (0, 100_000);
pub const LEAD_PPM: (f64, f64) = (0.0, 10.0);

choice_enum! {
    /// The kind tag of a laboratory test.
    TestKind, "test type" {
        MoistureContent => "Moisture Content",
        MicrobialLoad => "Microbial Load",
        HeavyMetals => "Heavy Metals",
    }
}

/// Measurement recorded by one quality test.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TestMeasurement {
    MoistureContent { percentage: f64 },
    MicrobialLoad { cfu_per_gram: u32 },
    HeavyMetals { lead_ppm: f64 },
}

impl TestMeasurement {
    pub fn kind(&self) -> TestKind {
        match self {
            TestMeasurement::MoistureContent { .. } => TestKind::MoistureContent,
            TestMeasurement::MicrobialLoad { .. } => TestKind::MicrobialLoad,
            TestMeasurement::HeavyMetals { .. } => TestKind::HeavyMetals,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TestMeasurement::MoistureContent { percentage } => format!("{percentage}% moisture"),
            TestMeasurement::MicrobialLoad { cfu_per_gram } => format!("{cfu_per_gram} CFU/g"),
            TestMeasurement::HeavyMetals { lead_ppm } => format!("lead {lead_ppm} ppm"),
        }
    }
}

impl Validate for TestMeasurement {
    fn validate(&self) -> Result<(), TypeError> {
        match self {
            TestMeasurement::MoistureContent { percentage } => check_range(
                "moisture (%)",
                *percentage,
                MOISTURE_PERCENT.0,
                MOISTURE_PERCENT.1,
            ),
            TestMeasurement::MicrobialLoad { cfu_per_gram } => check_range(
                "microbial load (CFU/g)",
                f64::from(*cfu_per_gram),
                f64::from(MICROBIAL_CFU.0),
                f64::from(MICROBIAL_CFU.1),
            ),
            TestMeasurement::HeavyMetals { lead_ppm } => {
                check_range("lead (ppm)", *lead_ppm, LEAD_PPM.0, LEAD_PPM.1)
            }
        }
    }
}

/// A quality test recorded against a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub measurement: TestMeasurement,
    pub timestamp: Timestamp,
}

impl TestResult {
    pub fn new(measurement: TestMeasurement, timestamp: Timestamp) -> Self {
        Self {
            measurement,
            timestamp,
        }
    }

    pub fn kind(&self) -> TestKind {
        self.measurement.kind()
    }
}
