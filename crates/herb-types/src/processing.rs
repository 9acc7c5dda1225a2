use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::temporal::Timestamp;
use crate::validation::{check_range, Validate};

pub const DRYING_HOURS: (u32, u32) = (1, 48);
pub const DRYING_TEMPERATURE_C: (f64, f64) = (20.0, 100.0);
pub const GRINDING_MINUTES: (u32, u32) = (1, 120);
pub const GRINDING_SPEED_RPM: (u32, u32) = (100, 5000);

choice_enum! {
    /// Particle size after grinding.
    Fineness, "fineness" {
        Coarse => "Coarse",
        Medium => "Medium",
        Fine => "Fine",
    }
}

choice_enum! {
    /// Sieve mesh used when powdering.
    MeshSize, "mesh size" {
        Mesh60 => "60",
        Mesh100 => "100",
        Mesh200 => "200",
    }
}

choice_enum! {
    PackagingMaterial, "packaging material" {
        Plastic => "Plastic",
        Paper => "Paper",
        EcoFriendly => "Eco-friendly",
    }
}

choice_enum! {
    SealType, "seal type" {
        Standard => "Standard",
        TamperProof => "Tamper-proof",
        AuthenticSeal => "Authentic Seal",
    }
}

choice_enum! {
    /// The kind tag of a processing step.
    ProcessingKind, "processing step" {
        Drying => "Drying",
        Cleaning => "Cleaning",
        Grinding => "Grinding",
        Powdering => "Powdering",
        Packaging => "Packaging",
    }
}

/// Parameters recorded for one processing step, one variant per kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProcessingParams {
    Drying {
        duration_hours: u32,
        temperature_celsius: f64,
    },
    Cleaning,
    Grinding {
        duration_minutes: u32,
        speed_rpm: u32,
        fineness: Fineness,
    },
    Powdering {
        mesh_size: MeshSize,
    },
    Packaging {
        material: PackagingMaterial,
        seal: SealType,
    },
}

impl ProcessingParams {
    pub fn kind(&self) -> ProcessingKind {
        match self {
            ProcessingParams::Drying { .. } => ProcessingKind::Drying,
            ProcessingParams::Cleaning => ProcessingKind::Cleaning,
            ProcessingParams::Grinding { .. } => ProcessingKind::Grinding,
            ProcessingParams::Powdering { .. } => ProcessingKind::Powdering,
            ProcessingParams::Packaging { .. } => ProcessingKind::Packaging,
        }
    }

    /// One-line human summary of the parameters.
    pub fn describe(&self) -> String {
        match self {
            ProcessingParams::Drying {
                duration_hours,
                temperature_celsius,
            } => format!("{duration_hours} h at {temperature_celsius} °C"),
            ProcessingParams::Cleaning => "no parameters".to_string(),
            ProcessingParams::Grinding {
                duration_minutes,
                speed_rpm,
                fineness,
            } => format!("{duration_minutes} min at {speed_rpm} RPM, {fineness}"),
            ProcessingParams::Powdering { mesh_size } => format!("mesh {mesh_size}"),
            ProcessingParams::Packaging { material, seal } => {
                format!("{material}, {seal} seal")
            }
        }
    }
}

impl Validate for ProcessingParams {
    fn validate(&self) -> Result<(), TypeError> {
        match self {
            ProcessingParams::Drying {
                duration_hours,
                temperature_celsius,
            } => {
                check_range(
                    "drying duration (hrs)",
                    f64::from(*duration_hours),
                    f64::from(DRYING_HOURS.0),
                    f64::from(DRYING_HOURS.1),
                )?;
                check_range(
                    "drying temperature (°C)",
                    *temperature_celsius,
                    DRYING_TEMPERATURE_C.0,
                    DRYING_TEMPERATURE_C.1,
                )
            }
            ProcessingParams::Grinding {
                duration_minutes,
                speed_rpm,
                ..
            } => {
                check_range(
                    "grinding time (mins)",
                    f64::from(*duration_minutes),
                    f64::from(GRINDING_MINUTES.0),
                    f64::from(GRINDING_MINUTES.1),
                )?;
                check_range(
                    "grinding speed (RPM)",
                    f64::from(*speed_rpm),
                    f64::from(GRINDING_SPEED_RPM.0),
                    f64::from(GRINDING_SPEED_RPM.1),
                )
            }
            ProcessingParams::Cleaning
            | ProcessingParams::Powdering { .. }
            | ProcessingParams::Packaging { .. } => Ok(()),
        }
    }
}

/// A processing step applied to a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStep {
    pub params: ProcessingParams,
    pub timestamp: Timestamp,
}

impl ProcessingStep {
    pub fn new(params: ProcessingParams, timestamp: Timestamp) -> Self {
        Self { params, timestamp }
    }

    pub fn kind(&self) -> ProcessingKind {
        self.params.kind()
    }
}
