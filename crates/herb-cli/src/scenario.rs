//! Scripted sessions.
//!
//! A scenario is a TOML list of operator actions replayed against a fresh
//! session on a manual clock, so the same file always yields the same
//! batch ids and ledger timestamps.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use herb_sdk::{
    BatchId, GeoPoint, ManualClock, ProcessingParams, SdkError, SdkResult, Session,
    SessionConfig, Species, TestMeasurement,
};
use serde::{Deserialize, Serialize};

/// Seconds the clock moves forward after every step.
const STEP_SECONDS: i64 = 1;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Scenario {
    /// Session start time (RFC 3339). Defaults to now.
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One operator action. Batches are named by alias (given at collection)
/// or by literal batch id.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Collect {
        alias: Option<String>,
        species: String,
        collector: String,
        /// Omit both to use the simulated device location.
        latitude: Option<f64>,
        longitude: Option<f64>,
    },
    Process {
        batch: String,
        step: ProcessingParams,
    },
    Test {
        batch: String,
        measurement: TestMeasurement,
    },
    Recall {
        batch: String,
        #[serde(default)]
        reason: String,
    },
    Wait {
        seconds: i64,
    },
}

impl Scenario {
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// What happened to one step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub ok: bool,
    pub message: String,
}

pub struct ScenarioRun {
    pub session: Session,
    pub outcomes: Vec<StepOutcome>,
    /// Collected batches in collection order.
    pub collected: Vec<BatchId>,
}

impl ScenarioRun {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.ok).count()
    }
}

/// Run every step against a new session. A failing step is reported and
/// the run continues, as an operator would after an error message.
pub fn run(scenario: &Scenario, config: SessionConfig) -> SdkResult<ScenarioRun> {
    let clock = Arc::new(ManualClock::new(scenario.start.unwrap_or_else(Utc::now)));
    let mut runner = Runner {
        session: Session::with_clock(config, clock.clone())?,
        clock,
        aliases: BTreeMap::new(),
        collected: Vec::new(),
    };

    let mut outcomes = Vec::with_capacity(scenario.steps.len());
    for (i, step) in scenario.steps.iter().enumerate() {
        let outcome = match runner.apply(step) {
            Ok(message) => StepOutcome {
                step: i + 1,
                ok: true,
                message,
            },
            Err(err) => {
                tracing::warn!(step = i + 1, error = %err, "scenario step failed");
                StepOutcome {
                    step: i + 1,
                    ok: false,
                    message: err.to_string(),
                }
            }
        };
        outcomes.push(outcome);
        if !runner.clock.advance(Duration::seconds(STEP_SECONDS)) {
            tracing::warn!(step = i + 1, "scenario clock is at the end of its range");
        }
    }

    Ok(ScenarioRun {
        session: runner.session,
        outcomes,
        collected: runner.collected,
    })
}

struct Runner {
    session: Session,
    clock: Arc<ManualClock>,
    aliases: BTreeMap<String, BatchId>,
    collected: Vec<BatchId>,
}

impl Runner {
    fn apply(&mut self, step: &Step) -> SdkResult<String> {
        match step {
            Step::Collect {
                alias,
                species,
                collector,
                latitude,
                longitude,
            } => {
                let species: Species = species.parse()?;
                let location = match (latitude, longitude) {
                    (Some(lat), Some(lon)) => GeoPoint::new(*lat, *lon)?,
                    (None, None) => self.session.default_location(species)?,
                    _ => {
                        return Err(SdkError::InvalidInput(
                            "latitude and longitude must be given together".into(),
                        ))
                    }
                };
                let batch = self.session.collect(species, location, collector)?;
                if let Some(alias) = alias {
                    self.aliases.insert(alias.clone(), batch.id.clone());
                }
                self.collected.push(batch.id.clone());
                Ok(format!("collected {} ({species}) at {location}", batch.id))
            }
            Step::Process { batch, step } => {
                let id = self.resolve(batch)?;
                let recorded = self.session.add_processing_step(&id, step.clone())?;
                Ok(format!(
                    "{id}: {} ({})",
                    recorded.kind(),
                    recorded.params.describe()
                ))
            }
            Step::Test { batch, measurement } => {
                let id = self.resolve(batch)?;
                let recorded = self.session.add_test_result(&id, measurement.clone())?;
                Ok(format!(
                    "{id}: {} ({})",
                    recorded.kind(),
                    recorded.measurement.describe()
                ))
            }
            Step::Recall { batch, reason } => {
                let id = self.resolve(batch)?;
                self.session.recall(&id, reason)?;
                Ok(format!("{id}: recalled"))
            }
            Step::Wait { seconds } => {
                let moved = Duration::try_seconds(*seconds)
                    .is_some_and(|by| self.clock.advance(by));
                if !moved {
                    return Err(SdkError::InvalidInput(format!(
                        "wait of {seconds} s is out of range"
                    )));
                }
                Ok(format!("waited {seconds} s"))
            }
        }
    }

    fn resolve(&self, name: &str) -> SdkResult<BatchId> {
        match self.aliases.get(name) {
            Some(id) => Ok(id.clone()),
            None => Ok(BatchId::parse(name)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use herb_sdk::{BatchStatus, LedgerReader};

    use super::*;

    const DEMO: &str = include_str!("../demo/scenario.toml");

    fn parse(s: &str) -> Scenario {
        Scenario::from_toml_str(s).unwrap()
    }

    #[test]
    fn demo_scenario_runs_cleanly_except_scripted_errors() {
        let scenario = parse(DEMO);
        let run = run(&scenario, SessionConfig::default()).unwrap();

        let failed: Vec<_> = run.outcomes.iter().filter(|o| !o.ok).collect();
        assert_eq!(failed.len(), 2, "{failed:?}");
        assert!(failed[0].message.contains("out of range"));
        assert!(failed[1].message.contains("km from the Neem zone"));

        assert_eq!(run.collected.len(), 3);
        assert!(run.session.verify().is_consistent());
    }

    #[test]
    fn aliases_and_literal_ids_both_resolve() {
        let scenario = parse(
            r#"
            start = "2025-09-14T08:30:05Z"

            [[steps]]
            op = "collect"
            alias = "t"
            species = "tulsi"
            collector = "Meera"

            [[steps]]
            op = "process"
            batch = "t"
            step = { kind = "cleaning" }

            [[steps]]
            op = "recall"
            batch = "TUL-20250914-083005"
            reason = "mould"
            "#,
        );
        let run = run(&scenario, SessionConfig::default()).unwrap();
        assert_eq!(run.failures(), 0, "{:?}", run.outcomes);

        let id = BatchId::parse("TUL-20250914-083005").unwrap();
        assert_eq!(run.session.status(&id), BatchStatus::Recalled);
        assert_eq!(run.session.ledger().len(), 3);
    }

    #[test]
    fn unknown_batch_and_species_are_reported() {
        let scenario = parse(
            r#"
            [[steps]]
            op = "collect"
            species = "Mint"
            collector = "X"

            [[steps]]
            op = "test"
            batch = "nobody"
            measurement = { kind = "heavy_metals", lead_ppm = 0.1 }
            "#,
        );
        let run = run(&scenario, SessionConfig::default()).unwrap();
        assert_eq!(run.failures(), 2);
        assert_eq!(run.outcomes[0].message, "invalid species: Mint");
        assert_eq!(run.outcomes[1].message, "batch not found: nobody");
        assert!(run.session.ledger().is_empty());
    }

    #[test]
    fn steps_are_a_second_apart() {
        let scenario = parse(
            r#"
            start = "2025-01-01T00:00:00Z"

            [[steps]]
            op = "collect"
            species = "Neem"
            collector = "A"

            [[steps]]
            op = "wait"
            seconds = 59

            [[steps]]
            op = "collect"
            species = "Neem"
            collector = "B"
            "#,
        );
        let run = run(&scenario, SessionConfig::default()).unwrap();
        let ids: Vec<_> = run.collected.iter().map(|id| id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["NEE-20250101-000000", "NEE-20250101-000101"]);
    }

    #[test]
    fn oversized_wait_fails_and_leaves_clock_alone() {
        let scenario = parse(
            r#"
            start = "2025-01-01T00:00:00Z"

            [[steps]]
            op = "wait"
            seconds = 9223372036854775807

            [[steps]]
            op = "wait"
            seconds = -9223372036854775807

            [[steps]]
            op = "collect"
            species = "Neem"
            collector = "A"
            "#,
        );
        let run = run(&scenario, SessionConfig::default()).unwrap();
        assert_eq!(run.failures(), 2, "{:?}", run.outcomes);
        assert!(run.outcomes[0].message.contains("out of range"));
        assert!(run.outcomes[1].message.contains("out of range"));
        assert!(run.outcomes[2].ok);
        assert_eq!(run.collected[0].as_str(), "NEE-20250101-000002");
    }

    #[test]
    fn half_a_coordinate_is_rejected() {
        let scenario = parse(
            r#"
            [[steps]]
            op = "collect"
            species = "Brahmi"
            collector = "A"
            latitude = 9.5
            "#,
        );
        let run = run(&scenario, SessionConfig::default()).unwrap();
        assert_eq!(run.failures(), 1);
        assert!(run.collected.is_empty());
    }

    #[test]
    fn unknown_op_fails_to_parse() {
        assert!(Scenario::from_toml_str("[[steps]]\nop = \"burn\"\n").is_err());
    }
}
