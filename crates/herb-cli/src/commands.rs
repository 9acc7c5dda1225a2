use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use herb_sdk::{
    BatchStatus, Dashboard, DashboardFilter, ExplorerRow, GeofenceChecker, JourneyView,
    SensorReading, SessionConfig, Species,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::cli::*;
use crate::scenario::{self, Scenario, ScenarioRun, StepOutcome};

const DEMO_SCENARIO: &str = include_str!("../demo/scenario.toml");

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli.config)?;
    let format = cli.format;
    match cli.command {
        Command::Zones => cmd_zones(&config, format),
        Command::Check(args) => cmd_check(&config, args, format),
        Command::Sense(args) => cmd_sense(args, format),
        Command::Run(args) => {
            let contents = fs::read_to_string(&args.scenario)
                .with_context(|| format!("reading {}", args.scenario.display()))?;
            let scenario = Scenario::from_toml_str(&contents)
                .with_context(|| format!("parsing {}", args.scenario.display()))?;
            cmd_run(config, &scenario, &args.report, format)
        }
        Command::Demo(args) => {
            let scenario = Scenario::from_toml_str(DEMO_SCENARIO)?;
            cmd_run(config, &scenario, &args, format)
        }
    }
}

/// A missing file means defaults; a file that exists must parse.
fn load_config(path: &Path) -> anyhow::Result<SessionConfig> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        return Ok(SessionConfig::default());
    }
    Ok(SessionConfig::load(path)?)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_zones(config: &SessionConfig, format: OutputFormat) -> anyhow::Result<()> {
    let checker = GeofenceChecker::new(&config.geofence)?;

    if format == OutputFormat::Json {
        let zones: Vec<_> = checker
            .zones()
            .map(|(species, point)| {
                serde_json::json!({
                    "species": species,
                    "latitude": point.latitude,
                    "longitude": point.longitude,
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "max_distance_km": checker.max_distance_km(),
            "zones": zones,
        }));
    }

    println!(
        "Reference zones (radius {} km):",
        checker.max_distance_km().to_string().bold()
    );
    for (species, point) in checker.zones() {
        println!("  {:<12} {}", species.to_string().green(), point);
    }
    Ok(())
}

fn cmd_check(config: &SessionConfig, args: CheckArgs, format: OutputFormat) -> anyhow::Result<()> {
    let checker = GeofenceChecker::new(&config.geofence)?;
    let verdict = checker.check_raw(args.lat, args.lon, &args.species)?;

    if format == OutputFormat::Json {
        return print_json(&verdict);
    }

    if verdict.within_allowed {
        println!(
            "{} Location approved for {}",
            "✓".green().bold(),
            verdict.species.to_string().bold()
        );
    } else {
        println!(
            "{} Location rejected for {}",
            "✗".red().bold(),
            verdict.species.to_string().bold()
        );
    }
    println!(
        "  Distance: {:.2} km from {} (limit {} km)",
        verdict.distance_km, verdict.reference, verdict.max_distance_km
    );
    Ok(())
}

fn cmd_sense(args: SenseArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let readings: Vec<SensorReading> = (0..args.count)
        .map(|_| herb_sdk::simulate_esp8266(&mut rng))
        .collect();

    if format == OutputFormat::Json {
        return print_json(&readings);
    }

    for r in &readings {
        println!(
            "ESP8266  temperature {} °C  humidity {} %",
            r.temperature_celsius.to_string().cyan(),
            r.humidity_percent.to_string().cyan()
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct SessionReport<'a> {
    session: String,
    steps: &'a [StepOutcome],
    dashboard: Dashboard,
    journeys: Vec<JourneyView>,
    ledger: Vec<ExplorerRow>,
    audit: AuditSummary,
}

#[derive(Serialize)]
struct AuditSummary {
    entries: u64,
    sequence_gapless: bool,
    timestamps_ordered: bool,
    replay_matches: bool,
    skipped_entries: Vec<u64>,
}

fn dashboard_filter(args: &ReportArgs) -> anyhow::Result<DashboardFilter> {
    let mut filter = DashboardFilter::default();
    if !args.species.is_empty() {
        let species = args
            .species
            .iter()
            .map(|s| s.parse::<Species>())
            .collect::<Result<Vec<_>, _>>()?;
        filter = filter.with_species(species);
    }
    if !args.statuses.is_empty() {
        let statuses = args
            .statuses
            .iter()
            .map(|s| match s {
                StatusArg::Active => BatchStatus::Active,
                StatusArg::Recalled => BatchStatus::Recalled,
            })
            .collect();
        filter = filter.with_statuses(statuses);
    }
    Ok(filter)
}

fn cmd_run(
    config: SessionConfig,
    scenario: &Scenario,
    args: &ReportArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let filter = dashboard_filter(args)?;
    let run = scenario::run(scenario, config)?;
    let session = &run.session;

    let dashboard = session.dashboard(&filter);
    let journeys = if args.no_journeys {
        vec![]
    } else {
        run.collected
            .iter()
            .map(|id| session.journey(id))
            .collect::<Result<Vec<_>, _>>()?
    };
    let ledger = if args.no_ledger {
        vec![]
    } else {
        session.explorer()
    };
    let check = session.verify();

    if format == OutputFormat::Json {
        return print_json(&SessionReport {
            session: session.id().to_string(),
            steps: &run.outcomes,
            dashboard,
            journeys,
            ledger,
            audit: AuditSummary {
                entries: check.validation.entry_count,
                sequence_gapless: check.validation.sequence_gapless,
                timestamps_ordered: check.validation.timestamps_ordered,
                replay_matches: check.replay_matches,
                skipped_entries: check.skipped_entries,
            },
        });
    }

    print_steps(&run);
    print_dashboard(&dashboard);
    for view in &journeys {
        print_journey(view);
    }
    if !ledger.is_empty() {
        print_ledger(&ledger);
    }

    println!();
    if check.is_consistent() {
        println!(
            "{} Ledger verified: {} entries, replay matches live state",
            "✓".green().bold(),
            check.validation.entry_count
        );
    } else {
        println!("{} Ledger verification failed", "✗".red().bold());
        for v in &check.validation.violations {
            println!("  #{}: {}", v.index, v.description);
        }
        if !check.replay_matches {
            println!("  replay diverges from live state");
        }
    }
    Ok(())
}

fn print_steps(run: &ScenarioRun) {
    println!("{}", "Session".bold().underline());
    for o in &run.outcomes {
        if o.ok {
            println!("  {} {:>3}  {}", "✓".green(), o.step, o.message);
        } else {
            println!("  {} {:>3}  {}", "✗".red(), o.step, o.message.red());
        }
    }
}

fn status_label(status: BatchStatus) -> colored::ColoredString {
    match status {
        BatchStatus::Active => status.to_string().green(),
        BatchStatus::Recalled => status.to_string().red().bold(),
    }
}

fn print_dashboard(dashboard: &Dashboard) {
    println!("\n{}", "Dashboard".bold().underline());
    if dashboard.is_empty() {
        println!("  No batches match filter");
        return;
    }
    for row in &dashboard.rows {
        println!(
            "  {} - {} [{}]",
            row.batch_id.to_string().yellow().bold(),
            row.species,
            status_label(row.status)
        );
        println!(
            "    Steps: {}  Tests: {}  Health: {}%  Collector: {}",
            row.steps_completed, row.tests_done, row.health_score, row.collector
        );
        println!("    {}", row.journey_link.blue());
    }
    let counts: Vec<String> = dashboard
        .status_counts
        .iter()
        .map(|c| format!("{}: {}", c.status, c.count))
        .collect();
    println!("  Status distribution: {}", counts.join(", "));
}

fn print_journey(view: &JourneyView) {
    let batch = &view.batch;
    println!(
        "\n{} {}",
        "Journey".bold().underline(),
        batch.id.to_string().yellow().bold()
    );
    println!(
        "  {} collected by {} at {} on {}",
        batch.species,
        batch.collector,
        batch.location,
        batch.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!("  Health score: {}%", view.health_score.to_string().bold());
    println!(
        "  Predicted quality: {}%",
        view.quality.percentage.to_string().bold()
    );
    for o in &view.quality.outcomes {
        let mark = if o.passed { "✓".green() } else { "✗".red() };
        let observed = o
            .observed
            .map(|v| v.to_string())
            .unwrap_or_else(|| "not recorded".into());
        println!(
            "    {} {:<22} {} (limit {})",
            mark,
            o.criterion.label(),
            observed,
            o.criterion.limit()
        );
    }

    match &view.recall {
        Some(recall) if recall.reason.is_empty() => {
            println!("  {}", "This batch has been recalled".red().bold())
        }
        Some(recall) => println!(
            "  {} ({})",
            "This batch has been recalled".red().bold(),
            recall.reason
        ),
        None => println!("  {}", "Batch is active".green()),
    }

    println!("  Waypoints:");
    for w in &view.waypoints {
        println!(
            "    {:<18} {}  {}",
            w.label,
            w.position,
            w.details.dimmed()
        );
    }
    println!("  Scan: {}", view.journey_link.blue());
}

fn print_ledger(rows: &[ExplorerRow]) {
    println!("\n{}", "Ledger".bold().underline());
    for row in rows {
        println!(
            "  {} {}  {:<10} {}  {}",
            format!("#{}", row.index).yellow(),
            row.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            row.kind.to_string(),
            row.batch_id,
            row.summary
        );
    }
}
