use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use u_timetable::config::TimetableConfig;
use u_timetable::loader::Dataset;
use u_timetable::scheduler::{AllocationReport, Allocator, TimetableKpi};
use u_timetable::validation::verify_schedule;

/// Academic timetable allocator.
///
/// Reads a department-structured dataset and places every course's weekly
/// sessions into day/period slots and rooms.
#[derive(Debug, Parser)]
#[command(name = "u-timetable", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Allocate a timetable and write `{schedule, unmet}` JSON.
    Generate {
        /// Dataset JSON file.
        #[arg(short, long)]
        data: PathBuf,

        /// Override the configured shuffle seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (stdout when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a generated timetable against the dataset.
    Verify {
        /// Dataset JSON file.
        #[arg(short, long)]
        data: PathBuf,

        /// Timetable JSON produced by `generate`.
        #[arg(short, long)]
        schedule: PathBuf,
    },
}

/// Load config, then let the dataset's slot catalog override it.
fn load_run(config_path: Option<&Path>, data: &Path) -> Result<(TimetableConfig, Dataset)> {
    let config = TimetableConfig::load_from(config_path).context("failed to load configuration")?;
    let dataset = Dataset::from_path(data)
        .with_context(|| format!("failed to load dataset {}", data.display()))?;
    let config = dataset
        .apply_catalog(config)
        .context("invalid time_slots in dataset")?;
    tracing::debug!(?config, "loaded configuration");
    Ok((config, dataset))
}

fn generate(config: TimetableConfig, dataset: &Dataset, output: Option<&Path>) -> Result<()> {
    let request = dataset.to_request().context("failed to build allocation input")?;
    let allocator = Allocator::new(config).context("invalid configuration")?;
    let outcome = allocator.allocate(&request).context("allocation aborted")?;

    let kpi = TimetableKpi::calculate(&outcome, &request.rooms, allocator.catalog());
    tracing::info!(
        placed = kpi.sessions_placed,
        missing = kpi.sessions_missing,
        fill_rate = kpi.fill_rate,
        room_utilization = kpi.avg_room_utilization,
        "timetable generated"
    );

    let json = serde_json::to_string_pretty(&outcome.report())?;
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn verify(config: TimetableConfig, dataset: &Dataset, schedule: &Path) -> Result<()> {
    let request = dataset.to_request().context("failed to build allocation input")?;
    let demand = config.demand().context("invalid configuration")?;

    let text = std::fs::read_to_string(schedule)
        .with_context(|| format!("failed to read {}", schedule.display()))?;
    let report: AllocationReport =
        serde_json::from_str(&text).context("failed to parse timetable")?;

    let violations = verify_schedule(
        &report.schedule,
        &request.courses,
        &request.rooms,
        &request.sections,
        &demand,
    );
    for v in &violations {
        println!("{:?} [{}] {}", v.violation_type, v.entity_id, v.message);
    }
    if !report.unmet.is_empty() {
        let missing: u32 = report.unmet.iter().map(|u| u.missing_sessions).sum();
        println!("{missing} session(s) unmet");
    }
    if !violations.is_empty() {
        bail!("{} violation(s) found", violations.len());
    }
    println!("ok: {} session(s) verified", report.schedule.len());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match &cli.command {
        Commands::Generate { data, seed, output } => {
            let (mut config, dataset) = load_run(cli.config.as_deref(), data)?;
            if let Some(seed) = seed {
                config.seed = *seed;
            }
            generate(config, &dataset, output.as_deref())?;
        }
        Commands::Verify { data, schedule } => {
            let (config, dataset) = load_run(cli.config.as_deref(), data)?;
            verify(config, &dataset, schedule)?;
        }
    }

    Ok(())
}
