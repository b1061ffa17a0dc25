//! Tilesched Runtime
//!
//! Loads settings and a scenario, orders its render tasks and logs the result

mod demo;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tilesched_core::snapshot::Scenario;
use tilesched_core::{PriorityComparator, SchedulerSettings, Server};
use tracing_subscriber::EnvFilter;

/// Order render tasks by region count and distance to online players.
#[derive(Debug, Parser)]
#[command(name = "tilesched", version)]
struct Args {
    /// Settings file (JSON); defaults are used when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Scenario file (JSON); a built-in demo is used when omitted.
    scenario: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();
    tracing::info!("Tilesched v{}", tilesched_core::VERSION);

    let settings = match &args.settings {
        Some(path) => SchedulerSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => SchedulerSettings::default(),
    };

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("loading scenario from {}", path.display()))?,
        None => {
            tracing::info!("No scenario given, using built-in demo");
            demo::scenario()
        }
    };

    let default_grid = settings
        .region_grid
        .to_grid()
        .context("invalid default region grid")?;
    let built = scenario.build(default_grid).context("building scenario")?;

    for task in &built.tasks {
        task.check_depth(settings.max_task_depth)
            .with_context(|| format!("task {} rejected", task.id()))?;
    }

    let server: &dyn Server = &built.server;
    let mut comparator = PriorityComparator::from_settings(&settings, Some(server));
    let mut tasks = built.tasks.clone();
    comparator.sort(&mut tasks);

    for (position, task) in tasks.iter().enumerate() {
        let priority = comparator.priority_of(task);
        tracing::info!(
            position,
            task = %task.id(),
            regions = priority.region_count,
            distance = %priority.distance,
            "queued"
        );
    }

    for (name, value) in comparator.counters().iter() {
        tracing::debug!(counter = name, value, "metrics");
    }

    Ok(())
}
