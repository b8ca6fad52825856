//! Tangent-arc tour planner command line.
//!
//! Reads an obstacle layout, plans a tour and prints the drive commands as a
//! JSON array on stdout. Logs go to stderr; set `RUST_LOG` to adjust them.
//!
//! # Usage
//!
//! - `planner-cli --map "MAP=[[1,1,12,1],[2,11,11,3]]"`
//! - `planner-cli --json obstacles.json --format annotated`
//! - `planner-cli --random 5 --seed 42 --config planner.json`

mod input;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, ValueEnum};
use planner_tour::TourPlanner;
use planner_types::{CommandFormat, PlannerError};
use tracing::{error, info};

use crate::input::{Source, load_arena, load_config};

/// Plan a tour over an obstacle arena and print drive commands
#[derive(Parser)]
#[command(name = "planner-cli")]
#[command(about = "Tangent-arc tour planner", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Planner configuration as JSON
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Obstacle map string, e.g. "MAP=[[1,5,10,0]]"
    #[arg(long)]
    map: Option<String>,

    /// File of obstacle records
    #[arg(long)]
    json: Option<PathBuf>,

    /// Number of randomly placed obstacles
    #[arg(long)]
    random: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Move tokens and scan markers
    Tokens,
    /// Destination tags and position records
    Annotated,
}

impl From<Format> for CommandFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Tokens => Self::Tokens,
            Format::Annotated => Self::Annotated,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        config = config.with_format(format.into());
    }

    let source = match (&cli.source.map, &cli.source.json, cli.source.random) {
        (Some(map), _, _) => Source::Map(map),
        (_, Some(path), _) => Source::Json(path),
        (_, _, Some(count)) => Source::Random { count, seed: cli.seed },
        _ => anyhow::bail!("one of --map, --json or --random is required"),
    };
    let arena = load_arena(&source, &config)?;
    info!(obstacles = arena.obstacles().len(), "arena loaded");

    let outcome = TourPlanner::new(config).solve(&arena).map_err(|e| {
        if let PlannerError::Unsolvable { attempts } = e {
            error!(attempts, "no tour exists for this layout");
        }
        e
    })?;
    info!(
        order = ?outcome.tour.goal_ids(),
        total_distance = outcome.tour.total_distance(),
        relaxations = outcome.relaxations.len(),
        "planned tour"
    );

    println!("{}", serde_json::to_string(outcome.tour.commands())?);
    Ok(())
}
