use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scour::conf::RunConfig;
use scour::extract::GrammarKind;
use scour::pipeline::{self, RunOutcome};

/// Stream noisy OCR dumps into validated JSON Lines records.
#[derive(Parser, Debug)]
#[command(name = "scour", version)]
struct Cli {
    /// UTF-8 input file, one logical record per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON Lines output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extraction grammar
    #[arg(short, long, value_enum)]
    grammar: Option<GrammarKind>,

    /// Memory usage percent that pauses the run at a checkpoint
    #[arg(long)]
    pause_threshold: Option<f32>,

    /// Disk usage percent that halts the run (pre-flight or mid-run)
    #[arg(long)]
    disk_threshold: Option<f32>,

    /// Governance checkpoint every this many processed lines
    #[arg(long)]
    checkpoint_interval: Option<u64>,

    /// Cooldown pause length after a memory trip, in seconds
    #[arg(long)]
    cooldown_secs: Option<u64>,

    /// Disable the name-field '3' -> 'e' OCR correction
    #[arg(long)]
    no_fix_name_glyphs: bool,

    /// Optional TOML config file; CLI flags override it
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Initialise the tracing / logging subsystem.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scour=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    // Priority: CLI flags > environment variables > config file > defaults.
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            RunConfig::from_file(path)?
        }
        None => RunConfig::default(),
    };
    config.apply_env();

    if let Some(input) = cli.input {
        config.input = input;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(grammar) = cli.grammar {
        config.grammar = grammar;
    }
    if let Some(pause) = cli.pause_threshold {
        config.pause_threshold = pause;
    }
    if let Some(disk) = cli.disk_threshold {
        config.disk_threshold = disk;
    }
    if let Some(interval) = cli.checkpoint_interval {
        config.checkpoint_interval = interval;
    }
    if let Some(secs) = cli.cooldown_secs {
        config.cooldown_secs = secs;
    }
    if cli.no_fix_name_glyphs {
        config.fix_name_glyphs = false;
    }

    let report = pipeline::run(&config)?;
    match report.outcome {
        RunOutcome::Complete => {
            info!(records = report.records_written, "audit complete");
        }
        RunOutcome::Aborted(reason) => {
            // A governance halt is a reported outcome, not a crash.
            info!(?reason, records = report.records_written, "run halted by governor");
        }
    }
    Ok(())
}
