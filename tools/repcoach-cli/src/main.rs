//! RepCoach CLI: command-line interface for replaying and inspecting pose streams.
//!
//! Usage:
//!   repcoach analyze <FILE> --exercise <ID>   Replay a pose-frame stream through a session
//!   repcoach synth --exercise <ID>            Write a synthetic pose-frame stream
//!   repcoach exercises                        List supported exercises
//!   repcoach instructions <ID>                Show execution instructions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "repcoach",
    about = "Repetition counting and form feedback from body landmarks",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a config file (defaults to the standard location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSONL pose-frame stream through a tracking session
    Analyze {
        /// Path to the pose-frame stream
        path: PathBuf,

        /// Exercise identifier: squat|push_up|hammer_curl
        #[arg(short, long)]
        exercise: String,

        /// Print one JSON object per frame instead of a table
        #[arg(long)]
        json: bool,

        /// Pace replay by the frame timestamps
        #[arg(long)]
        realtime: bool,
    },

    /// Generate a synthetic pose-frame stream with known repetitions
    Synth {
        /// Exercise identifier: squat|push_up|hammer_curl
        #[arg(short, long)]
        exercise: String,

        /// Number of repetitions
        #[arg(long, default_value = "3")]
        reps: u32,

        /// Frames per second
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported exercises
    Exercises,

    /// Show execution instructions for an exercise
    Instructions {
        /// Exercise identifier
        exercise: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => repcoach_common::config::AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => repcoach_common::config::AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    repcoach_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Analyze {
            path,
            exercise,
            json,
            realtime,
        } => commands::analyze::run(path, exercise, json, realtime, config.tracking).await,
        Commands::Synth {
            exercise,
            reps,
            fps,
            output,
        } => commands::synth::run(exercise, reps, fps, output, config.tracking),
        Commands::Exercises => commands::exercises::run(),
        Commands::Instructions { exercise } => commands::instructions::run(exercise),
    }
}
