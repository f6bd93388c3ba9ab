//! CLI command definitions using clap.
//!
//! - run: execute a scenario in record or replay mode
//! - inspect: print a recorded run's events and fixture count

use clap::{Parser, Subcommand};
use replayci::domain::Mode;
use std::path::PathBuf;

/// ReplayCI - record and replay agent tool calls
#[derive(Parser, Debug)]
#[command(name = "replayci")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a scenario with the agent
    Run {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,

        /// Execution mode: record or replay
        #[arg(short, long, default_value = "record")]
        mode: Mode,

        /// Directory to store run artifacts (defaults to config runs.out_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Directory containing fixtures (required for replay)
        #[arg(short, long)]
        fixtures_dir: Option<PathBuf>,

        /// Automatically use the latest run's fixtures in replay mode
        #[arg(long)]
        use_latest_fixtures: bool,
    },

    /// Show the events and fixtures of a recorded run
    Inspect {
        /// Run directory (the one holding events.jsonl)
        run_dir: PathBuf,
    },
}
