use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

mod cli;
mod config;

use cli::{Cli, Commands};
use config::Config;
use replayci::agent::ResearchAgent;
use replayci::domain::{Event, Mode, Scenario};
use replayci::fixtures::FixtureStore;
use replayci::harness::{RunOptions, resolve_fixtures_dir, run_scenario};
use replayci::runlog::{EVENTS_FILE, FIXTURES_DIR, read_events};
use replayci::tools::ToolRegistry;

const PAYLOAD_PREVIEW_CHARS: usize = 80;

fn setup_logging(config: &Config) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("replayci")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("replayci.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG wins over the configured level
    let default_level = config.log_level.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Run {
            scenario_path,
            mode,
            out,
            fixtures_dir,
            use_latest_fixtures,
        } => handle_run_command(
            scenario_path,
            *mode,
            out.as_ref(),
            fixtures_dir.as_ref(),
            *use_latest_fixtures,
            config,
        ),
        Commands::Inspect { run_dir } => handle_inspect_command(run_dir),
    }
}

fn handle_run_command(
    scenario_path: &Path,
    mode: Mode,
    out: Option<&PathBuf>,
    fixtures_dir: Option<&PathBuf>,
    use_latest_fixtures: bool,
    config: &Config,
) -> Result<()> {
    let out_dir = out.cloned().unwrap_or_else(|| config.runs.out_dir.clone());
    let use_latest = use_latest_fixtures || config.replay.use_latest_fixtures;
    info!(
        "Run requested: scenario={} mode={} out={}",
        scenario_path.display(),
        mode,
        out_dir.display()
    );

    let resolved = resolve_fixtures_dir(mode, &out_dir, fixtures_dir.cloned(), use_latest)?;
    if let (Mode::Replay, Some(dir)) = (mode, &resolved) {
        if fixtures_dir.is_none() {
            println!("{} {}", "Auto-selected latest fixtures:".cyan(), dir.display());
        }
        println!("{} {}", "replay: loading fixtures from".cyan(), dir.display());
    }

    let registry = ToolRegistry::with_builtin_tools();
    let scenario = Scenario::load(scenario_path, &registry)?;

    let options = RunOptions {
        mode,
        out_dir,
        fixtures_dir: resolved,
    };
    let report = run_scenario(&scenario, &options, &registry, &ResearchAgent::default())?;

    println!("{}", report.summary_line());
    if !report.passed() {
        eyre::bail!(
            "Gate failed: {} (limit {}, actual {})",
            report.gate.gate,
            report.gate.limit,
            report.gate.observed
        );
    }

    println!("{} events written to {}", "Gate passed.".green(), report.events_path.display());
    Ok(())
}

fn handle_inspect_command(run_dir: &Path) -> Result<()> {
    info!("Inspecting run: {}", run_dir.display());

    let events_path = run_dir.join(EVENTS_FILE);
    let events = read_events(&events_path).context(format!("Failed to read {}", events_path.display()))?;

    println!("{} {} ({} events)", "Run:".green(), run_dir.display(), events.len());
    for event in &events {
        println!("{}", format_event(event));
    }

    let fixtures = FixtureStore::new(run_dir.join(FIXTURES_DIR)).list()?;
    println!("{} {}", "Fixtures:".green(), fixtures.len());
    Ok(())
}

fn format_event(event: &Event) -> String {
    let payload = event.payload.to_string();
    let preview: String = if payload.chars().count() > PAYLOAD_PREVIEW_CHARS {
        let head: String = payload.chars().take(PAYLOAD_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        payload
    };
    let kind = format!("{:<12}", event.kind.as_str());
    format!("{:>4}  {} {}", event.step, kind.cyan(), preview)
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(&config).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
