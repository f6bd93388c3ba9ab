//! One complete record or replay run, from fixture resolution to gate verdict.

use std::path::{Path, PathBuf};

use crate::agent::{Agent, RunDriver};
use crate::domain::{GateVerdict, Mode, Scenario};
use crate::error::{ReplayError, Result};
use crate::fixtures::latest_fixtures_dir;
use crate::id::generate_run_id;
use crate::runlog::Recorder;
use crate::tools::{ToolExecutor, ToolRegistry};

/// How to execute a run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub mode: Mode,
    /// Root under which `<run_id>/` is created
    pub out_dir: PathBuf,
    /// Replay source; must already be resolved (see [`resolve_fixtures_dir`])
    pub fixtures_dir: Option<PathBuf>,
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: String,
    pub run_dir: PathBuf,
    pub events_path: PathBuf,
    pub mode: Mode,
    pub fixtures_dir: Option<PathBuf>,
    pub tool_calls: u32,
    pub latency_ms: u64,
    pub gate: GateVerdict,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.gate.passed
    }

    /// One-line human-readable summary
    pub fn summary_line(&self) -> String {
        let fixtures = self
            .fixtures_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "None".to_string());
        format!(
            "run_id={}, tool_calls={}, latency_ms={}, mode={}, fixtures_dir={}",
            self.run_id, self.tool_calls, self.latency_ms, self.mode, fixtures
        )
    }
}

/// Work out which fixtures directory a run reads from.
///
/// Record mode passes `fixtures_dir` through untouched. Replay mode requires a
/// directory that exists, either given explicitly or, with `use_latest`, the
/// newest run under `out_dir` that has fixtures.
pub fn resolve_fixtures_dir(
    mode: Mode,
    out_dir: &Path,
    fixtures_dir: Option<PathBuf>,
    use_latest: bool,
) -> Result<Option<PathBuf>> {
    if mode == Mode::Record {
        return Ok(fixtures_dir);
    }

    let dir = match fixtures_dir {
        Some(dir) => dir,
        None if use_latest => {
            let latest = latest_fixtures_dir(out_dir)?;
            log::info!("Auto-selected latest fixtures: {}", latest.display());
            latest
        }
        None => return Err(ReplayError::FixturesDirRequired),
    };

    if !dir.is_dir() {
        return Err(ReplayError::FixturesDirMissing(dir));
    }
    Ok(Some(dir))
}

/// Execute `agent` against `scenario` in a fresh run directory and evaluate the gate.
///
/// Any error aborts the run before a gate_result event is written. The event
/// log is closed on both paths.
pub fn run_scenario(
    scenario: &Scenario,
    options: &RunOptions,
    registry: &ToolRegistry,
    agent: &dyn Agent,
) -> Result<RunReport> {
    let run_id = generate_run_id();
    let mut recorder = Recorder::new(&run_id, &options.out_dir);
    recorder.start()?;

    let outcome = drive_run(scenario, options, registry, agent, &recorder);
    let closed = recorder.close();
    let (tool_calls, latency_ms, gate) = settle(outcome, closed)?;

    Ok(RunReport {
        run_id,
        run_dir: recorder.run_dir().to_path_buf(),
        events_path: recorder.events_path().to_path_buf(),
        mode: options.mode,
        fixtures_dir: options.fixtures_dir.clone(),
        tool_calls,
        latency_ms,
        gate,
    })
}

/// Combine a run's outcome with closing its event log. The run's own error wins.
fn settle<T>(outcome: Result<T>, closed: Result<()>) -> Result<T> {
    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(run_err), Ok(())) => Err(run_err),
        (Err(run_err), Err(close_err)) => {
            log::warn!("Failed to close event log after aborted run: {}", close_err);
            Err(run_err)
        }
    }
}

fn drive_run(
    scenario: &Scenario,
    options: &RunOptions,
    registry: &ToolRegistry,
    agent: &dyn Agent,
    recorder: &Recorder,
) -> Result<(u32, u64, GateVerdict)> {
    let executor = ToolExecutor::new(registry, recorder, options.mode, options.fixtures_dir.clone());
    let mut driver = RunDriver::new(executor, recorder, scenario);

    let latency_ms = driver.drive(agent)?;
    let gate = driver.evaluate_gate()?;
    Ok((driver.tool_calls(), latency_ms, gate))
}
