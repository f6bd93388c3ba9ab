//! Tool executor - resolves a tool call live or from fixtures
//!
//! Every call goes through the same sequence:
//! tool_call logged -> args hashed -> result resolved -> tool_result logged.
//! Record mode runs the registered tool and writes a fixture; replay mode
//! only reads fixtures and never touches the registry.

use std::path::PathBuf;

use serde_json::Value;

use super::ToolRegistry;
use crate::domain::{Event, Mode};
use crate::error::{ReplayError, Result};
use crate::fixtures::FixtureStore;
use crate::hashing::compute_args_hash;
use crate::runlog::Recorder;

/// Executes tool calls for one run
pub struct ToolExecutor<'a> {
    registry: &'a ToolRegistry,
    recorder: &'a Recorder,
    mode: Mode,
    record_store: FixtureStore,
    replay_store: Option<FixtureStore>,
}

impl<'a> ToolExecutor<'a> {
    /// `fixtures_dir` is the replay source; record mode writes into the recorder's own fixtures dir.
    pub fn new(registry: &'a ToolRegistry, recorder: &'a Recorder, mode: Mode, fixtures_dir: Option<PathBuf>) -> Self {
        Self {
            registry,
            recorder,
            mode,
            record_store: FixtureStore::new(recorder.fixtures_dir()),
            replay_store: fixtures_dir.map(FixtureStore::new),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Execute one tool call. Logs tool_call at `step` and tool_result at `step + 1`.
    pub fn execute(&self, tool_name: &str, args: &Value, step: u64) -> Result<Value> {
        let run_id = self.recorder.run_id();
        self.recorder.log(&Event::tool_call(run_id, step, tool_name, args))?;

        let args_hash = compute_args_hash(args)?;
        let result = match self.mode {
            Mode::Replay => self.replay(tool_name, &args_hash, args)?,
            Mode::Record => self.record(tool_name, &args_hash, args)?,
        };

        self.recorder.log(&Event::tool_result(run_id, step + 1, tool_name, &result))?;
        Ok(result)
    }

    fn replay(&self, tool_name: &str, args_hash: &str, args: &Value) -> Result<Value> {
        let store = self.replay_store.as_ref().ok_or(ReplayError::FixturesDirRequired)?;
        store.read(tool_name, args_hash, args).inspect_err(|e| {
            if e.is_drift() {
                log::warn!("Replay drift on {} ({}): {}", tool_name, args_hash, e);
            }
        })
    }

    fn record(&self, tool_name: &str, args_hash: &str, args: &Value) -> Result<Value> {
        let tool = self
            .registry
            .get(tool_name)
            .ok_or_else(|| ReplayError::ToolNotRegistered(tool_name.to_string()))?;

        log::debug!("Invoking live tool {} ({})", tool_name, args_hash);
        let result = tool.invoke(args)?;
        self.record_store.write(tool_name, args_hash, args, &result)?;
        Ok(result)
    }
}
