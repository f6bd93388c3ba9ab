//! Append-only JSONL event log for a single run.
//!
//! The recorder owns the run's directory layout:
//!
//! ```text
//! <runs_dir>/<run_id>/events.jsonl
//! <runs_dir>/<run_id>/fixtures/
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::Event;
use crate::error::{ReplayError, Result};

/// File name of a run's event log
pub const EVENTS_FILE: &str = "events.jsonl";

/// Name of a run's fixture subdirectory
pub const FIXTURES_DIR: &str = "fixtures";

/// Durable, line-per-event sink for one run.
pub struct Recorder {
    run_id: String,
    run_dir: PathBuf,
    events_path: PathBuf,
    fixtures_dir: PathBuf,
    file: Option<File>,
}

impl Recorder {
    /// Create a recorder for `run_id` under `runs_dir`. Nothing touches disk until `start()`.
    pub fn new(run_id: impl Into<String>, runs_dir: impl AsRef<Path>) -> Self {
        let run_id = run_id.into();
        let run_dir = runs_dir.as_ref().join(&run_id);
        Self {
            events_path: run_dir.join(EVENTS_FILE),
            fixtures_dir: run_dir.join(FIXTURES_DIR),
            run_dir,
            run_id,
            file: None,
        }
    }

    /// Create the run directory tree and open the event log for appending.
    pub fn start(&mut self) -> Result<()> {
        fs::create_dir_all(&self.run_dir)?;
        fs::create_dir_all(&self.fixtures_dir)?;
        let file = OpenOptions::new().create(true).append(true).open(&self.events_path)?;
        self.file = Some(file);
        log::debug!("Recorder started for run {} at {}", self.run_id, self.run_dir.display());
        Ok(())
    }

    /// Append one event as a single line and sync it to disk before returning.
    pub fn log(&self, event: &Event) -> Result<()> {
        let file = self.file.as_ref().ok_or(ReplayError::NotStarted)?;
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        // One write per line keeps a crashed run readable up to its last full event.
        let mut writer: &File = file;
        writer.write_all(line.as_bytes())?;
        file.sync_data()?;
        Ok(())
    }

    /// Release the event log. Later calls are no-ops.
    pub fn close(&mut self) -> Result<()> {
        if let Some(file) = self.file.take() {
            file.sync_all()?;
            log::debug!("Recorder closed for run {}", self.run_id);
        }
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.file.is_some()
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn events_path(&self) -> &Path {
        &self.events_path
    }

    /// Fixture root for this run; record mode writes here
    pub fn fixtures_dir(&self) -> &Path {
        &self.fixtures_dir
    }
}
