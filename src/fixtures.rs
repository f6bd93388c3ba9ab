//! Fixture store: persisted (tool, args-hash) -> result records.
//!
//! Layout is `<root>/<tool>/<args_hash>.json`, identical for the run that
//! writes fixtures and any later run that reads them, so a recorded fixtures
//! directory can be replayed as-is or after being copied elsewhere.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ReplayError, Result};
use crate::runlog::FIXTURES_DIR;

/// One recorded tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub tool: String,
    pub args: Value,
    pub result: Value,
}

/// Read/write access to fixtures under a single root directory
#[derive(Debug, Clone)]
pub struct FixtureStore {
    root: PathBuf,
}

impl FixtureStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a fixture for `tool` with `args_hash` lives at
    pub fn path_for(&self, tool: &str, args_hash: &str) -> PathBuf {
        self.root.join(tool).join(format!("{}.json", args_hash))
    }

    /// Persist a fixture, replacing any previous one for the same call shape.
    pub fn write(&self, tool: &str, args_hash: &str, args: &Value, result: &Value) -> Result<PathBuf> {
        let path = self.path_for(tool, args_hash);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let fixture = Fixture {
            tool: tool.to_string(),
            args: args.clone(),
            result: result.clone(),
        };
        let content = serde_json::to_string_pretty(&fixture)?;

        // Readers only ever see a complete fixture or none at all
        let staging = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&staging)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&staging, &path)?;
        log::debug!("Wrote fixture {}", path.display());
        Ok(path)
    }

    /// Look up the recorded result for a call. `args` is only used for diagnostics on a miss.
    pub fn read(&self, tool: &str, args_hash: &str, args: &Value) -> Result<Value> {
        let path = self.path_for(tool, args_hash);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ReplayError::FixtureNotFound {
                    tool: tool.to_string(),
                    args_hash: args_hash.to_string(),
                    path,
                    args: args.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let fixture: Fixture = serde_json::from_str(&content)?;
        log::debug!("Loaded fixture {}", path.display());
        Ok(fixture.result)
    }

    /// All fixtures under the root, ordered by path
    pub fn list(&self) -> Result<Vec<Fixture>> {
        let pattern = format!("{}/*/*.json", glob::Pattern::escape(&self.root.to_string_lossy()));
        let mut paths = glob_paths(&pattern)?;
        paths.sort();

        let mut fixtures = Vec::with_capacity(paths.len());
        for path in paths {
            let content = fs::read_to_string(&path)?;
            fixtures.push(serde_json::from_str(&content)?);
        }
        Ok(fixtures)
    }
}

/// Fixtures directory of the most recent run under `out_dir` that has one.
///
/// Run IDs start with a sortable timestamp, so the greatest name is the newest run.
pub fn latest_fixtures_dir(out_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let out_dir = out_dir.as_ref();
    if !out_dir.is_dir() {
        return Err(ReplayError::NoRecordedRuns(out_dir.to_path_buf()));
    }

    let pattern = format!("{}/*/{}", glob::Pattern::escape(&out_dir.to_string_lossy()), FIXTURES_DIR);
    glob_paths(&pattern)?
        .into_iter()
        .filter(|p| p.is_dir())
        .max()
        .ok_or_else(|| ReplayError::NoRecordedRuns(out_dir.to_path_buf()))
}

fn glob_paths(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern)
        .map_err(|e| ReplayError::Io(io::Error::new(io::ErrorKind::InvalidInput, e.to_string())))?;
    let mut out = Vec::new();
    for entry in paths {
        out.push(entry.map_err(|e| ReplayError::Io(e.into_error()))?);
    }
    Ok(out)
}
