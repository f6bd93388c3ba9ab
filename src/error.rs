//! Error types for ReplayCI
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// All error types that can occur while recording or replaying a run
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Tool is not present in the registry (record mode, or scenario validation)
    #[error("Tool {0} not found in registry")]
    ToolNotRegistered(String),

    /// Replay mode was started without a fixtures directory
    #[error("Replay mode requires a fixtures directory")]
    FixturesDirRequired,

    /// The configured fixtures directory does not exist
    #[error("Fixtures directory not found: {}", .0.display())]
    FixturesDirMissing(PathBuf),

    /// No prior run with a fixtures directory could be found
    #[error("No valid runs with fixtures found in '{}'", .0.display())]
    NoRecordedRuns(PathBuf),

    /// No recorded fixture matches the requested call (drift)
    #[error(
        "Fixture not found for tool '{tool}' with args hash {args_hash}. Expected at: {}. Args: {args}",
        .path.display()
    )]
    FixtureNotFound {
        tool: String,
        args_hash: String,
        path: PathBuf,
        args: Value,
    },

    /// Tool is not in the scenario's allow-list
    #[error("Tool {0} is not allowed in this scenario")]
    ToolNotAllowed(String),

    /// Scenario could not be loaded or validated
    #[error("Scenario error: {0}")]
    Scenario(String),

    /// A live tool failed
    #[error("Tool error: {0}")]
    Tool(String),

    /// Event log used before start()
    #[error("Recorder not started. Call start() first.")]
    NotStarted,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ReplayError {
    /// True when the error signals that replayed behavior diverged from the recording
    pub fn is_drift(&self) -> bool {
        matches!(self, Self::FixtureNotFound { .. })
    }

    /// True for setup mistakes that no amount of re-running will fix
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ToolNotRegistered(_)
                | Self::FixturesDirRequired
                | Self::FixturesDirMissing(_)
                | Self::NoRecordedRuns(_)
                | Self::Scenario(_)
        )
    }
}

/// Result type alias for ReplayCI operations
pub type Result<T> = std::result::Result<T, ReplayError>;
