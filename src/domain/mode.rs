//! Execution mode of a run.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether tools run live or are substituted from fixtures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Run tools live and persist their results as fixtures
    #[default]
    Record,
    /// Serve tool results from a fixtures directory
    Replay,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::Replay => "replay",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "record" => Ok(Self::Record),
            "replay" => Ok(Self::Replay),
            other => Err(format!("Invalid mode: {}. Must be 'record' or 'replay'.", other)),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
