//! Scenario definitions loaded from YAML.
//!
//! A scenario names a goal, the tools a run may call, and the assertions the
//! gate checks once the run completes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReplayError, Result};
use crate::tools::ToolRegistry;

fn default_max_tool_calls() -> u32 {
    10
}

/// A tool a scenario permits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedTool {
    pub name: String,
}

/// Terminal assertions evaluated by the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertions {
    #[serde(default = "default_max_tool_calls")]
    pub max_tool_calls: u32,
}

impl Default for Assertions {
    fn default() -> Self {
        Self {
            max_tool_calls: default_max_tool_calls(),
        }
    }
}

/// A declarative run scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub goal_prompt: String,
    #[serde(default)]
    pub allowed_tools: Vec<AllowedTool>,
    #[serde(default)]
    pub assertions: Assertions,
}

impl Scenario {
    /// Parse a scenario from YAML without registry validation
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a scenario file and check every allowed tool exists in `registry`
    pub fn load(path: impl AsRef<Path>, registry: &ToolRegistry) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ReplayError::Scenario(format!(
                "Scenario file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let scenario = Self::from_yaml(&content)
            .map_err(|e| ReplayError::Scenario(format!("{}: {}", path.display(), e)))?;
        scenario.validate(registry)?;

        log::info!("Loaded scenario {} from {}", scenario.id, path.display());
        Ok(scenario)
    }

    /// Reject scenarios that allow tools the registry cannot execute
    pub fn validate(&self, registry: &ToolRegistry) -> Result<()> {
        for tool in &self.allowed_tools {
            if !registry.contains(&tool.name) {
                return Err(ReplayError::Scenario(format!(
                    "Scenario allows unknown tool: {}",
                    tool.name
                )));
            }
        }
        Ok(())
    }

    /// Check whether the scenario permits calling `tool_name`
    pub fn allows(&self, tool_name: &str) -> bool {
        self.allowed_tools.iter().any(|t| t.name == tool_name)
    }

    /// Names of all permitted tools, in declaration order
    pub fn allowed_tool_names(&self) -> Vec<&str> {
        self.allowed_tools.iter().map(|t| t.name.as_str()).collect()
    }
}
