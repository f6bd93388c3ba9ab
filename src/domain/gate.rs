//! Terminal pass/fail gate over a completed run.

use serde::{Deserialize, Serialize};

use super::event::{Event, EventKind};

/// Name of the call-count ceiling gate
pub const MAX_TOOL_CALLS_GATE: &str = "max_tool_calls";

/// Outcome of a gate check, logged as the gate_result payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateVerdict {
    pub gate: String,
    pub passed: bool,
    pub observed: u32,
    pub limit: u32,
}

impl GateVerdict {
    /// Evaluate `observed <= limit`
    pub fn max_tool_calls(observed: u32, limit: u32) -> Self {
        Self {
            gate: MAX_TOOL_CALLS_GATE.to_string(),
            passed: observed <= limit,
            observed,
            limit,
        }
    }

    /// Build the gate_result event for this verdict
    pub fn to_event(&self, run_id: &str, step: u64) -> Event {
        let payload = serde_json::json!({
            "gate": self.gate,
            "passed": self.passed,
            "observed": self.observed,
            "limit": self.limit,
        });
        Event::new(run_id, step, EventKind::GateResult, payload)
    }
}
