//! Event records written to a run's event log.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::now_ms;

/// Kind of happening an event records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    RunStart,
    ToolCall,
    ToolResult,
    AgentNote,
    RunEnd,
    GateResult,
}

impl EventKind {
    /// Wire name as written in the `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RunStart => "run_start",
            Self::ToolCall => "tool_call",
            Self::ToolResult => "tool_result",
            Self::AgentNote => "agent_note",
            Self::RunEnd => "run_end",
            Self::GateResult => "gate_result",
        }
    }

    /// Whether the event closes a run
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::RunEnd | Self::GateResult)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable line of a run's event log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    /// Run this event belongs to
    pub run_id: String,
    /// Step number; non-decreasing within a run
    pub step: u64,
    /// Event kind
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Kind-specific payload
    pub payload: Value,
    /// Unix timestamp in milliseconds, captured at creation
    pub ts_ms: u64,
}

impl Event {
    /// Create a new event stamped with the current time
    pub fn new(run_id: &str, step: u64, kind: EventKind, payload: Value) -> Self {
        Self {
            run_id: run_id.to_string(),
            step,
            kind,
            payload,
            ts_ms: now_ms(),
        }
    }

    /// Create a run_start event
    pub fn run_start(run_id: &str, step: u64, scenario_id: &str) -> Self {
        Self::new(run_id, step, EventKind::RunStart, serde_json::json!({ "scenario_id": scenario_id }))
    }

    /// Create a tool_call event
    pub fn tool_call(run_id: &str, step: u64, tool: &str, args: &Value) -> Self {
        Self::new(
            run_id,
            step,
            EventKind::ToolCall,
            serde_json::json!({ "tool": tool, "args": args }),
        )
    }

    /// Create a tool_result event
    pub fn tool_result(run_id: &str, step: u64, tool: &str, result: &Value) -> Self {
        Self::new(
            run_id,
            step,
            EventKind::ToolResult,
            serde_json::json!({ "tool": tool, "result": result }),
        )
    }

    /// Create an agent_note event
    pub fn agent_note(run_id: &str, step: u64, note: &str) -> Self {
        Self::new(run_id, step, EventKind::AgentNote, serde_json::json!({ "note": note }))
    }

    /// Create a run_end event
    pub fn run_end(run_id: &str, step: u64, tool_calls: u32, latency_ms: u64) -> Self {
        Self::new(
            run_id,
            step,
            EventKind::RunEnd,
            serde_json::json!({
                "tool_calls": tool_calls,
                "latency_ms": latency_ms
            }),
        )
    }
}
