//! Domain types for ReplayCI
//!
//! - Event: one line of a run's append-only event log
//! - Mode: record or replay
//! - Scenario: goal, allowed tools and assertions for a run
//! - GateVerdict: terminal pass/fail check over a completed run

pub mod event;
pub mod gate;
pub mod mode;
pub mod scenario;

pub use event::{Event, EventKind};
pub use gate::{GateVerdict, MAX_TOOL_CALLS_GATE};
pub use mode::Mode;
pub use scenario::{AllowedTool, Assertions, Scenario};
