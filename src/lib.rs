//! ReplayCI - record an agent's tool calls once, replay them deterministically
//!
//! In record mode every tool call runs live and its result is stored as a
//! fixture keyed by the canonical hash of the tool's arguments. In replay mode
//! the same calls are answered from those fixtures without touching any real
//! tool, and any call the recording never saw fails as drift.

pub mod agent;
pub mod domain;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod hashing;
pub mod id;
pub mod runlog;
pub mod tools;

pub use error::{ReplayError, Result};
