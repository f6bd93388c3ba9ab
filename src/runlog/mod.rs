//! Run event log: the durable, ordered audit trail of a run.

mod reader;
mod recorder;

pub use reader::{is_step_ordered, read_events};
pub use recorder::{EVENTS_FILE, FIXTURES_DIR, Recorder};
