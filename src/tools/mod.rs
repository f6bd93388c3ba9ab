//! Tool system for recorded runs
//!
//! Tools are registered by name into a [`ToolRegistry`] at startup and invoked
//! through the [`ToolExecutor`], which decides whether a call runs live
//! (record) or is answered from a fixture (replay).

mod builtin;
mod executor;
mod registry;

pub use builtin::{SummarizeTool, WebFetchTool, WriteDraftTool};
pub use executor::ToolExecutor;
pub use registry::ToolRegistry;

use serde_json::Value;

use crate::error::{ReplayError, Result};

/// A live tool the agent can call
pub trait Tool: Send + Sync {
    /// Run the tool. Results are expected to be a pure function of `args`.
    fn invoke(&self, args: &Value) -> Result<Value>;
}

/// Adapter that turns a closure into a [`Tool`]
pub struct FnTool<F>(pub F);

impl<F> Tool for FnTool<F>
where
    F: Fn(&Value) -> Result<Value> + Send + Sync,
{
    fn invoke(&self, args: &Value) -> Result<Value> {
        (self.0)(args)
    }
}

/// Fetch a required string argument by name
pub fn string_arg<'v>(args: &'v Value, name: &str) -> Result<&'v str> {
    args.get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| ReplayError::Tool(format!("missing string argument '{}'", name)))
}
