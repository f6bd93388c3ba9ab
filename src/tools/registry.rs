//! Name-keyed registry of live tools.

use std::collections::HashMap;

use serde_json::Value;

use super::{FnTool, SummarizeTool, Tool, WebFetchTool, WriteDraftTool};
use crate::error::Result;

/// Maps tool names to implementations. Built once at startup, then passed by reference.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Create a registry holding the built-in research tools
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::new();
        registry.register("web_fetch", Box::new(WebFetchTool));
        registry.register("summarize", Box::new(SummarizeTool));
        registry.register("write_draft", Box::new(WriteDraftTool));
        registry
    }

    /// Register a tool, replacing any previous tool with the same name
    pub fn register(&mut self, name: impl Into<String>, tool: Box<dyn Tool>) {
        let name = name.into();
        if self.tools.insert(name.clone(), tool).is_some() {
            log::debug!("Replaced registered tool {}", name);
        }
    }

    /// Register a closure as a tool
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.register(name, Box::new(FnTool(f)));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
