//! Lookup table from tool name to implementation.
//!
//! MCP server tools, feature-gated tool lists, and skill-driven aliasing are
//! all out of scope here; this registry keeps only what the executor needs
//! to dispatch a batch.

use std::collections::BTreeMap;
use std::sync::Arc;

use hyper_sdk::ToolDefinition;

use crate::tool::Tool;

#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Registers `tool` under its own name and again under `alias`, so both
    /// names resolve to the same implementation.
    pub fn register_with_alias(&mut self, tool: impl Tool + 'static, alias: &str) {
        let shared: Arc<dyn Tool> = Arc::new(tool);
        self.tools.insert(shared.name().to_string(), shared.clone());
        self.tools.insert(alias.to_string(), shared);
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Sorted so output (tool lists shown to a provider, test assertions) is
    /// deterministic regardless of registration order.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn all_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|tool| tool.to_definition()).collect()
    }
}

#[cfg(test)]
#[path = "registry.test.rs"]
mod tests;
