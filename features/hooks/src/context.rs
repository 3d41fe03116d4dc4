//! Ambient session data available to every hook handler, independent of
//! which `HookEvent` triggered it.

use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct HookContext {
    pub session_id: String,
    pub working_dir: PathBuf,
    pub metadata: HashMap<String, String>,
}

impl HookContext {
    pub fn new(session_id: impl Into<String>, working_dir: PathBuf) -> Self {
        Self { session_id: session_id.into(), working_dir, metadata: HashMap::new() }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

#[cfg(test)]
#[path = "context.test.rs"]
mod tests;
