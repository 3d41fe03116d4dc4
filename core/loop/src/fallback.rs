//! Model fallback: after repeated transient provider failures on the
//! primary model, swap to a configured fallback model instead of
//! surfacing the error to the caller.

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Ordered list of fallback models tried once the primary's retry
    /// budget is exhausted.
    #[serde(default)]
    pub fallback_models: Vec<String>,
    #[serde(default = "default_max_fallbacks")]
    pub max_fallbacks: i32,
}

fn default_max_fallbacks() -> i32 {
    3
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self { enabled: false, fallback_models: Vec::new(), max_fallbacks: default_max_fallbacks() }
    }
}

/// Tracks fallback transitions made so far during one loop's lifetime.
pub struct FallbackState {
    pub current_model: String,
    pub attempts: i32,
    pub history: Vec<FallbackAttempt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackAttempt {
    pub from_model: String,
    pub to_model: String,
    pub reason: String,
}

impl FallbackState {
    pub fn new(model: impl Into<String>) -> Self {
        Self { current_model: model.into(), attempts: 0, history: Vec::new() }
    }

    pub fn should_fallback(&self, config: &FallbackConfig) -> bool {
        config.enabled && self.attempts < config.max_fallbacks && !config.fallback_models.is_empty()
    }

    /// Models are tried in the order they appear in `config.fallback_models`.
    pub fn next_model(&self, config: &FallbackConfig) -> Option<String> {
        if !config.enabled {
            return None;
        }
        config.fallback_models.get(self.attempts as usize).cloned()
    }

    pub fn record_fallback(&mut self, to: impl Into<String>, reason: impl Into<String>) {
        let to = to.into();
        self.history.push(FallbackAttempt { from_model: self.current_model.clone(), to_model: to.clone(), reason: reason.into() });
        self.current_model = to;
        self.attempts += 1;
    }
}

#[cfg(test)]
#[path = "fallback.test.rs"]
mod tests;
