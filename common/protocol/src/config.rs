//! Loop and compaction configuration types.
//!
//! These are pure value types; loading them from TOML/env lives in
//! `cocode-config` so this crate stays a dependency-free wire-types crate.

use serde::Deserialize;
use serde::Serialize;

/// When a steering message arrives mid-batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptMode {
    /// Stop processing remaining tool calls in the batch immediately.
    Immediate,
    /// Let the current batch finish, then drain steering.
    Wait,
}

impl Default for InterruptMode {
    fn default() -> Self {
        Self::Wait
    }
}

/// How queued steering/follow-up messages are drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrainMode {
    /// Dequeue one message, inject it, start a new turn.
    OneAtATime,
    /// Drain everything queued, inject as one message, start one new turn.
    All,
}

impl Default for DrainMode {
    fn default() -> Self {
        Self::OneAtATime
    }
}

/// Retry policy for transient provider errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_retries: i32,
    /// Linear backoff: `attempt * base_delay_ms`.
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
        }
    }
}

/// Top-level configuration for the agent loop's scheduler behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoopConfig {
    pub max_turns: Option<i32>,
    pub interrupt_mode: InterruptMode,
    pub steering_mode: DrainMode,
    pub follow_up_mode: DrainMode,
    pub retry: RetryConfig,
    /// Concurrency ceiling for tool batch dispatch.
    pub max_concurrent_tools: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_turns: None,
            interrupt_mode: InterruptMode::default(),
            steering_mode: DrainMode::default(),
            follow_up_mode: DrainMode::default(),
            retry: RetryConfig::default(),
            max_concurrent_tools: 4,
        }
    }
}

/// Compaction thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompactConfig {
    /// Fraction of `context_window` reserved for the response + summary
    ///.
    pub reserve_tokens: i64,
    /// Minimum number of recent tokens the compactor must keep verbatim
    /// before it is allowed to choose a cut point.
    pub keep_recent_tokens: i64,
    /// Estimated tokens per embedded image.
    pub image_token_estimate: i64,
    /// `max_tokens` sent to the summarization call, as a fraction of
    /// `reserve_tokens`.
    pub summary_max_tokens_ratio: f64,
    pub enabled: bool,
}

impl Default for CompactConfig {
    fn default() -> Self {
        Self {
            reserve_tokens: 20_000,
            keep_recent_tokens: 8_000,
            image_token_estimate: 1_200,
            summary_max_tokens_ratio: 0.8,
            enabled: true,
        }
    }
}

impl CompactConfig {
    pub fn summary_max_tokens(&self) -> i64 {
        (self.reserve_tokens as f64 * self.summary_max_tokens_ratio) as i64
    }

    pub fn trigger_threshold(&self, context_window: i64) -> i64 {
        context_window - self.reserve_tokens
    }

    pub fn should_trigger(&self, total_tokens: i64, context_window: i64) -> bool {
        self.enabled && total_tokens > self.trigger_threshold(context_window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_config_triggers_above_threshold() {
        let config = CompactConfig::default();
        let window = 100_000;
        assert!(!config.should_trigger(config.trigger_threshold(window), window));
        assert!(config.should_trigger(config.trigger_threshold(window) + 1, window));
    }

    #[test]
    fn disabled_compaction_never_triggers() {
        let config = CompactConfig {
            enabled: false,
            ..CompactConfig::default()
        };
        assert!(!config.should_trigger(1_000_000, 1_000));
    }

    #[test]
    fn summary_max_tokens_is_fraction_of_reserve() {
        let config = CompactConfig::default();
        assert_eq!(config.summary_max_tokens(), 16_000);
    }
}
