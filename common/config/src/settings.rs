//! The on-disk/overridable settings shape.

use cocode_protocol::CompactConfig;
use cocode_protocol::LoopConfig;
use serde::Deserialize;
use serde::Serialize;

/// Everything loaded from `config.toml` plus environment overrides. Kept
/// flat (no provider/model catalogue) — provider selection and model specs
/// are a host-process concern, not the runtime's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub r#loop: LoopConfig,
    #[serde(default)]
    pub compact: CompactConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_component_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.r#loop, LoopConfig::default());
        assert_eq!(config.compact, CompactConfig::default());
    }

    #[test]
    fn empty_toml_table_deserializes_to_defaults() {
        let config: RuntimeConfig = toml::from_str("").unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: RuntimeConfig = toml::from_str(
            r#"
            [loop]
            max_concurrent_tools = 8

            [compact]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.r#loop.max_concurrent_tools, 8);
        assert!(!config.compact.enabled);
        assert_eq!(config.r#loop.retry, cocode_protocol::RetryConfig::default());
    }
}
