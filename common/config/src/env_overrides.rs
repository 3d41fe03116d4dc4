//! Environment overrides layered on top of the file-loaded config.

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::error::config_error::InvalidValueSnafu;
use crate::settings::RuntimeConfig;

const MAX_TURNS: &str = "COCODE_MAX_TURNS";
const MAX_CONCURRENT_TOOLS: &str = "COCODE_MAX_CONCURRENT_TOOLS";
const RETRY_MAX_RETRIES: &str = "COCODE_RETRY_MAX_RETRIES";
const RETRY_BASE_DELAY_MS: &str = "COCODE_RETRY_BASE_DELAY_MS";
const COMPACT_RESERVE_TOKENS: &str = "COCODE_COMPACT_RESERVE_TOKENS";
const COMPACT_KEEP_RECENT_TOKENS: &str = "COCODE_COMPACT_KEEP_RECENT_TOKENS";
const COMPACT_ENABLED: &str = "COCODE_COMPACT_ENABLED";

/// Apply the closed set of `COCODE_*` overrides on top of `config`, reading
/// from the real process environment.
pub fn apply_from_env(config: RuntimeConfig) -> Result<RuntimeConfig, ConfigError> {
    apply(config, |name| env::var(name).ok())
}

/// Same as [`apply_from_env`] but sourced from an arbitrary lookup function,
/// so tests don't need to mutate the real process environment.
pub fn apply(
    mut config: RuntimeConfig,
    get: impl Fn(&str) -> Option<String>,
) -> Result<RuntimeConfig, ConfigError> {
    if let Some(v) = get(MAX_TURNS) {
        config.r#loop.max_turns = Some(parse(MAX_TURNS, &v)?);
    }
    if let Some(v) = get(MAX_CONCURRENT_TOOLS) {
        config.r#loop.max_concurrent_tools = parse(MAX_CONCURRENT_TOOLS, &v)?;
    }
    if let Some(v) = get(RETRY_MAX_RETRIES) {
        config.r#loop.retry.max_retries = parse(RETRY_MAX_RETRIES, &v)?;
    }
    if let Some(v) = get(RETRY_BASE_DELAY_MS) {
        config.r#loop.retry.base_delay_ms = parse(RETRY_BASE_DELAY_MS, &v)?;
    }
    if let Some(v) = get(COMPACT_RESERVE_TOKENS) {
        config.compact.reserve_tokens = parse(COMPACT_RESERVE_TOKENS, &v)?;
    }
    if let Some(v) = get(COMPACT_KEEP_RECENT_TOKENS) {
        config.compact.keep_recent_tokens = parse(COMPACT_KEEP_RECENT_TOKENS, &v)?;
    }
    if let Some(v) = get(COMPACT_ENABLED) {
        config.compact.enabled = parse(COMPACT_ENABLED, &v)?;
    }
    Ok(config)
}

fn parse<T: FromStr>(field: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| {
        InvalidValueSnafu {
            field: field.to_string(),
            message: e.to_string(),
        }
        .build()
    })
}

#[cfg(test)]
#[path = "env_overrides.test.rs"]
mod tests;
