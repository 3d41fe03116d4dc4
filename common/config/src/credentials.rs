//! Pass-through API key resolution. This is the only place in the workspace
//! allowed to read provider credential environment variables.

use std::env;

use crate::error::ConfigError;
use crate::error::config_error::MissingCredentialSnafu;
use snafu::ensure;

/// The closed set of providers the core resolves credentials for. Anything
/// outside this list is a host/plugin concern, not the runtime's.
const KNOWN_PROVIDERS: &[(&str, &str)] = &[
    ("anthropic", "ANTHROPIC_API_KEY"),
    ("openai", "OPENAI_API_KEY"),
];

/// Resolve the API key for `provider` from its dedicated environment
/// variable. Never falls back to a different provider's variable and never
/// reads anything outside [`KNOWN_PROVIDERS`].
pub fn resolve_api_key(provider: &str) -> Result<String, ConfigError> {
    let env_var = env_var_for(provider).ok_or_else(|| {
        MissingCredentialSnafu {
            provider: provider.to_string(),
            env_var: "<unknown provider>".to_string(),
        }
        .build()
    })?;

    let value = env::var(env_var).unwrap_or_default();
    ensure!(
        !value.is_empty(),
        MissingCredentialSnafu {
            provider: provider.to_string(),
            env_var: env_var.to_string(),
        }
    );
    Ok(value)
}

fn env_var_for(provider: &str) -> Option<&'static str> {
    KNOWN_PROVIDERS
        .iter()
        .find(|(name, _)| *name == provider)
        .map(|(_, var)| *var)
}

#[cfg(test)]
#[path = "credentials.test.rs"]
mod tests;
