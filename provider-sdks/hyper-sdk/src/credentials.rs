//! Resolves a provider's API key each turn by delegating to the workspace's single auth-store
//! collaborator rather than reading environment variables itself.

use crate::error::HyperError;

pub fn resolve_api_key(provider: &str) -> Result<String, HyperError> {
    cocode_config::resolve_api_key(provider).map_err(HyperError::from)
}

#[cfg(test)]
#[path = "credentials.test.rs"]
mod tests;
