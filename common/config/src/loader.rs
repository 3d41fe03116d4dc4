//! Layered config resolution: environment > TOML file > built-in defaults.

use std::path::Path;
use std::path::PathBuf;

use snafu::ResultExt;

use crate::env_overrides;
use crate::error::ConfigError;
use crate::error::config_error::ParseSnafu;
use crate::error::config_error::ReadSnafu;
use crate::settings::RuntimeConfig;

/// Loads [`RuntimeConfig`] from an optional TOML file, with `COCODE_*`
/// environment variables applied last so they always win.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    /// Resolve the default config file location: `$COCODE_CONFIG_DIR/config.toml`,
    /// falling back to `~/.config/cocode/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var("COCODE_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.toml"));
        }
        dirs::home_dir().map(|home| home.join(".config").join("cocode").join("config.toml"))
    }

    pub fn load(&self) -> Result<RuntimeConfig, ConfigError> {
        let file_config = match &self.config_path {
            Some(path) => load_file(path)?,
            None => RuntimeConfig::default(),
        };
        env_overrides::apply_from_env(file_config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

fn load_file(path: &Path) -> Result<RuntimeConfig, ConfigError> {
    if !path.exists() {
        return Ok(RuntimeConfig::default());
    }
    let raw = std::fs::read_to_string(path).context(ReadSnafu { path })?;
    toml::from_str(&raw).context(ParseSnafu { path })
}

#[cfg(test)]
#[path = "loader.test.rs"]
mod tests;
