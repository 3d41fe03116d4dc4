//! Runtime-mutable configuration: load once, allow in-process overrides
//! (e.g. a control-plane `set_model`-style command), reload from disk.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ConfigError;
use crate::loader::ConfigLoader;
use crate::settings::RuntimeConfig;

pub struct ConfigManager {
    loader: ConfigLoader,
    config: RwLock<RuntimeConfig>,
}

impl ConfigManager {
    pub fn new(loader: ConfigLoader) -> Result<Self, ConfigError> {
        let config = loader.load()?;
        Ok(Self {
            loader,
            config: RwLock::new(config),
        })
    }

    /// Resolve config from the default file location.
    pub fn from_default() -> Result<Self, ConfigError> {
        Self::new(ConfigLoader::default())
    }

    pub fn from_path(path: PathBuf) -> Result<Self, ConfigError> {
        Self::new(ConfigLoader::new(Some(path)))
    }

    /// A snapshot of the current config. Cheap: `RuntimeConfig` is `Copy`.
    pub fn current(&self) -> RuntimeConfig {
        *self.config.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Re-read the config file and re-apply env overrides, replacing the
    /// in-memory snapshot. Used by the `reload_config` control-plane hook.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let fresh = self.loader.load()?;
        *self.config.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = fresh;
        Ok(())
    }

    /// Apply an in-process override (e.g. a runtime `set_max_concurrent_tools`
    /// control command) without touching the file on disk.
    pub fn update(&self, f: impl FnOnce(&mut RuntimeConfig)) {
        let mut guard = self.config.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard);
    }
}

#[cfg(test)]
#[path = "manager.test.rs"]
mod tests;
