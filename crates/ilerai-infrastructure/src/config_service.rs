//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml`, either at an explicit
//! path or at the platform config location.

use std::path::{Path, PathBuf};

use ilerai_core::config::RootConfig;
use ilerai_core::error::{IleraiError, Result};

use crate::paths::IleraiPaths;
use crate::storage::AtomicTomlFile;

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses `path` when given, otherwise `config.toml` in the config
    /// directory resolved by `paths`.
    pub fn new(path: Option<PathBuf>, paths: &IleraiPaths) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => paths
                .config_file()
                .map_err(|e| IleraiError::config(e.to_string()))?,
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration. A missing or empty file yields the defaults.
    pub fn load(&self) -> Result<RootConfig> {
        let file = AtomicTomlFile::<RootConfig>::new(self.path.clone());
        let config = file.load().map_err(|e| {
            IleraiError::config(format!(
                "Failed to load config '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        match config {
            Some(config) => Ok(config),
            None => {
                tracing::debug!("No config at {}, using defaults", self.path.display());
                Ok(RootConfig::default())
            }
        }
    }

    /// Writes the default configuration if no file exists yet.
    pub fn init_default(&self) -> Result<RootConfig> {
        AtomicTomlFile::<RootConfig>::new(self.path.clone()).load_or_init(RootConfig::default())
    }
}
