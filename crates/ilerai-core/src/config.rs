//! Root configuration model.
//!
//! Loaded from `config.toml` by the infrastructure `ConfigService`. Every
//! field has a default so a missing or partial file is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RootConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ussd: UssdConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Socket address the HTTP endpoint binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

/// Settings for the USSD engine and its metadata endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UssdConfig {
    /// Shortcode subscribers dial, reported by the metadata endpoint.
    #[serde(default = "default_service_code")]
    pub service_code: String,
    /// Feature list reported by the metadata endpoint.
    #[serde(default = "default_features")]
    pub features: Vec<String>,
    /// How many directory entries the nearby-PHC screen lists.
    #[serde(default = "default_nearby_limit")]
    pub nearby_limit: usize,
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
    #[serde(default = "default_directory_timeout_ms")]
    pub directory_timeout_ms: u64,
}

impl UssdConfig {
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn directory_timeout(&self) -> Duration {
        Duration::from_millis(self.directory_timeout_ms)
    }
}

impl Default for UssdConfig {
    fn default() -> Self {
        Self {
            service_code: default_service_code(),
            features: default_features(),
            nearby_limit: default_nearby_limit(),
            store_timeout_ms: default_store_timeout_ms(),
            directory_timeout_ms: default_directory_timeout_ms(),
        }
    }
}

fn default_service_code() -> String {
    "*347*22#".to_string()
}

fn default_features() -> Vec<String> {
    vec![
        "Find Nearby PHCs".to_string(),
        "Check Available Services".to_string(),
        "Drug Stock Information".to_string(),
        "Emergency Contacts".to_string(),
    ]
}

fn default_nearby_limit() -> usize {
    3
}

fn default_store_timeout_ms() -> u64 {
    2000
}

fn default_directory_timeout_ms() -> u64 {
    1500
}

/// Which session store backs the engine.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// One JSON document per session under the data directory.
    #[default]
    File,
    /// Process-local map; sessions are lost on restart.
    Memory,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// TOML file listing PHCs. Defaults to `phcs.toml` in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phc_directory_file: Option<PathBuf>,
}
