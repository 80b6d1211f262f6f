//! Composition root.
//!
//! Resolves configuration and paths, picks the storage backend and wires
//! the engine. Precedence for every setting is CLI flag, then
//! `config.toml`, then built-in default.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use ilerai_application::UssdEngine;
use ilerai_core::config::{RootConfig, StorageBackend};
use ilerai_core::phc::PhcDirectory;
use ilerai_core::ussd::UssdSessionRepository;
use ilerai_infrastructure::{
    ConfigService, FileUssdSessionRepository, IleraiPaths, InMemoryPhcDirectory,
    InMemoryUssdSessionRepository, TomlPhcDirectory,
};

/// Settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub bind_addr: Option<String>,
}

/// Everything a command needs after startup.
pub struct Runtime {
    pub config: RootConfig,
    pub paths: IleraiPaths,
    pub engine: Arc<UssdEngine>,
}

impl Runtime {
    pub async fn build(overrides: Overrides) -> Result<Self> {
        let (config, paths) = load_config(&overrides)?;
        let engine = build_engine(&config, &paths).await?;
        Ok(Self {
            config,
            paths,
            engine: Arc::new(engine),
        })
    }
}

/// Loads `config.toml` and applies the CLI overrides.
pub fn load_config(overrides: &Overrides) -> Result<(RootConfig, IleraiPaths)> {
    let lookup_paths = IleraiPaths::new(overrides.data_dir.clone());
    let config_service = ConfigService::new(overrides.config_file.clone(), &lookup_paths)?;
    let mut config = config_service.load()?;

    if let Some(bind_addr) = &overrides.bind_addr {
        config.server.bind_addr = bind_addr.clone();
    }
    if let Some(data_dir) = &overrides.data_dir {
        config.storage.data_dir = Some(data_dir.clone());
    }

    let paths = IleraiPaths::new(config.storage.data_dir.clone());
    Ok((config, paths))
}

pub async fn build_engine(config: &RootConfig, paths: &IleraiPaths) -> Result<UssdEngine> {
    let sessions: Arc<dyn UssdSessionRepository> = match config.storage.backend {
        StorageBackend::File => {
            let sessions_dir = paths.sessions_dir()?;
            let repository = FileUssdSessionRepository::new(&sessions_dir)
                .await
                .with_context(|| {
                    format!("failed to open session store {}", sessions_dir.display())
                })?;
            Arc::new(repository)
        }
        StorageBackend::Memory => Arc::new(InMemoryUssdSessionRepository::new()),
    };

    let directory_file = match (&config.storage.phc_directory_file, config.storage.backend) {
        (Some(path), _) => Some(path.clone()),
        (None, StorageBackend::File) => Some(paths.phc_directory_file()?),
        (None, StorageBackend::Memory) => None,
    };

    let directory: Arc<dyn PhcDirectory> = match directory_file {
        Some(path) => {
            let directory = TomlPhcDirectory::new(path);
            let count = directory.ensure_seeded().with_context(|| {
                format!("failed to prepare PHC directory {}", directory.path().display())
            })?;
            tracing::info!(
                "PHC directory {} lists {} facilities",
                directory.path().display(),
                count
            );
            Arc::new(directory)
        }
        None => Arc::new(InMemoryPhcDirectory::seeded()),
    };

    tracing::info!(
        backend = ?config.storage.backend,
        service_code = %config.ussd.service_code,
        "USSD engine ready"
    );

    Ok(UssdEngine::new(sessions, directory, config.ussd.clone()))
}
