//! PHC directory implementations.
//!
//! The directory file is plain TOML:
//!
//! ```toml
//! [[phc]]
//! name = "Central PHC Ikeja"
//! location = "Ikeja, Lagos"
//! phone = "+234-801-234-5678"
//! status = "open"
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use ilerai_core::error::{IleraiError, Result};
use ilerai_core::phc::{PhcDirectory, PhcEntry};

use crate::storage::AtomicTomlFile;

/// On-disk layout of the directory file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhcDirectoryFile {
    #[serde(default, rename = "phc")]
    pub phcs: Vec<PhcEntry>,
}

/// The facilities a fresh install starts with.
pub fn seed_phcs() -> Vec<PhcEntry> {
    vec![
        PhcEntry {
            name: "Central PHC Ikeja".to_string(),
            location: "Ikeja, Lagos".to_string(),
            phone: "+234-801-234-5678".to_string(),
            status: "open".to_string(),
        },
        PhcEntry {
            name: "Community Health Center".to_string(),
            location: "Victoria Island, Lagos".to_string(),
            phone: "+234-802-345-6789".to_string(),
            status: "open".to_string(),
        },
        PhcEntry {
            name: "Primary Care Clinic".to_string(),
            location: "Surulere, Lagos".to_string(),
            phone: "+234-803-456-7890".to_string(),
            status: "closed".to_string(),
        },
    ]
}

/// Directory backed by a TOML file that is re-read on every lookup, so
/// edits by facility staff show up without a restart.
pub struct TomlPhcDirectory {
    path: PathBuf,
}

impl TomlPhcDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the seed facilities if the file is missing or empty. Returns
    /// the number of entries now in the file.
    pub fn ensure_seeded(&self) -> Result<usize> {
        let file = AtomicTomlFile::<PhcDirectoryFile>::new(self.path.clone());
        let contents = file.load_or_init(PhcDirectoryFile { phcs: seed_phcs() })?;
        Ok(contents.phcs.len())
    }
}

#[async_trait]
impl PhcDirectory for TomlPhcDirectory {
    async fn list_top(&self, limit: usize) -> Result<Vec<PhcEntry>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(IleraiError::data_access(format!(
                    "Failed to read PHC directory '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let directory: PhcDirectoryFile = toml::from_str(&content)?;
        Ok(directory.phcs.into_iter().take(limit).collect())
    }
}

/// Fixed directory held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPhcDirectory {
    entries: Vec<PhcEntry>,
}

impl InMemoryPhcDirectory {
    pub fn new(entries: Vec<PhcEntry>) -> Self {
        Self { entries }
    }

    pub fn seeded() -> Self {
        Self::new(seed_phcs())
    }
}

#[async_trait]
impl PhcDirectory for InMemoryPhcDirectory {
    async fn list_top(&self, limit: usize) -> Result<Vec<PhcEntry>> {
        Ok(self.entries.iter().take(limit).cloned().collect())
    }
}
