//! Atomic TOML file operations.
//!
//! Used for the small, rarely written files: `config.toml` and the PHC
//! directory seed.

use ilerai_core::error::{IleraiError, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A handle to a TOML file that is replaced atomically on save.
///
/// - **Atomicity**: writes go to a sibling tmp file, then rename over the target
/// - **Durability**: explicit fsync before rename
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the TOML file and deserializes it.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Saves data to the TOML file atomically.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = temp_path_for(&self.path)?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Loads the file, writing `default_value` first if it is missing or empty.
    pub fn load_or_init(&self, default_value: T) -> Result<T> {
        match self.load()? {
            Some(data) => Ok(data),
            None => {
                self.save(&default_value)?;
                Ok(default_value)
            }
        }
    }
}

/// Sibling path `.<name>.tmp` used for the write-then-rename step.
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let parent = path
        .parent()
        .ok_or_else(|| IleraiError::io(format!("Path has no parent directory: {}", path.display())))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| IleraiError::io(format!("Path has no file name: {}", path.display())))?;

    let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
    Ok(parent.join(tmp_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.toml");
        let atomic_file = AtomicTomlFile::<TestConfig>::new(file_path);

        let config = TestConfig {
            name: "test".to_string(),
            count: 42,
        };

        atomic_file.save(&config).unwrap();

        let loaded = atomic_file.load().unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let atomic_file =
            AtomicTomlFile::<TestConfig>::new(temp_dir.path().join("nonexistent.toml"));

        assert!(atomic_file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_or_init_writes_default_once() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested").join("init.toml");
        let atomic_file = AtomicTomlFile::<TestConfig>::new(file_path.clone());

        let default_config = TestConfig {
            name: "default".to_string(),
            count: 1,
        };
        let first = atomic_file.load_or_init(default_config.clone()).unwrap();
        assert_eq!(first, default_config);
        assert!(file_path.exists());

        let other = TestConfig {
            name: "ignored".to_string(),
            count: 99,
        };
        let second = atomic_file.load_or_init(other).unwrap();
        assert_eq!(second, default_config);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.toml");
        let atomic_file = AtomicTomlFile::<TestConfig>::new(file_path.clone());

        atomic_file
            .save(&TestConfig {
                name: "test".to_string(),
                count: 42,
            })
            .unwrap();

        assert!(!temp_dir.path().join(".test.toml.tmp").exists());
        assert!(file_path.exists());
    }

    #[test]
    fn test_parse_error_is_serialization() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("broken.toml");
        std::fs::write(&file_path, "name = ").unwrap();

        let err = AtomicTomlFile::<TestConfig>::new(file_path).load().unwrap_err();
        assert!(err.is_serialization());
    }
}
