//! Unified path management for IlerAI configuration and data files.
//!
//! Platform directories are resolved via `AppPaths` from the version-migrate
//! crate. A base override (from `--data-dir` or `[storage].data_dir`) puts
//! everything under a single directory instead.

use std::path::PathBuf;
use version_migrate::AppPaths;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolver for the service.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/ilerai/            # Config directory
/// └── config.toml              # Service configuration
///
/// ~/.local/share/ilerai/       # Data directory
/// ├── sessions/                # One JSON document per USSD session
/// ├── phcs.toml                # PHC directory
/// └── logs/                    # Rolling log files
///     └── ilerai.log.YYYY-MM-DD
/// ```
#[derive(Debug, Clone, Default)]
pub struct IleraiPaths {
    base_override: Option<PathBuf>,
}

impl IleraiPaths {
    pub fn new(base_override: Option<PathBuf>) -> Self {
        Self { base_override }
    }

    fn app_paths() -> AppPaths {
        AppPaths::new("ilerai")
    }

    /// Returns the configuration directory (e.g., `~/.config/ilerai/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_override {
            return Ok(base.clone());
        }
        Self::app_paths()
            .config_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g., `~/.local/share/ilerai/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_override {
            return Ok(base.clone());
        }
        Self::app_paths()
            .data_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn sessions_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("sessions"))
    }

    pub fn phc_directory_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("phcs.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_puts_everything_under_base() {
        let base = PathBuf::from("/srv/ilerai");
        let paths = IleraiPaths::new(Some(base.clone()));

        assert_eq!(paths.config_file().unwrap(), base.join("config.toml"));
        assert_eq!(paths.sessions_dir().unwrap(), base.join("sessions"));
        assert_eq!(paths.phc_directory_file().unwrap(), base.join("phcs.toml"));
        assert_eq!(paths.logs_dir().unwrap(), base.join("logs"));
    }

    #[test]
    fn test_sessions_dir_is_under_data_dir() {
        let paths = IleraiPaths::new(Some(PathBuf::from("/tmp/ilerai-test")));
        let sessions_dir = paths.sessions_dir().unwrap();
        assert!(sessions_dir.ends_with("sessions"));
        assert!(sessions_dir.starts_with(paths.data_dir().unwrap()));
    }
}
