pub mod config_service;
pub mod dto;
pub mod file_session_repository;
pub mod memory_session_repository;
pub mod paths;
pub mod phc_directory;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::file_session_repository::FileUssdSessionRepository;
pub use crate::memory_session_repository::InMemoryUssdSessionRepository;
pub use crate::paths::IleraiPaths;
pub use crate::phc_directory::{InMemoryPhcDirectory, TomlPhcDirectory};
