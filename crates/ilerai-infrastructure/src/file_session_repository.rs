//! File-backed USSD session repository.
//!
//! Stores each session as a versioned JSON document. Uses version-migrate for
//! automatic schema migration on load.
//!
//! Directory structure:
//! ```text
//! sessions_dir/
//! ├── 6f1c...e2.json   # uuid-v5 of the gateway session id
//! └── 9a0b...41.json
//! ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;
use version_migrate::Migrator;

use ilerai_core::error::{IleraiError, Result};
use ilerai_core::ussd::{MenuState, UserData, UssdSession, UssdSessionRepository};

use crate::dto::create_ussd_session_migrator;
use crate::paths::IleraiPaths;

const ENTITY_NAME: &str = "ussd_session";

/// File-based session repository with version migration support.
///
/// Gateway session ids are opaque and may contain characters that are not
/// safe in file names, so files are named by a deterministic uuid-v5 of the
/// id; the id itself is stored inside the document.
pub struct FileUssdSessionRepository {
    sessions_dir: PathBuf,
    migrator: Migrator,
}

impl FileUssdSessionRepository {
    /// Creates a repository at the default data location.
    pub async fn default_location() -> Result<Self> {
        let sessions_dir = IleraiPaths::new(None)
            .sessions_dir()
            .map_err(|e| IleraiError::config(e.to_string()))?;
        Self::new(sessions_dir).await
    }

    /// Creates a repository rooted at `sessions_dir`, creating the directory
    /// if needed.
    pub async fn new(sessions_dir: impl AsRef<Path>) -> Result<Self> {
        let sessions_dir = sessions_dir.as_ref().to_path_buf();

        fs::create_dir_all(&sessions_dir).await.map_err(|e| {
            IleraiError::io(format!(
                "Failed to create sessions directory '{}': {}",
                sessions_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            sessions_dir,
            migrator: create_ussd_session_migrator(),
        })
    }

    pub fn sessions_dir(&self) -> &Path {
        &self.sessions_dir
    }

    fn file_path(&self, session_id: &str) -> PathBuf {
        let file_id = Uuid::new_v5(&Uuid::NAMESPACE_OID, session_id.as_bytes());
        self.sessions_dir.join(format!("{}.json", file_id))
    }

    async fn read_file(&self, path: &Path) -> Result<Option<UssdSession>> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(IleraiError::io(format!(
                    "Failed to read session file '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        let json_value: serde_json::Value = serde_json::from_str(&content)?;

        let session: UssdSession = self
            .migrator
            .load_flat_from(ENTITY_NAME, json_value)
            .map_err(|e| {
                IleraiError::migration(format!(
                    "Failed to migrate session '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        Ok(Some(session))
    }

    async fn write_file(&self, session: &UssdSession) -> Result<()> {
        let path = self.file_path(&session.session_id);

        // Serialize using migrator (includes version info)
        let serialized = self
            .migrator
            .save_domain_flat(ENTITY_NAME, session.clone())
            .map_err(|e| IleraiError::migration(format!("Failed to serialize session: {}", e)))?;

        // Unique temp name so concurrent turns for one session never share it
        let tmp_path = self
            .sessions_dir
            .join(format!(".{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, serialized)
            .await
            .map_err(|e| IleraiError::io(format!("Failed to write session: {}", e)))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| IleraiError::io(format!("Failed to replace session file: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl UssdSessionRepository for FileUssdSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<UssdSession>> {
        self.read_file(&self.file_path(session_id)).await
    }

    async fn create(&self, session: &UssdSession) -> Result<()> {
        self.write_file(session).await
    }

    async fn update(
        &self,
        session_id: &str,
        current_menu: &MenuState,
        user_data: &UserData,
    ) -> Result<()> {
        let mut session = self
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| IleraiError::not_found("UssdSession", session_id))?;

        session.current_menu = current_menu.clone();
        session.user_data = user_data.clone();
        session.updated_at = chrono::Utc::now().to_rfc3339();

        self.write_file(&session).await
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        match fs::remove_file(self.file_path(session_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(IleraiError::io(format!("Failed to delete session: {}", e))),
        }
    }

    async fn list_all(&self) -> Result<Vec<UssdSession>> {
        let mut entries = fs::read_dir(&self.sessions_dir).await?;
        let mut sessions = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_session_file = path.extension().is_some_and(|ext| ext == "json")
                && !entry.file_name().to_string_lossy().starts_with('.');
            if !is_session_file {
                continue;
            }

            match self.read_file(&path).await {
                Ok(Some(session)) => sessions.push(session),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Skipping unreadable session file {}: {}", path.display(), e);
                    // Continue loading other sessions
                }
            }
        }

        // Sort by updated_at descending (most recent first)
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn repository(temp_dir: &TempDir) -> FileUssdSessionRepository {
        FileUssdSessionRepository::new(temp_dir.path().join("sessions"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repository(&temp_dir).await;

        let session = UssdSession::new("ATUid_1", "+2348012345678");
        repository.create(&session).await.unwrap();

        let loaded = repository.find_by_id("ATUid_1").await.unwrap();
        assert_eq!(loaded, Some(session));
    }

    #[tokio::test]
    async fn test_find_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repository(&temp_dir).await;

        assert!(repository.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_changes_menu_and_user_data() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repository(&temp_dir).await;

        let session = UssdSession::new("ATUid_2", "+2348012345678");
        repository.create(&session).await.unwrap();

        let mut user_data = UserData::new();
        user_data.insert("language".to_string(), serde_json::json!("ha"));
        repository
            .update("ATUid_2", &MenuState::Drugs, &user_data)
            .await
            .unwrap();

        let loaded = repository.find_by_id("ATUid_2").await.unwrap().unwrap();
        assert_eq!(loaded.current_menu, MenuState::Drugs);
        assert_eq!(loaded.user_data, user_data);
        assert_eq!(loaded.phone_number, "+2348012345678");
        assert_eq!(loaded.created_at, session.created_at);
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repository(&temp_dir).await;
        repository
            .create(&UssdSession::new("ATUid_3", "+2348012345678"))
            .await
            .unwrap();

        let user_data = UserData::new();
        repository
            .update("ATUid_3", &MenuState::Services, &user_data)
            .await
            .unwrap();
        let first = repository.find_by_id("ATUid_3").await.unwrap().unwrap();
        repository
            .update("ATUid_3", &MenuState::Services, &user_data)
            .await
            .unwrap();
        let second = repository.find_by_id("ATUid_3").await.unwrap().unwrap();

        assert_eq!(first.current_menu, second.current_menu);
        assert_eq!(first.user_data, second.user_data);
        assert_eq!(repository.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repository(&temp_dir).await;

        let err = repository
            .update("ghost", &MenuState::Main, &UserData::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_session_ids_with_path_characters() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repository(&temp_dir).await;

        let session = UssdSession::new("../../etc/passwd", "+2348012345678");
        repository.create(&session).await.unwrap();

        let loaded = repository.find_by_id("../../etc/passwd").await.unwrap();
        assert_eq!(loaded.map(|s| s.session_id), Some(session.session_id));
        assert_eq!(
            std::fs::read_dir(repository.sessions_dir()).unwrap().count(),
            1
        );
    }

    #[tokio::test]
    async fn test_list_all_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repository(&temp_dir).await;

        for id in ["s-1", "s-2", "s-3"] {
            repository
                .create(&UssdSession::new(id, "+2348012345678"))
                .await
                .unwrap();
        }
        assert_eq!(repository.list_all().await.unwrap().len(), 3);

        repository.delete("s-2").await.unwrap();
        repository.delete("s-2").await.unwrap();

        let remaining: Vec<String> = repository
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.session_id)
            .collect();
        assert_eq!(remaining.len(), 2);
        assert!(!remaining.contains(&"s-2".to_string()));
    }

    #[tokio::test]
    async fn test_loads_legacy_document() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repository(&temp_dir).await;

        let legacy = serde_json::json!({
            "version": "1.0.0",
            "session_id": "ATUid_old",
            "phone_number": "+2348012345678",
            "current_menu": "nearby_phcs",
            "user_data": "{}",
            "created_at": "2025-01-01T00:00:00Z"
        });
        std::fs::write(
            repository.file_path("ATUid_old"),
            serde_json::to_string(&legacy).unwrap(),
        )
        .unwrap();

        let loaded = repository.find_by_id("ATUid_old").await.unwrap().unwrap();
        assert_eq!(
            loaded.current_menu,
            MenuState::Unknown("nearby_phcs".to_string())
        );
        assert!(loaded.user_data.is_empty());
    }
}
