//! In-memory USSD session repository.
//!
//! Backs the `memory` storage backend and the simulator. Nothing survives a
//! restart.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use ilerai_core::error::{IleraiError, Result};
use ilerai_core::ussd::{MenuState, UserData, UssdSession, UssdSessionRepository};

#[derive(Default)]
pub struct InMemoryUssdSessionRepository {
    sessions: RwLock<HashMap<String, UssdSession>>,
}

impl InMemoryUssdSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl UssdSessionRepository for InMemoryUssdSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<UssdSession>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn create(&self, session: &UssdSession) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn update(
        &self,
        session_id: &str,
        current_menu: &MenuState,
        user_data: &UserData,
    ) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| IleraiError::not_found("UssdSession", session_id))?;

        session.current_menu = current_menu.clone();
        session.user_data = user_data.clone();
        session.updated_at = chrono::Utc::now().to_rfc3339();
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<UssdSession>> {
        let mut sessions: Vec<UssdSession> =
            self.sessions.read().await.values().cloned().collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }
}
