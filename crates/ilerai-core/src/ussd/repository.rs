//! USSD session repository trait.
//!
//! Defines the interface for session persistence operations.

use async_trait::async_trait;

use super::model::{UserData, UssdSession};
use super::state::MenuState;
use crate::error::Result;

/// An abstract store for USSD sessions.
///
/// The engine loads, creates and updates one record per turn. Implementations
/// need not serialize concurrent writers: updates are last-write-wins.
#[async_trait]
pub trait UssdSessionRepository: Send + Sync {
    /// Finds a session by its gateway id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UssdSession))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: The store could not be read
    async fn find_by_id(&self, session_id: &str) -> Result<Option<UssdSession>>;

    /// Stores a new session record, replacing any record with the same id.
    async fn create(&self, session: &UssdSession) -> Result<()>;

    /// Overwrites the menu state and user data of an existing session and
    /// refreshes its `updated_at`.
    ///
    /// Returns `IleraiError::NotFound` when no record exists.
    async fn update(
        &self,
        session_id: &str,
        current_menu: &MenuState,
        user_data: &UserData,
    ) -> Result<()>;

    /// Deletes a session. Deleting a missing id is not an error.
    async fn delete(&self, session_id: &str) -> Result<()>;

    /// Lists all stored sessions, most recently updated first.
    async fn list_all(&self) -> Result<Vec<UssdSession>>;
}
