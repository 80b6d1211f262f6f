//! USSD session domain model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::state::MenuState;

/// Free-form answers accumulated by multi-step flows.
pub type UserData = BTreeMap<String, serde_json::Value>;

/// One gateway dialog, keyed by the gateway's session id.
///
/// This is the "pure" domain model; the on-disk layout lives in the
/// infrastructure DTOs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UssdSession {
    /// Opaque id supplied by the gateway
    pub session_id: String,
    /// Subscriber who dialed in; fixed at creation
    pub phone_number: String,
    pub current_menu: MenuState,
    #[serde(default)]
    pub user_data: UserData,
    /// Timestamp when the session was created (RFC 3339)
    pub created_at: String,
    /// Timestamp of the last persisted turn (RFC 3339)
    pub updated_at: String,
}

impl UssdSession {
    /// A session parked on the main menu with no answers.
    pub fn new(session_id: impl Into<String>, phone_number: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            session_id: session_id.into(),
            phone_number: phone_number.into(),
            current_menu: MenuState::Main,
            user_data: UserData::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Parses `updated_at`; `None` when the stored value is malformed.
    pub fn last_activity(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::parse_from_rfc3339(&self.updated_at)
            .ok()
            .map(|ts| ts.with_timezone(&chrono::Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = UssdSession::new("ATUid_1", "+2348012345678");
        assert_eq!(session.current_menu, MenuState::Main);
        assert!(session.user_data.is_empty());
        assert_eq!(session.created_at, session.updated_at);
        assert!(session.last_activity().is_some());
    }

    #[test]
    fn test_last_activity_malformed() {
        let mut session = UssdSession::new("ATUid_2", "+2348012345678");
        session.updated_at = "yesterday".to_string();
        assert!(session.last_activity().is_none());
    }
}
