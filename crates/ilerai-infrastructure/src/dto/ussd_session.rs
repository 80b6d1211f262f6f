//! USSD session DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Relational-era layout; `user_data` held as a JSON-encoded string
//! - **1.1.0**: `user_data` stored as an object, added `updated_at`

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use ilerai_core::ussd::{MenuState, UserData, UssdSession};

/// USSD session DTO V1.0.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct UssdSessionV1_0_0 {
    pub session_id: String,
    pub phone_number: String,
    #[serde(default = "default_menu")]
    pub current_menu: String,
    /// JSON text, e.g. `"{}"`
    #[serde(default)]
    pub user_data: Option<String>,
    pub created_at: String,
}

/// USSD session DTO V1.1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
pub struct UssdSessionV1_1_0 {
    pub session_id: String,
    pub phone_number: String,
    #[serde(default = "default_menu")]
    pub current_menu: String,
    #[serde(default)]
    pub user_data: UserData,
    pub created_at: String,
    pub updated_at: String,
}

fn default_menu() -> String {
    MenuState::Main.as_str().to_string()
}

// ============================================================================
// Migration implementations
// ============================================================================

/// Migration from UssdSessionV1_0_0 to UssdSessionV1_1_0.
/// Decodes the `user_data` text; undecodable text becomes an empty map.
impl MigratesTo<UssdSessionV1_1_0> for UssdSessionV1_0_0 {
    fn migrate(self) -> UssdSessionV1_1_0 {
        let user_data = match self.user_data.as_deref() {
            None | Some("") => UserData::new(),
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
                tracing::warn!(
                    "Dropping undecodable user_data for session {}: {}",
                    self.session_id,
                    e
                );
                UserData::new()
            }),
        };

        UssdSessionV1_1_0 {
            session_id: self.session_id,
            phone_number: self.phone_number,
            current_menu: self.current_menu,
            user_data,
            updated_at: self.created_at.clone(), // no turn history in 1.0.0
            created_at: self.created_at,
        }
    }
}

/// Convert UssdSessionV1_1_0 DTO to domain model
impl IntoDomain<UssdSession> for UssdSessionV1_1_0 {
    fn into_domain(self) -> UssdSession {
        UssdSession {
            session_id: self.session_id,
            phone_number: self.phone_number,
            current_menu: MenuState::parse(&self.current_menu),
            user_data: self.user_data,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Convert domain model to UssdSessionV1_1_0 DTO for persistence
impl FromDomain<UssdSession> for UssdSessionV1_1_0 {
    fn from_domain(session: UssdSession) -> Self {
        UssdSessionV1_1_0 {
            session_id: session.session_id,
            phone_number: session.phone_number,
            current_menu: session.current_menu.as_str().to_string(),
            user_data: session.user_data,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for USSD session entities.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Decodes `user_data`, adds `updated_at`
/// - V1.1.0 → UssdSession: Converts DTO to domain model
pub fn create_ussd_session_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("ussd_session" => [
        UssdSessionV1_0_0,
        UssdSessionV1_1_0,
        UssdSession
    ], save = true)
    .expect("Failed to create ussd_session migrator")
}
