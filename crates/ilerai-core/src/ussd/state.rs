//! Menu states persisted with a USSD session.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// The screen a session is currently parked on.
///
/// Only the five named states are ever written by the engine. `Unknown`
/// exists so a record written by another server version still loads; the
/// engine treats it as `Main`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(from = "String", into = "String")]
pub enum MenuState {
    #[default]
    Main,
    Services,
    Drugs,
    ServiceDetail,
    DrugDetail,
    #[strum(default)]
    Unknown(String),
}

impl MenuState {
    /// Parses a stored identifier. Never fails: unrecognised values become
    /// `Unknown`.
    pub fn parse(raw: &str) -> Self {
        raw.parse()
            .unwrap_or_else(|_| MenuState::Unknown(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            MenuState::Main => "main",
            MenuState::Services => "services",
            MenuState::Drugs => "drugs",
            MenuState::ServiceDetail => "service_detail",
            MenuState::DrugDetail => "drug_detail",
            MenuState::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, MenuState::Unknown(_))
    }
}

impl std::fmt::Display for MenuState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for MenuState {
    fn from(value: String) -> Self {
        MenuState::parse(&value)
    }
}

impl From<MenuState> for String {
    fn from(value: MenuState) -> Self {
        value.as_str().to_string()
    }
}
