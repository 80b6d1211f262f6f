use serde::{Deserialize, Serialize};

/// A facility as listed to USSD callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhcEntry {
    pub name: String,
    pub location: String,
    pub phone: String,
    /// Operational status as reported by facility staff (e.g. "open").
    pub status: String,
}
