//! PHC directory trait.

use async_trait::async_trait;

use super::model::PhcEntry;
use crate::error::Result;

/// Read-only access to the facility list.
#[async_trait]
pub trait PhcDirectory: Send + Sync {
    /// Returns at most `limit` facilities in directory order.
    async fn list_top(&self, limit: usize) -> Result<Vec<PhcEntry>>;
}
