//! Mail Store Collaborators
//!
//! The analysis pipeline never talks to a mail store directly. Hosts supply
//! these two traits: one to read the tag inventory, one to apply approved
//! merges.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::tags::{MergeOutcome, TagPair, TagRecord};

/// Read access to the tags defined in a mail store.
#[async_trait]
pub trait TagInventory: Send + Sync {
    /// All tags defined in the store. `usage_count` may be left at zero;
    /// [`TagInventory::inventory`] fills it in.
    async fn list_tags(&self) -> CoreResult<Vec<TagRecord>>;

    /// Number of messages, across every folder, carrying the tag `key`.
    async fn count_usage(&self, key: &str) -> CoreResult<u64>;

    /// Tags with their usage counts populated.
    async fn inventory(&self) -> CoreResult<Vec<TagRecord>> {
        let mut tags = self.list_tags().await?;
        for tag in &mut tags {
            tag.usage_count = self.count_usage(&tag.key).await?;
        }
        Ok(tags)
    }
}

/// Applies one merge instruction to the store.
///
/// Implementations rewrite every message carrying `source_name` so that it
/// carries `target_name` instead, creating the target tag when it does not
/// exist yet.
#[async_trait]
pub trait MergeExecutor: Send + Sync {
    async fn merge(&self, pair: &TagPair) -> CoreResult<MergeOutcome>;
}
