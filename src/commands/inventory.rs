//! Inventory Commands
//!
//! Tag statistics and unused-tag listing.

use serde::{Deserialize, Serialize};

use tagmend_core::{TagInventory, TagRecord};

use crate::services::inventory::{cleanup_candidates, unused_tags, usage_summary, UsageSummary};
use crate::utils::error::AppResult;

/// All tags with usage counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub summary: UsageSummary,
    pub tags: Vec<TagRecord>,
}

/// Tags that no message carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupView {
    pub keys: Vec<String>,
    pub tags: Vec<TagRecord>,
}

/// List every tag with its usage count.
pub async fn get_inventory(store: &dyn TagInventory) -> AppResult<InventoryView> {
    let tags = store.inventory().await?;
    let summary = usage_summary(&tags);
    tracing::info!(
        total = summary.total,
        used = summary.used,
        unused = summary.unused,
        "Loaded tag inventory"
    );
    Ok(InventoryView { summary, tags })
}

/// List unused tags that could be deleted.
pub async fn get_cleanup_candidates(store: &dyn TagInventory) -> AppResult<CleanupView> {
    let tags = store.inventory().await?;
    Ok(CleanupView {
        keys: cleanup_candidates(&tags),
        tags: unused_tags(&tags).into_iter().cloned().collect(),
    })
}
