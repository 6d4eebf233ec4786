//! Tag Inventory Statistics
//!
//! Usage figures logged before every analysis and the list of unused tags
//! offered for cleanup.

use serde::{Deserialize, Serialize};

use tagmend_core::TagRecord;

/// Used/unused tag counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub total: usize,
    pub used: usize,
    pub unused: usize,
}

pub fn usage_summary(tags: &[TagRecord]) -> UsageSummary {
    let unused = tags.iter().filter(|tag| tag.is_unused()).count();
    UsageSummary {
        total: tags.len(),
        used: tags.len() - unused,
        unused,
    }
}

/// Tags no message carries, in inventory order.
pub fn unused_tags(tags: &[TagRecord]) -> Vec<&TagRecord> {
    tags.iter().filter(|tag| tag.is_unused()).collect()
}

/// Keys of the tags that can be deleted without touching any message.
pub fn cleanup_candidates(tags: &[TagRecord]) -> Vec<String> {
    unused_tags(tags)
        .into_iter()
        .map(|tag| tag.key.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> Vec<TagRecord> {
        vec![
            TagRecord::new("$label1", "Important", 40),
            TagRecord::new("old", "Old stuff", 0),
            TagRecord::new("invoice", "Invoice", 3),
            TagRecord::new("tmp", "tmp", 0),
        ]
    }

    #[test]
    fn test_usage_summary() {
        let summary = usage_summary(&inventory());
        assert_eq!(
            summary,
            UsageSummary {
                total: 4,
                used: 2,
                unused: 2
            }
        );
    }

    #[test]
    fn test_cleanup_candidates() {
        assert_eq!(cleanup_candidates(&inventory()), vec!["old", "tmp"]);
        assert!(cleanup_candidates(&[]).is_empty());
    }
}
