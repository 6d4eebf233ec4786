//! Cross-group Deduplication
//!
//! A model asked to group hundreds of tags in one pass regularly puts the same
//! tag into two groups. The first group to claim a tag keeps it.

use std::collections::HashSet;

use tagmend_core::SimilarityGroup;

/// Remove tags already claimed by an earlier group.
///
/// Groups left with fewer than two members are dropped; their surviving
/// member still counts as claimed. Input order decides
/// ownership, so the result is deterministic and applying it twice changes
/// nothing.
pub fn deduplicate_groups(groups: Vec<SimilarityGroup>) -> Vec<SimilarityGroup> {
    let mut claimed: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(groups.len());

    for group in groups {
        let SimilarityGroup {
            members,
            suggested_name,
            reason,
        } = group;

        let mut kept = Vec::with_capacity(members.len());
        for name in members {
            if claimed.contains(&name) {
                tracing::warn!(tag = %name, "Removing duplicate tag already assigned to an earlier group");
                continue;
            }
            // Also drops repeats within the same group
            if !kept.contains(&name) {
                kept.push(name);
            }
        }

        claimed.extend(kept.iter().cloned());

        if kept.len() < SimilarityGroup::MIN_MEMBERS {
            tracing::warn!(
                suggested_name = %suggested_name,
                remaining = kept.len(),
                "Dropping group with too few members after deduplication"
            );
            continue;
        }

        result.push(SimilarityGroup::new(kept, suggested_name, reason));
    }

    result
}
