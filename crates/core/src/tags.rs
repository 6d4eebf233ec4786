//! Tag Types
//!
//! Value types flowing through the analysis pipeline. Field names on the wire
//! follow the JSON shape the models are asked to produce (`group`,
//! `suggested_name`, `old_name`, ...), so a parsed response and a saved report
//! share one representation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A tag as reported by the mail store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRecord {
    /// Opaque store identifier
    pub key: String,
    /// Display name, unique within the store
    pub name: String,
    /// Number of messages carrying this tag
    #[serde(default, alias = "usage")]
    pub usage_count: u64,
}

impl TagRecord {
    pub fn new(key: impl Into<String>, name: impl Into<String>, usage_count: u64) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            usage_count,
        }
    }

    /// Whether no message carries this tag.
    pub fn is_unused(&self) -> bool {
        self.usage_count == 0
    }
}

/// A set of tag names the model considers duplicates of one another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityGroup {
    #[serde(rename = "group")]
    pub members: Vec<String>,
    pub suggested_name: String,
    #[serde(default)]
    pub reason: String,
}

impl SimilarityGroup {
    /// Minimum number of distinct members for a group to be meaningful.
    pub const MIN_MEMBERS: usize = 2;

    pub fn new(
        members: Vec<String>,
        suggested_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            members,
            suggested_name: suggested_name.into(),
            reason: reason.into(),
        }
    }

    /// Number of members in the group.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Drop repeated members (first occurrence wins) and return the group only
    /// if it still has at least [`Self::MIN_MEMBERS`] members.
    pub fn normalized(self) -> Option<Self> {
        let mut seen = HashSet::new();
        let members: Vec<String> = self
            .members
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .collect();

        if members.len() < Self::MIN_MEMBERS {
            return None;
        }

        Some(Self { members, ..self })
    }
}

/// A one-to-one rename proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameSuggestion {
    pub old_name: String,
    pub new_name: String,
    #[serde(default)]
    pub reason: String,
}

/// A thematic bucket of tags. Tags may appear in several categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "category")]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// Attached to a deep-analysis result that looks cut short by the output
/// token ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageWarning {
    /// Always `token_limit`; kept on the wire for consumers that switch on it.
    pub kind: String,
    pub expected_group_count: usize,
    pub found_group_count: usize,
    pub coverage_percent: u32,
    pub total_tags: usize,
    /// Sum of group sizes after deduplication
    pub affected_tags: usize,
    pub model_identifier: String,
}

impl CoverageWarning {
    pub const TOKEN_LIMIT: &'static str = "token_limit";
}

/// Merge instruction: move every message tagged `source_name` to `target_name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagPair {
    pub source_name: String,
    pub target_name: String,
}

impl TagPair {
    pub fn new(source_name: impl Into<String>, target_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            target_name: target_name.into(),
        }
    }

    /// Whether source and target name the same tag.
    pub fn is_self_pair(&self) -> bool {
        self.source_name == self.target_name
    }
}

/// Result of applying one [`TagPair`] to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOutcome {
    pub source_name: String,
    pub target_name: String,
    pub moved_count: usize,
}
