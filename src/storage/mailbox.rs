//! Mailbox Snapshot Store
//!
//! An in-memory mail store loaded from a JSON snapshot:
//!
//! ```json
//! {
//!   "tags": [{"key": "$label1", "name": "Important"}],
//!   "messages": [{"id": "m1", "folder": "INBOX", "tags": ["$label1"]}]
//! }
//! ```
//!
//! It serves the tag inventory and applies merges by rewriting message tag
//! lists, so the whole analyze-then-merge flow can run without a mail client.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use tagmend_core::{
    CoreError, CoreResult, MergeExecutor, MergeOutcome, TagInventory, TagPair, TagRecord,
};

use crate::utils::error::AppResult;

/// Color given to tags created as merge targets.
pub const NEW_TAG_COLOR: &str = "#0000FF";

/// A tag definition as stored in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTag {
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A message and the keys of the tags it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    #[serde(default)]
    pub folder: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Serialized form of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailboxData {
    #[serde(default)]
    pub tags: Vec<StoredTag>,
    #[serde(default)]
    pub messages: Vec<StoredMessage>,
}

impl MailboxData {
    /// Key of the tag named `name`: exact match first, then ignoring case,
    /// then a tag whose key is literally `name`.
    fn resolve_key(&self, name: &str) -> Option<String> {
        let lowered = name.to_lowercase();
        self.tags
            .iter()
            .find(|tag| tag.name == name)
            .or_else(|| self.tags.iter().find(|tag| tag.name.to_lowercase() == lowered))
            .or_else(|| self.tags.iter().find(|tag| tag.key == name))
            .map(|tag| tag.key.clone())
    }

    fn usage(&self, key: &str) -> u64 {
        self.messages
            .iter()
            .filter(|message| message.tags.iter().any(|tag| tag == key))
            .count() as u64
    }

    /// Create a tag named `name` with a key derived from the name.
    fn create_tag(&mut self, name: &str) -> String {
        let existing: HashSet<&str> = self.tags.iter().map(|tag| tag.key.as_str()).collect();
        let key = generate_tag_key(name, &existing);
        info!(name, key = %key, "Creating new tag");
        self.tags.push(StoredTag {
            key: key.clone(),
            name: name.to_string(),
            color: Some(NEW_TAG_COLOR.to_string()),
        });
        key
    }

    /// Move every message from `source_key` to `target_key`.
    fn retag(&mut self, source_key: &str, target_key: &str) -> usize {
        let mut moved = 0;
        for message in &mut self.messages {
            if !message.tags.iter().any(|tag| tag == source_key) {
                continue;
            }
            let before = message.tags.clone();
            message.tags.retain(|tag| tag != source_key && !tag.is_empty());
            if !message.tags.iter().any(|tag| tag == target_key) {
                message.tags.push(target_key.to_string());
            }
            debug!(message = %message.id, ?before, after = ?message.tags, "Updating message tags");
            moved += 1;
        }
        moved
    }
}

fn key_separator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-z0-9äöüß]+").expect("key pattern is valid"))
}

/// Derive a tag key from a display name.
///
/// The name is lowercased, runs of other characters become one `-`, and
/// leading/trailing dashes are dropped. A `-N` suffix makes the key unique
/// among `existing`.
pub fn generate_tag_key(name: &str, existing: &HashSet<&str>) -> String {
    let lowered = name.to_lowercase();
    let base = key_separator_pattern().replace_all(&lowered, "-");
    let base = match base.trim_matches('-') {
        "" => "tag",
        trimmed => trimmed,
    };

    let mut key = base.to_string();
    let mut counter = 1;
    while existing.contains(key.as_str()) {
        key = format!("{}-{}", base, counter);
        counter += 1;
    }
    key
}

/// Mail store backed by a [`MailboxData`] snapshot.
pub struct MailboxSnapshot {
    data: RwLock<MailboxData>,
}

impl MailboxSnapshot {
    pub fn new(data: MailboxData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Read a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        let data: MailboxData = serde_json::from_str(&content)?;
        Ok(Self::new(data))
    }

    /// Write the current state back to a file.
    pub async fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let content = serde_json::to_string_pretty(&*self.data.read().await)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> MailboxData {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl TagInventory for MailboxSnapshot {
    async fn list_tags(&self) -> CoreResult<Vec<TagRecord>> {
        let data = self.data.read().await;
        Ok(data
            .tags
            .iter()
            .map(|tag| TagRecord::new(tag.key.as_str(), tag.name.as_str(), 0))
            .collect())
    }

    async fn count_usage(&self, key: &str) -> CoreResult<u64> {
        let data = self.data.read().await;
        if !data.tags.iter().any(|tag| tag.key == key) {
            return Err(CoreError::not_found(format!("tag key {}", key)));
        }
        Ok(data.usage(key))
    }
}

#[async_trait]
impl MergeExecutor for MailboxSnapshot {
    async fn merge(&self, pair: &TagPair) -> CoreResult<MergeOutcome> {
        if pair.target_name.trim().is_empty() {
            return Err(CoreError::validation("merge target name is empty"));
        }

        let mut data = self.data.write().await;

        let source_key = data
            .resolve_key(&pair.source_name)
            .ok_or_else(|| CoreError::not_found(format!("tag {}", pair.source_name)))?;
        let target_key = match data.resolve_key(&pair.target_name) {
            Some(key) => key,
            None => data.create_tag(&pair.target_name),
        };

        if source_key == target_key {
            debug!(source = %pair.source_name, target = %pair.target_name, "Source and target are the same tag");
            return Ok(MergeOutcome {
                source_name: pair.source_name.clone(),
                target_name: pair.target_name.clone(),
                moved_count: 0,
            });
        }

        info!(
            "Merging: {} ({}) -> {} ({})",
            pair.source_name, source_key, pair.target_name, target_key
        );
        let moved = data.retag(&source_key, &target_key);

        if moved > 0 {
            info!(source = %pair.source_name, key = %source_key, "Deleting source tag");
            data.tags.retain(|tag| tag.key != source_key);
        }

        Ok(MergeOutcome {
            source_name: pair.source_name.clone(),
            target_name: pair.target_name.clone(),
            moved_count: moved,
        })
    }
}
