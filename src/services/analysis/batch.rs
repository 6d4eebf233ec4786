//! Batch Planning
//!
//! Splits a tag list into the requests sent to the provider.

use serde::{Deserialize, Serialize};

/// Tags per similarity request in standard mode.
pub const SIMILARITY_BATCH_SIZE: usize = 250;
/// Tags per rename request.
pub const RENAME_BATCH_SIZE: usize = 250;
/// Tags per categorization request.
pub const CATEGORY_BATCH_SIZE: usize = 300;

/// How a tag list is split into requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    /// Consecutive chunks of a fixed maximum size
    #[default]
    Standard,
    /// Everything in one request
    Deep,
}

impl BatchMode {
    pub fn from_deep(deep: bool) -> Self {
        if deep {
            BatchMode::Deep
        } else {
            BatchMode::Standard
        }
    }

    pub fn is_deep(&self) -> bool {
        matches!(self, BatchMode::Deep)
    }
}

/// Partition `items` into batches.
///
/// Standard mode yields consecutive chunks of at most `batch_size` items; deep
/// mode yields the whole input as one batch. An empty input yields no batches.
pub fn plan_batches<T>(items: &[T], mode: BatchMode, batch_size: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return Vec::new();
    }
    match mode {
        BatchMode::Deep => vec![items],
        BatchMode::Standard => items.chunks(batch_size.max(1)).collect(),
    }
}

/// Coarse plausibility baseline: about one group per ten tags.
pub fn expected_group_count(tag_count: usize) -> usize {
    tag_count / 10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("tag-{}", i)).collect()
    }

    #[test]
    fn test_standard_mode_chunks() {
        let tags = names(600);
        let batches = plan_batches(&tags, BatchMode::Standard, SIMILARITY_BATCH_SIZE);
        let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![250, 250, 100]);
        assert_eq!(batches[1][0], "tag-250");
    }

    #[test]
    fn test_deep_mode_single_batch() {
        let tags = names(600);
        let batches = plan_batches(&tags, BatchMode::Deep, SIMILARITY_BATCH_SIZE);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 600);
    }

    #[test]
    fn test_exact_multiple_and_small_input() {
        let tags = names(300);
        assert_eq!(
            plan_batches(&tags, BatchMode::Standard, CATEGORY_BATCH_SIZE).len(),
            1
        );
        assert_eq!(plan_batches(&tags[..3], BatchMode::Standard, 250).len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let tags: Vec<String> = Vec::new();
        assert!(plan_batches(&tags, BatchMode::Standard, 250).is_empty());
        assert!(plan_batches(&tags, BatchMode::Deep, 250).is_empty());
    }

    #[test]
    fn test_expected_group_count() {
        assert_eq!(expected_group_count(1000), 100);
        assert_eq!(expected_group_count(19), 1);
        assert_eq!(expected_group_count(9), 0);
    }
}
