//! Merge Planning and Application
//!
//! Turns approved analysis results into [`TagPair`] instructions and feeds
//! them to a [`MergeExecutor`] in fixed-size chunks, reporting progress after
//! each chunk.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use tagmend_core::{MergeExecutor, MergeOutcome, RenameSuggestion, SimilarityGroup, TagPair};

/// Pairs applied between two progress reports.
pub const DEFAULT_MERGE_CHUNK_SIZE: usize = 10;

/// Every member that differs from the suggested name is merged into it.
///
/// A pair repeated across groups is emitted once.
pub fn pairs_from_groups<'a>(groups: impl IntoIterator<Item = &'a SimilarityGroup>) -> Vec<TagPair> {
    let pairs = groups.into_iter().flat_map(|group| {
        group
            .members
            .iter()
            .map(move |member| TagPair::new(member.as_str(), group.suggested_name.as_str()))
    });
    dedup_pairs(pairs)
}

/// Each rename becomes a merge of the old name into the new one.
pub fn pairs_from_renames<'a>(
    suggestions: impl IntoIterator<Item = &'a RenameSuggestion>,
) -> Vec<TagPair> {
    let pairs = suggestions
        .into_iter()
        .map(|suggestion| TagPair::new(suggestion.old_name.as_str(), suggestion.new_name.as_str()));
    dedup_pairs(pairs)
}

fn dedup_pairs(pairs: impl Iterator<Item = TagPair>) -> Vec<TagPair> {
    let mut seen = HashSet::new();
    pairs
        .filter(|pair| !pair.is_self_pair())
        .filter(|pair| seen.insert(pair.clone()))
        .collect()
}

/// Progress after a chunk of pairs has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeProgress {
    pub processed: usize,
    pub total: usize,
    pub moved_so_far: usize,
}

impl MergeProgress {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        (self.processed * 100 / self.total) as u32
    }
}

/// A pair the executor rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeFailure {
    pub pair: TagPair,
    pub error: String,
}

/// Everything a merge run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    pub results: Vec<MergeOutcome>,
    pub failures: Vec<MergeFailure>,
}

impl MergeReport {
    /// Messages moved across all successful pairs.
    pub fn total_moved(&self) -> usize {
        self.results.iter().map(|outcome| outcome.moved_count).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Apply `pairs` strictly in order, `chunk_size` at a time.
///
/// A failing pair is recorded and the run carries on with the next one.
/// `on_progress` is called once after every chunk.
pub async fn apply_merges<E, F>(
    executor: &E,
    pairs: &[TagPair],
    chunk_size: usize,
    mut on_progress: F,
) -> MergeReport
where
    E: MergeExecutor + ?Sized,
    F: FnMut(MergeProgress),
{
    let total = pairs.len();
    let mut report = MergeReport::default();
    let mut processed = 0;

    info!(pairs = total, chunk_size, "Applying tag merges");

    for chunk in pairs.chunks(chunk_size.max(1)) {
        for pair in chunk {
            match executor.merge(pair).await {
                Ok(outcome) => {
                    info!(
                        source = %outcome.source_name,
                        target = %outcome.target_name,
                        moved = outcome.moved_count,
                        "Merged tag"
                    );
                    report.results.push(outcome);
                }
                Err(e) => {
                    warn!(
                        source = %pair.source_name,
                        target = %pair.target_name,
                        "Merge failed: {}",
                        e
                    );
                    report.failures.push(MergeFailure {
                        pair: pair.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        processed += chunk.len();
        on_progress(MergeProgress {
            processed,
            total,
            moved_so_far: report.total_moved(),
        });
    }

    info!(
        merged = report.results.len(),
        failed = report.failures.len(),
        moved = report.total_moved(),
        "Tag merge complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tagmend_core::{CoreError, CoreResult};

    #[test]
    fn test_group_pairs_exclude_self_pair() {
        let group = SimilarityGroup::new(vec!["A".into(), "a".into()], "A", "Case");
        assert_eq!(pairs_from_groups([&group]), vec![TagPair::new("a", "A")]);
    }

    #[test]
    fn test_group_pairs_when_suggestion_is_new_name() {
        let group = SimilarityGroup::new(
            vec!["Rechnung".into(), "invoice".into()],
            "Invoice",
            "Same concept",
        );
        assert_eq!(
            pairs_from_groups(&[group]),
            vec![
                TagPair::new("Rechnung", "Invoice"),
                TagPair::new("invoice", "Invoice")
            ]
        );
    }

    #[test]
    fn test_pairs_are_unique() {
        let groups = vec![
            SimilarityGroup::new(vec!["a".into(), "A".into()], "A", "x"),
            SimilarityGroup::new(vec!["A".into(), "a".into()], "A", "x"),
        ];
        assert_eq!(pairs_from_groups(&groups), vec![TagPair::new("a", "A")]);
    }

    #[test]
    fn test_rename_pairs() {
        let suggestions = vec![
            RenameSuggestion {
                old_name: "todo".into(),
                new_name: "To Do".into(),
                reason: "Casing".into(),
            },
            RenameSuggestion {
                old_name: "Work".into(),
                new_name: "Work".into(),
                reason: "Already fine".into(),
            },
        ];
        assert_eq!(
            pairs_from_renames(&suggestions),
            vec![TagPair::new("todo", "To Do")]
        );
    }

    /// Moves one message per pair; fails any pair whose source starts with "bad".
    struct CountingExecutor {
        seen: Mutex<Vec<TagPair>>,
    }

    #[async_trait]
    impl MergeExecutor for CountingExecutor {
        async fn merge(&self, pair: &TagPair) -> CoreResult<MergeOutcome> {
            self.seen.lock().unwrap().push(pair.clone());
            if pair.source_name.starts_with("bad") {
                return Err(CoreError::not_found(pair.source_name.clone()));
            }
            Ok(MergeOutcome {
                source_name: pair.source_name.clone(),
                target_name: pair.target_name.clone(),
                moved_count: 1,
            })
        }
    }

    #[tokio::test]
    async fn test_apply_merges_chunks_and_continues_after_failure() {
        let executor = CountingExecutor {
            seen: Mutex::new(Vec::new()),
        };
        let pairs: Vec<TagPair> = ["a", "bad-1", "c", "d", "e"]
            .iter()
            .map(|source| TagPair::new(*source, "T"))
            .collect();

        let mut progress = Vec::new();
        let report = apply_merges(&executor, &pairs, 2, |p| progress.push(p)).await;

        assert_eq!(report.results.len(), 4);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].pair.source_name, "bad-1");
        assert_eq!(report.total_moved(), 4);
        assert!(!report.is_complete());

        let processed: Vec<usize> = progress.iter().map(|p| p.processed).collect();
        assert_eq!(processed, vec![2, 4, 5]);
        assert_eq!(progress[2].percent(), 100);
        assert_eq!(progress[0].moved_so_far, 1);

        let order: Vec<String> = executor
            .seen
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.source_name.clone())
            .collect();
        assert_eq!(order, vec!["a", "bad-1", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn test_apply_no_pairs() {
        let executor = CountingExecutor {
            seen: Mutex::new(Vec::new()),
        };
        let mut calls = 0;
        let report = apply_merges(&executor, &[], DEFAULT_MERGE_CHUNK_SIZE, |_| calls += 1).await;
        assert!(report.is_complete());
        assert_eq!(report.total_moved(), 0);
        assert_eq!(calls, 0);
    }
}
