//! Merge Commands
//!
//! Build merge pairs from a saved report and apply them to the mail store.

use tagmend_core::{MergeExecutor, TagPair};

use crate::models::analysis::AnalysisReport;
use crate::services::merge::{apply_merges, pairs_from_groups, pairs_from_renames, MergeReport};
use crate::utils::error::{AppError, AppResult};

/// Pick items by index; `None` selects everything.
fn select<'a, T>(items: &'a [T], selection: Option<&[usize]>) -> AppResult<Vec<&'a T>> {
    match selection {
        None => Ok(items.iter().collect()),
        Some(indices) => indices
            .iter()
            .map(|&i| {
                items.get(i).ok_or_else(|| {
                    AppError::validation(format!(
                        "selection index {} out of range (report has {} items)",
                        i,
                        items.len()
                    ))
                })
            })
            .collect(),
    }
}

/// Turn the selected groups or suggestions of a report into merge pairs.
pub fn build_merge_pairs(
    report: &AnalysisReport,
    selection: Option<&[usize]>,
) -> AppResult<Vec<TagPair>> {
    let pairs = match report {
        AnalysisReport::Similarity(report) => pairs_from_groups(select(&report.groups, selection)?),
        AnalysisReport::Rename(report) => {
            pairs_from_renames(select(&report.suggestions, selection)?)
        }
        AnalysisReport::Category(_) => {
            return Err(AppError::validation(
                "a category report cannot be turned into merge pairs",
            ))
        }
    };
    tracing::info!(pairs = pairs.len(), "Built merge pairs");
    Ok(pairs)
}

/// Apply `pairs` in chunks, logging progress after each chunk.
pub async fn merge_tags(
    executor: &dyn MergeExecutor,
    pairs: &[TagPair],
    chunk_size: usize,
) -> AppResult<MergeReport> {
    if pairs.is_empty() {
        return Err(AppError::validation("no tag pairs to merge"));
    }
    let report = apply_merges(executor, pairs, chunk_size, |progress| {
        tracing::info!(
            "Processed {}/{} pairs ({}%), {} messages moved",
            progress.processed,
            progress.total,
            progress.percent(),
            progress.moved_so_far
        );
    })
    .await;
    Ok(report)
}
