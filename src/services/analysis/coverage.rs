//! Coverage Check
//!
//! A deep analysis that hits the output ceiling still returns valid JSON, just
//! far fewer groups than the tag list warrants. This compares the result
//! against a rough baseline and flags results that look cut short.

use tagmend_core::{CoverageWarning, SimilarityGroup};

use super::batch::expected_group_count;

/// Share of `total_tags` placed in some group, rounded, capped at 100.
pub fn coverage_percent(affected_tags: usize, total_tags: usize) -> u32 {
    if total_tags == 0 {
        return 0;
    }
    let percent = (affected_tags as f64 * 100.0 / total_tags as f64).round();
    percent.min(100.0) as u32
}

/// Build a warning when the groups cover suspiciously little of the input.
///
/// Fires when fewer than half the expected groups were found or less than
/// half the tags are covered.
pub fn assess_coverage(
    groups: &[SimilarityGroup],
    total_tags: usize,
    model_identifier: &str,
) -> Option<CoverageWarning> {
    let expected = expected_group_count(total_tags);
    let found = groups.len();
    let affected: usize = groups.iter().map(SimilarityGroup::len).sum();
    let percent = coverage_percent(affected, total_tags);

    if found * 2 >= expected && percent >= 50 {
        tracing::info!(
            found,
            expected,
            coverage_percent = percent,
            "Deep analysis coverage looks complete"
        );
        return None;
    }

    tracing::warn!(
        expected,
        found,
        coverage_percent = percent,
        model = model_identifier,
        "Token limit likely reached: the model probably found more groups than it could return. \
         Try a model with a higher output limit, standard mode, or removing unused tags first"
    );

    Some(CoverageWarning {
        kind: CoverageWarning::TOKEN_LIMIT.to_string(),
        expected_group_count: expected,
        found_group_count: found,
        coverage_percent: percent,
        total_tags,
        affected_tags: affected,
        model_identifier: model_identifier.to_string(),
    })
}
