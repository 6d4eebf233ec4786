//! Tag Analysis Service
//!
//! Runs the three analysis operations against one provider. Every operation
//! is stateless: it plans batches, sends them strictly one after another,
//! cleans and parses each reply and concatenates the results. The first batch
//! that cannot be parsed aborts the whole operation.

use std::sync::Arc;

use tracing::{debug, error, info};

use tagmend_core::{SimilarityGroup, TagRecord};
use tagmend_llm::{create_provider, CompletionRequest, LlmProvider};
use tagmend_recovery::{clean_json_response, recover_truncated_groups};

use super::batch::{
    plan_batches, BatchMode, CATEGORY_BATCH_SIZE, RENAME_BATCH_SIZE, SIMILARITY_BATCH_SIZE,
};
use super::coverage::assess_coverage;
use super::dedup::deduplicate_groups;
use super::payload::{
    parse_payload, CategoriesPayload, GroupsPayload, ResponsePayload, SuggestionsPayload,
};
use super::prompts::{
    build_category_prompt, build_rename_prompt, build_similarity_prompt,
    CONNECTION_TEST_MAX_TOKENS, CONNECTION_TEST_PROMPT,
};
use crate::models::analysis::{CategoryReport, RenameReport, SimilarityReport};
use crate::models::settings::Settings;
use crate::services::inventory::usage_summary;
use crate::utils::error::{AppError, AppResult};

/// Orchestrates tag analysis against a single provider binding.
pub struct TagAnalysisService {
    provider: Arc<dyn LlmProvider>,
}

impl TagAnalysisService {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Build the service from settings, failing before any network call when
    /// the provider is unknown or its credential is missing.
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let config = settings.provider_config()?;
        info!(
            provider = %config.provider,
            model = %config.model,
            "Using AI provider"
        );
        Ok(Self::new(create_provider(config)))
    }

    /// Model identifier reported in coverage warnings.
    pub fn model_identifier(&self) -> &str {
        self.provider.model()
    }

    /// Find groups of tags that should be merged.
    ///
    /// Deep mode sends every tag in one request under the provider's highest
    /// output ceiling, then removes tags claimed by more than one group and
    /// attaches a [`CoverageWarning`](tagmend_core::CoverageWarning) if the
    /// result looks truncated. Standard mode batches by
    /// [`SIMILARITY_BATCH_SIZE`] and does neither.
    pub async fn find_similar_tags(
        &self,
        tags: &[TagRecord],
        deep: bool,
    ) -> AppResult<SimilarityReport> {
        if tags.is_empty() {
            info!("No tags to analyze");
            return Ok(SimilarityReport::default());
        }
        log_inventory("similarity", tags);

        let mode = BatchMode::from_deep(deep);
        let names = tag_names(tags);
        if mode.is_deep() {
            info!(
                tags = names.len(),
                "Deep analysis: sending all tags in a single request"
            );
        }

        let groups = self
            .run_batches(
                "similarity",
                &names,
                mode,
                SIMILARITY_BATCH_SIZE,
                |batch| build_similarity_prompt(batch, mode.is_deep()),
                parse_similarity_batch,
            )
            .await?;

        if !mode.is_deep() {
            info!("Found {} groups across all batches", groups.len());
            return Ok(SimilarityReport {
                groups,
                warning: None,
            });
        }

        let before = groups.len();
        let groups = deduplicate_groups(groups);
        info!(
            "Deduplication complete: {} of {} groups remaining",
            groups.len(),
            before
        );

        let warning = assess_coverage(&groups, names.len(), self.model_identifier());
        Ok(SimilarityReport { groups, warning })
    }

    /// Ask for better names, batched by [`RENAME_BATCH_SIZE`].
    pub async fn suggest_tag_names(&self, tags: &[TagRecord]) -> AppResult<RenameReport> {
        if tags.is_empty() {
            return Ok(RenameReport::default());
        }
        log_inventory("rename", tags);

        let names = tag_names(tags);
        let suggestions = self
            .run_batches(
                "rename",
                &names,
                BatchMode::Standard,
                RENAME_BATCH_SIZE,
                |batch| build_rename_prompt(batch),
                |batch, cleaned| parse_strict::<SuggestionsPayload>("rename", batch, cleaned),
            )
            .await?;

        info!("Generated {} suggestions across all batches", suggestions.len());
        Ok(RenameReport { suggestions })
    }

    /// Sort tags into thematic categories, batched by [`CATEGORY_BATCH_SIZE`].
    ///
    /// Categories from different batches are concatenated as returned, even
    /// when two batches invent the same category name.
    pub async fn categorize_tags(&self, tags: &[TagRecord]) -> AppResult<CategoryReport> {
        if tags.is_empty() {
            return Ok(CategoryReport::default());
        }
        log_inventory("categorize", tags);

        let categories = self
            .run_batches(
                "categorize",
                tags,
                BatchMode::Standard,
                CATEGORY_BATCH_SIZE,
                |batch| build_category_prompt(batch),
                |batch, cleaned| parse_strict::<CategoriesPayload>("categorize", batch, cleaned),
            )
            .await?;

        info!("Created {} categories across all batches", categories.len());
        Ok(CategoryReport { categories })
    }

    /// Send a trivial prompt and return the raw reply.
    pub async fn test_connection(&self) -> AppResult<String> {
        info!(provider = self.provider.name(), "Testing provider connection");
        let request = CompletionRequest::new(CONNECTION_TEST_PROMPT)
            .with_max_tokens(CONNECTION_TEST_MAX_TOKENS)
            .plain_text();
        let reply = self.provider.complete(&request).await?;
        info!("Connection test succeeded");
        Ok(reply)
    }

    /// Plan `items` into batches and process them one at a time.
    async fn run_batches<T, R>(
        &self,
        operation: &'static str,
        items: &[T],
        mode: BatchMode,
        batch_size: usize,
        build_prompt: impl Fn(&[T]) -> String,
        parse: impl Fn(usize, &str) -> AppResult<Vec<R>>,
    ) -> AppResult<Vec<R>> {
        let batches = plan_batches(items, mode, batch_size);
        let total = batches.len();
        let mut results = Vec::new();

        for (index, batch) in batches.into_iter().enumerate() {
            let number = index + 1;
            info!(
                operation,
                "Processing batch {}/{} ({} tags)",
                number,
                total,
                batch.len()
            );

            let prompt = build_prompt(batch);
            let request = match mode {
                BatchMode::Standard => CompletionRequest::new(prompt),
                BatchMode::Deep => CompletionRequest::deep(prompt),
            };

            let raw = self.provider.complete(&request).await.map_err(|e| {
                error!(operation, batch = number, "Provider call failed: {}", e);
                e
            })?;
            debug!(operation, batch = number, "Raw AI response: {}", raw);

            let cleaned = clean_json_response(&raw);
            debug!(operation, batch = number, "Cleaned response: {}", cleaned);

            let items = parse(number, &cleaned).map_err(|e| {
                error!(operation, batch = number, "AI response was: {}", raw);
                e
            })?;
            results.extend(items);
        }

        Ok(results)
    }
}

fn tag_names(tags: &[TagRecord]) -> Vec<String> {
    tags.iter().map(|tag| tag.name.clone()).collect()
}

fn log_inventory(operation: &'static str, tags: &[TagRecord]) {
    let summary = usage_summary(tags);
    info!(
        operation,
        total = summary.total,
        used = summary.used,
        unused = summary.unused,
        "Analyzing all tags"
    );
}

/// Parse a rename or category reply. No recovery is attempted.
fn parse_strict<P: ResponsePayload>(
    operation: &'static str,
    batch: usize,
    cleaned: &str,
) -> AppResult<Vec<P::Item>> {
    parse_payload::<P>(cleaned).map_err(|e| AppError::parse(operation, batch, e.to_string()))
}

/// Parse a similarity reply, salvaging complete records when the JSON is
/// broken. Groups with fewer than two distinct members are dropped.
fn parse_similarity_batch(batch: usize, cleaned: &str) -> AppResult<Vec<SimilarityGroup>> {
    let groups = match parse_payload::<GroupsPayload>(cleaned) {
        Ok(groups) => groups,
        Err(parse_err) => {
            error!(batch, "JSON parse failed: {}", parse_err);
            return recover_truncated_groups(cleaned).map_err(|source| {
                AppError::RecoveryFailed {
                    batch,
                    source,
                    parse_message: parse_err.to_string(),
                }
            });
        }
    };

    let parsed = groups.len();
    let groups: Vec<SimilarityGroup> = groups
        .into_iter()
        .filter_map(SimilarityGroup::normalized)
        .collect();
    if groups.len() < parsed {
        debug!(
            batch,
            dropped = parsed - groups.len(),
            "Dropped groups with fewer than two distinct members"
        );
    }
    Ok(groups)
}
