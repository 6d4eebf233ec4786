//! Analysis Commands
//!
//! Load the inventory, run one analysis and return its report.

use tagmend_core::TagInventory;

use crate::models::analysis::{CategoryReport, RenameReport, SimilarityReport};
use crate::models::settings::Settings;
use crate::services::analysis::TagAnalysisService;
use crate::utils::error::AppResult;

/// Find similar tags. Deep mode runs when either the flag or the
/// `deepAnalysis` setting asks for it.
pub async fn find_similar_tags(
    settings: &Settings,
    store: &dyn TagInventory,
    deep: bool,
) -> AppResult<SimilarityReport> {
    let service = TagAnalysisService::from_settings(settings)?;
    let tags = store.inventory().await?;
    service
        .find_similar_tags(&tags, deep || settings.deep_analysis)
        .await
}

/// Suggest better tag names.
pub async fn suggest_tag_names(
    settings: &Settings,
    store: &dyn TagInventory,
) -> AppResult<RenameReport> {
    let service = TagAnalysisService::from_settings(settings)?;
    let tags = store.inventory().await?;
    service.suggest_tag_names(&tags).await
}

/// Sort tags into categories.
pub async fn categorize_tags(
    settings: &Settings,
    store: &dyn TagInventory,
) -> AppResult<CategoryReport> {
    let service = TagAnalysisService::from_settings(settings)?;
    let tags = store.inventory().await?;
    service.categorize_tags(&tags).await
}

/// Check that the configured provider answers.
pub async fn test_connection(settings: &Settings) -> AppResult<String> {
    TagAnalysisService::from_settings(settings)?
        .test_connection()
        .await
}
