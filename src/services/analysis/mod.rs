//! Tag Analysis
//!
//! Similarity, rename and categorization analysis of a tag inventory.

pub mod batch;
pub mod coverage;
pub mod dedup;
pub mod payload;
pub mod prompts;
pub mod service;

pub use batch::{expected_group_count, plan_batches, BatchMode};
pub use coverage::assess_coverage;
pub use dedup::deduplicate_groups;
pub use service::TagAnalysisService;
