//! CLI Command Handlers
//!
//! Thin wrappers that load what an operation needs, call the service layer
//! and return a serializable result.

pub mod analysis;
pub mod inventory;
pub mod merge;

pub use analysis::{categorize_tags, find_similar_tags, suggest_tag_names, test_connection};
pub use inventory::{get_cleanup_candidates, get_inventory};
pub use merge::{build_merge_pairs, merge_tags};
