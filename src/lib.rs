//! tagmend - AI-assisted mail tag cleanup
//!
//! This library provides the application layer on top of the workspace crates.
//! It includes:
//! - Settings model and JSON settings file handling
//! - Tag analysis: batch planning, prompts, deduplication, coverage checks
//! - Merge pair construction and the chunked merge runner
//! - A snapshot-backed mail store for running without a mail client
//! - CLI command handlers

pub mod commands;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::analysis::{AnalysisReport, CategoryReport, RenameReport, SimilarityReport};
pub use models::response::CommandResponse;
pub use models::settings::Settings;
pub use services::analysis::TagAnalysisService;
pub use services::merge::{apply_merges, MergeReport, DEFAULT_MERGE_CHUNK_SIZE};
pub use storage::{load_settings, MailboxSnapshot};
pub use utils::error::{AppError, AppResult};
