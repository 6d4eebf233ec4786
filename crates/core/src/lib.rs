//! tagmend Core
//!
//! Foundational value types, error types, and collaborator traits for the
//! tagmend workspace. This crate has no dependency on HTTP providers or on
//! any particular mail store.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `tags` - Tag records and the analysis result types built from them
//! - `store` - Mail-store collaborator traits (`TagInventory`, `MergeExecutor`)
//!
//! ## Design Principles
//!
//! 1. **Value types only** - every analysis result is immutable once produced
//! 2. **Trait-based collaborators** - the mail store is reached only through traits
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod store;
pub mod tags;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Tag Types ──────────────────────────────────────────────────────────
pub use tags::{
    Category, CoverageWarning, MergeOutcome, RenameSuggestion, SimilarityGroup, TagPair,
    TagRecord,
};

// ── Collaborators ──────────────────────────────────────────────────────
pub use store::{MergeExecutor, TagInventory};
