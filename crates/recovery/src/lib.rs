//! tagmend Recovery
//!
//! Turns raw model replies into parseable JSON text, and salvages complete
//! similarity-group records from replies cut off by an output-token ceiling.
//!
//! - `cleaner` - strips markdown fences and isolates the JSON span
//! - `truncation` - regex-based salvage of `{"group": [...], ...}` records

pub mod cleaner;
pub mod truncation;

pub use cleaner::clean_json_response;
pub use truncation::{recover_truncated_groups, RecoveryError};
