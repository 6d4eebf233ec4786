//! Storage Layer
//!
//! Settings file handling and the snapshot-backed mail store.

pub mod config;
pub mod mailbox;

pub use config::{load_settings, save_settings};
pub use mailbox::{generate_tag_key, MailboxData, MailboxSnapshot};
