//! JSON Settings File
//!
//! Reads and writes the flat settings object from a JSON file.

use std::fs;
use std::path::Path;

use crate::models::settings::Settings;
use crate::utils::error::{AppError, AppResult};

/// Load settings from a file, rejecting an unknown provider.
pub fn load_settings(path: impl AsRef<Path>) -> AppResult<Settings> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(AppError::config(format!(
            "settings file {} is empty",
            path.display()
        )));
    }

    let settings: Settings = serde_json::from_str(&content)?;
    settings.validate().map_err(AppError::validation)?;
    tracing::debug!(path = %path.display(), "Loaded settings");
    Ok(settings)
}

/// Save settings with pretty formatting.
pub fn save_settings(path: impl AsRef<Path>, settings: &Settings) -> AppResult<()> {
    settings.validate().map_err(AppError::validation)?;
    let content = serde_json::to_string_pretty(settings)?;
    fs::write(path, content)?;
    Ok(())
}
