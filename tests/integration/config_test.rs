//! Settings Integration Tests

use std::fs;

use tagmend::storage::{load_settings, save_settings};
use tagmend::{AppError, Settings, TagAnalysisService};
use tagmend_llm::{LlmError, ProviderType};

#[test]
fn test_settings_file_to_provider_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "aiProvider": "google",
            "googleApiKey": "g-123",
            "googleModel": "",
            "openaiApiKey": "unused",
            "deepAnalysis": false
        }"#,
    )
    .unwrap();

    let settings = load_settings(&path).unwrap();
    let config = settings.provider_config().unwrap();
    assert_eq!(config.provider, ProviderType::Google);
    assert_eq!(config.model, "gemini-2.0-flash");
    assert_eq!(config.api_key.as_deref(), Some("g-123"));
    assert_eq!(config.max_tokens, 8000);
}

#[test]
fn test_missing_key_fails_before_any_request() {
    let settings = Settings {
        ai_provider: Some("anthropic".to_string()),
        ..Default::default()
    };
    match TagAnalysisService::from_settings(&settings) {
        Err(AppError::Llm(LlmError::Config { message })) => {
            assert_eq!(message, "Anthropic API Key not configured. Please check settings.");
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected a configuration error"),
    }
}

#[test]
fn test_settings_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let settings = Settings {
        ai_provider: Some("ollama".to_string()),
        ollama_endpoint: Some("http://127.0.0.1:11434".to_string()),
        deep_analysis: true,
        ..Default::default()
    };

    save_settings(&path, &settings).unwrap();
    assert_eq!(load_settings(&path).unwrap(), settings);
}
