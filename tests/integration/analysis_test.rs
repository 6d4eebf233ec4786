//! Analysis Integration Tests
//!
//! Runs the full pipeline with the OpenAI binding pointed at a mockito server.

use mockito::Matcher;
use serde_json::json;

use tagmend::commands;
use tagmend::storage::MailboxData;
use tagmend::{AppError, MailboxSnapshot, Settings};
use tagmend_core::TagInventory;

fn settings_for(server: &mockito::Server) -> Settings {
    Settings {
        ai_provider: Some("openai".to_string()),
        openai_api_key: Some("sk-test".to_string()),
        openai_endpoint: Some(format!("{}/v1/chat/completions", server.url())),
        ..Default::default()
    }
}

fn mailbox() -> MailboxSnapshot {
    let data: MailboxData = serde_json::from_value(json!({
        "tags": [
            {"key": "invoice", "name": "Invoice"},
            {"key": "invoice-lc", "name": "invoice"},
            {"key": "invoices", "name": "Invoices"},
            {"key": "meeting", "name": "Meeting"}
        ],
        "messages": [
            {"id": "m1", "folder": "INBOX", "tags": ["invoice"]},
            {"id": "m2", "folder": "INBOX", "tags": ["invoice-lc"]},
            {"id": "m3", "folder": "INBOX", "tags": ["invoices", "meeting"]}
        ]
    }))
    .unwrap();
    MailboxSnapshot::new(data)
}

/// Wrap `content` in a chat-completions envelope.
fn completion(content: &str) -> String {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

#[tokio::test]
async fn test_similar_tags_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let reply = completion(
        r#"{"groups":[{"group":["Invoice","invoice","Invoices"],"suggested_name":"Invoice","reason":"Case/plural variants"}]}"#,
    );
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 8000,
            "response_format": {"type": "json_object"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply)
        .expect(1)
        .create_async()
        .await;

    let report = commands::find_similar_tags(&settings_for(&server), &mailbox(), false)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].members, vec!["Invoice", "invoice", "Invoices"]);
    assert!(report.warning.is_none());
}

#[tokio::test]
async fn test_deep_setting_raises_ceiling_and_warns() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({"max_tokens": 16384})))
        .with_status(200)
        .with_body(completion(r#"{"groups":[]}"#))
        .expect(1)
        .create_async()
        .await;

    let settings = Settings {
        deep_analysis: true,
        ..settings_for(&server)
    };
    let report = commands::find_similar_tags(&settings, &mailbox(), false)
        .await
        .unwrap();

    mock.assert_async().await;
    let warning = report.warning.unwrap();
    assert_eq!(warning.total_tags, 4);
    assert_eq!(warning.coverage_percent, 0);
    assert_eq!(warning.model_identifier, "gpt-4o-mini");
}

#[tokio::test]
async fn test_provider_error_surfaces_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
        .create_async()
        .await;

    let err = commands::suggest_tag_names(&settings_for(&server), &mailbox())
        .await
        .unwrap_err();

    match err {
        AppError::Llm(llm) => {
            assert_eq!(llm.status(), Some(401));
            assert!(llm.to_string().contains("Incorrect API key provided"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_categorize_sends_usage_counts() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Regex(r"Meeting \(used 1x\)".to_string()))
        .with_status(200)
        .with_body(completion(
            "```json\n{\"categories\":[{\"category\":\"Finance\",\"tags\":[\"Invoice\"],\"description\":\"Billing\"}]}\n```",
        ))
        .create_async()
        .await;

    let report = commands::categorize_tags(&settings_for(&server), &mailbox())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].name, "Finance");
}

#[tokio::test]
async fn test_connection_check() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({"max_tokens": 50})))
        .with_status(200)
        .with_body(completion("OK"))
        .create_async()
        .await;

    let reply = commands::test_connection(&settings_for(&server)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(reply, "OK");
}

#[tokio::test]
async fn test_inventory_usage_feeds_cleanup() {
    let store = mailbox();
    let inventory = commands::get_inventory(&store).await.unwrap();
    assert_eq!(inventory.summary.total, 4);
    assert_eq!(inventory.summary.unused, 0);
    assert_eq!(store.count_usage("invoices").await.unwrap(), 1);

    let cleanup = commands::get_cleanup_candidates(&store).await.unwrap();
    assert!(cleanup.keys.is_empty());
}
