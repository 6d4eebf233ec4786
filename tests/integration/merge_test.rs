//! Merge Integration Tests
//!
//! Builds pairs from a saved report and applies them to a snapshot file.

use serde_json::json;

use tagmend::commands;
use tagmend::models::AnalysisReport;
use tagmend::{MailboxSnapshot, DEFAULT_MERGE_CHUNK_SIZE};
use tagmend_core::{TagInventory, TagPair};

fn write_mailbox(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("mailbox.json");
    let data = json!({
        "tags": [
            {"key": "invoice", "name": "Invoice"},
            {"key": "invoice-lc", "name": "invoice"},
            {"key": "rechnung", "name": "Rechnung"},
            {"key": "todo", "name": "todo"}
        ],
        "messages": [
            {"id": "m1", "folder": "INBOX", "tags": ["invoice-lc"]},
            {"id": "m2", "folder": "INBOX", "tags": ["rechnung", "todo"]},
            {"id": "m3", "folder": "Archive", "tags": ["invoice", "rechnung"]}
        ]
    });
    std::fs::write(&path, serde_json::to_string_pretty(&data).unwrap()).unwrap();
    path
}

#[tokio::test]
async fn test_similarity_report_to_merged_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_mailbox(&dir);

    let report: AnalysisReport = serde_json::from_value(json!({
        "groups": [
            {"group": ["Invoice", "invoice", "Rechnung"], "suggested_name": "Invoice", "reason": "Same concept"}
        ]
    }))
    .unwrap();
    let pairs = commands::build_merge_pairs(&report, None).unwrap();
    assert_eq!(
        pairs,
        vec![
            TagPair::new("invoice", "Invoice"),
            TagPair::new("Rechnung", "Invoice")
        ]
    );

    let store = MailboxSnapshot::load(&path).unwrap();
    let result = commands::merge_tags(&store, &pairs, DEFAULT_MERGE_CHUNK_SIZE)
        .await
        .unwrap();
    assert!(result.is_complete());
    assert_eq!(result.total_moved(), 3);
    store.save(&path).await.unwrap();

    let reloaded = MailboxSnapshot::load(&path).unwrap();
    let tags = reloaded.inventory().await.unwrap();
    let names: Vec<&str> = tags.iter().map(|tag| tag.name.as_str()).collect();
    assert_eq!(names, vec!["Invoice", "todo"]);
    assert_eq!(tags[0].usage_count, 3);

    let data = reloaded.snapshot().await;
    assert_eq!(data.messages[2].tags, vec!["invoice"]);
}

#[tokio::test]
async fn test_rename_creates_target_and_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let store = MailboxSnapshot::load(write_mailbox(&dir)).unwrap();

    let pairs = vec![TagPair::new("todo", "To Do"), TagPair::new("Ghost", "Invoice")];
    let result = commands::merge_tags(&store, &pairs, 1).await.unwrap();

    assert_eq!(result.results.len(), 1);
    assert_eq!(result.results[0].moved_count, 1);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].pair.source_name, "Ghost");

    let data = store.snapshot().await;
    let created = data.tags.iter().find(|tag| tag.name == "To Do").unwrap();
    assert_eq!(created.key, "to-do");
    assert_eq!(data.messages[1].tags, vec!["rechnung", "to-do"]);
}

#[tokio::test]
async fn test_empty_pair_list_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = MailboxSnapshot::load(write_mailbox(&dir)).unwrap();
    assert!(commands::merge_tags(&store, &[], DEFAULT_MERGE_CHUNK_SIZE)
        .await
        .is_err());
}
