//! Truncation Recovery
//!
//! When a similarity reply hits the output-token ceiling the JSON stops
//! mid-record and a normal parse fails. The records written before the cut are
//! usually intact, so they are scanned out one by one, ignoring whatever
//! surrounds them.
//!
//! This is a fallback only. It runs after a direct parse has failed, and it
//! reports total failure as [`RecoveryError::NoCompleteGroups`] rather than an
//! empty list.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use tagmend_core::SimilarityGroup;

/// Reason used when a salvaged record carries an empty one.
const DEFAULT_REASON: &str = "Similar tags";

/// Error returned when nothing could be salvaged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("Response was truncated and could not be recovered")]
    NoCompleteGroups,
}

/// One complete `{"group": [...], "suggested_name": "...", "reason": "..."}`
/// record. The member list must be a run of complete string literals, so names
/// may hold any character while a broken record cannot swallow the next one.
fn record_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r#"\{\s*"group"\s*:\s*\[\s*((?:"(?:[^"\\]|\\.)*"\s*,?\s*)*)\]\s*,"#,
            r#"\s*"suggested_name"\s*:\s*"((?:[^"\\]|\\.)+)"\s*,"#,
            r#"\s*"reason"\s*:\s*"((?:[^"\\]|\\.)*)"\s*\}"#,
        ))
        .expect("record pattern is valid")
    })
}

/// A JSON string literal's contents.
fn quoted_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#""((?:[^"\\]|\\.)*)""#).expect("quoted pattern is valid"))
}

/// Decode JSON escapes in a captured string body, keeping the raw text if the
/// escapes are malformed.
fn unescape(raw: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{}\"", raw)).unwrap_or_else(|_| raw.to_string())
}

/// Salvage every complete similarity-group record from `text`, in source order.
///
/// Records with fewer than two distinct members are skipped. Fails when no
/// record survives.
pub fn recover_truncated_groups(text: &str) -> Result<Vec<SimilarityGroup>, RecoveryError> {
    tracing::warn!("JSON appears truncated - attempting to recover partial data");

    let groups: Vec<SimilarityGroup> = record_pattern()
        .captures_iter(text)
        .filter_map(|caps| {
            let members: Vec<String> = quoted_pattern()
                .captures_iter(&caps[1])
                .map(|member| unescape(&member[1]))
                .filter(|name| !name.is_empty())
                .collect();

            let reason = unescape(&caps[3]);
            let reason = if reason.is_empty() {
                DEFAULT_REASON.to_string()
            } else {
                reason
            };

            SimilarityGroup::new(members, unescape(&caps[2]), reason).normalized()
        })
        .collect();

    if groups.is_empty() {
        tracing::error!("no complete group records found in truncated response");
        return Err(RecoveryError::NoCompleteGroups);
    }

    tracing::warn!(
        "Recovered {} complete groups from truncated response; the model likely found more but hit its output limit",
        groups.len()
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_complete_records_then_broken_third() {
        let text = r#"{"groups":[
            {"group":["Invoice","invoice"],"suggested_name":"Invoice","reason":"Case"},
            {"group":["Meeting","Meetings"],"suggested_name":"Meeting","reason":"Plural"},
            {"group":["Travel","Trav"#;

        let groups = recover_truncated_groups(text).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].members, vec!["Invoice", "invoice"]);
        assert_eq!(groups[0].suggested_name, "Invoice");
        assert_eq!(groups[0].reason, "Case");
        assert_eq!(groups[1].members, vec!["Meeting", "Meetings"]);
    }

    #[test]
    fn test_nothing_recoverable() {
        let text = r#"{"groups":[{"group":["Travel","Trav"#;
        assert_eq!(
            recover_truncated_groups(text),
            Err(RecoveryError::NoCompleteGroups)
        );
    }

    #[test]
    fn test_pretty_printed_records() {
        let text = "{\n  \"groups\": [\n    {\n      \"group\": [\n        \"Rechnung\",\n        \"Invoice\"\n      ],\n      \"suggested_name\": \"Invoice\",\n      \"reason\": \"Same concept\"\n    },\n    {\n      \"group\": [";
        let groups = recover_truncated_groups(text).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec!["Rechnung", "Invoice"]);
    }

    #[test]
    fn test_single_member_record_skipped() {
        let text = r#"[{"group":["solo"],"suggested_name":"solo","reason":"x"},
            {"group":["a","a"],"suggested_name":"a","reason":"x"},
            {"group":["b","c"],"suggested_name":"b","reason":"x"},"#;
        let groups = recover_truncated_groups(text).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec!["b", "c"]);
    }

    #[test]
    fn test_escaped_quotes_in_names() {
        let text = r#"[{"group":["Project \"X\"","Project X"],"suggested_name":"Project X","reason":"Quotes"}, {"gro"#;
        let groups = recover_truncated_groups(text).unwrap();
        assert_eq!(groups[0].members, vec!["Project \"X\"", "Project X"]);
    }

    #[test]
    fn test_broken_record_does_not_swallow_next() {
        let text = r#"[{"group":["x","y"
            {"group":["a","b"],"suggested_name":"a","reason":"r"}"#;
        let groups = recover_truncated_groups(text).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec!["a", "b"]);
    }

    #[test]
    fn test_bracketed_tag_names() {
        let text = r#"{"groups":[{"group":["[Gmail]/Important","Important"],"suggested_name":"Important","reason":"Same"},{"group":["x","#;
        let groups = recover_truncated_groups(text).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec!["[Gmail]/Important", "Important"]);
    }

    #[test]
    fn test_braces_and_closing_bracket_in_names() {
        let text = r#"[{"group":["{Work}","Work","a]b"],"suggested_name":"Work","reason":"Braces"}, {"gro"#;
        let groups = recover_truncated_groups(text).unwrap();
        assert_eq!(groups[0].members, vec!["{Work}", "Work", "a]b"]);
        assert_eq!(groups[0].reason, "Braces");
    }

    #[test]
    fn test_empty_reason_gets_default() {
        let text = r#"[{"group":["a","b"],"suggested_name":"a","reason":""}"#;
        let groups = recover_truncated_groups(text).unwrap();
        assert_eq!(groups[0].reason, DEFAULT_REASON);
    }
}
