//! Response Cleaner
//!
//! Models wrap JSON in markdown fences or surround it with prose even when
//! told not to. This module strips the fences and cuts the text down to the
//! outermost JSON-looking span.

use std::sync::OnceLock;

use regex::Regex;

/// Opening or closing markdown fence, with or without a `json` language tag.
fn fence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"```(?:json)?\s*").expect("fence pattern is valid"))
}

/// From the first `[` to the last `]`, or the first `{` to the last `}`,
/// whichever opening bracket comes first.
fn json_span_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)(\[.*\]|\{.*\})").expect("span pattern is valid"))
}

/// Strip markdown fencing and extract the JSON array/object span.
///
/// Never fails: when no bracketed span exists the trimmed, unfenced input is
/// returned and the caller's JSON parse reports the problem.
pub fn clean_json_response(raw: &str) -> String {
    let unfenced = fence_pattern().replace_all(raw.trim(), "");

    let span = json_span_pattern()
        .find(&unfenced)
        .map(|m| m.as_str())
        .unwrap_or(&unfenced);

    span.trim().to_string()
}
