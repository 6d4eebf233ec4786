//! Analysis Prompts
//!
//! Prompt builders for the three analysis operations. Each one numbers or
//! lists the tags and spells out the exact JSON shape expected back.

use tagmend_core::TagRecord;

use super::batch::expected_group_count;

/// Fixed prompt for the provider connection check.
pub const CONNECTION_TEST_PROMPT: &str = "Say 'OK' if you can read this message.";

/// Output ceiling for the connection check.
pub const CONNECTION_TEST_MAX_TOKENS: u32 = 50;

/// `1. name` lines.
fn numbered_list(names: &[String]) -> String {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}", i + 1, name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extra instructions for a single-request deep analysis.
fn deep_instructions(tag_count: usize) -> String {
    format!(
        r#"DEEP ANALYSIS MODE - MAXIMUM THOROUGHNESS

You are given {count} tags. Find ALL similarities, not just the obvious ones.

1. Compare every tag with every other tag.
   - Prefer grouping too much over grouping too little.
   - IMPORTANT: every tag may appear in ONLY ONE group.

2. Look for every kind of similarity:
   - Spelling variants: "Organisation" / "Organization"
   - Singular/plural: "Order" / "Orders"
   - Typos and variants
   - Synonyms: "Error" / "Problem" / "Issue"
   - Related topics: "PayPal" / "Payment method" / "Payment"
   - Abbreviations: "PM" / "Project Management"
   - Multiple languages: "Invoice" / "Rechnung" / "Factura"
   - Compounds: "E-Mail-Management" / "Email Management" / "Mailmanagement"
   - Prefixes and suffixes: "Account settings" / "Account overview"

3. Group generously: if two tags are even remotely similar, group them.

4. No limits: write out EVERY group you find, including groups of only 2 tags.

EXPECTATION: for {count} tags I expect AT LEAST {expected} groups."#,
        count = tag_count,
        expected = expected_group_count(tag_count)
    )
}

/// Prompt asking for groups of duplicate tags.
pub fn build_similarity_prompt(names: &[String], deep: bool) -> String {
    let mode = if deep {
        deep_instructions(names.len())
    } else {
        "Analyze these tags and find pairs or groups of similar tags that should be merged."
            .to_string()
    };

    format!(
        r#"You are an assistant that manages tags in an email client.

Here is a list of {count} tags:
{list}

{mode}

Consider:
- Spelling variants (e.g. "Project", "Projects")
- Synonyms (e.g. "important", "priority", "high priority")
- Singular/plural (e.g. "Tag", "Tags")
- Upper/lower case
- Similar meanings and topics
- Abbreviations vs. long forms
- Different languages for the same concept (e.g. "Rechnung", "Invoice")

Answer in JSON with an object containing a "groups" array:
{{
  "groups": [
    {{
      "group": ["tag1", "tag2", "tag3"],
      "suggested_name": "recommended_name",
      "reason": "Short reason (3-5 words max)"
    }}
  ]
}}

Keep every "reason" to 3-5 words. Shorter reasons leave room for more groups.

Output JSON only, no additional explanation."#,
        count = names.len(),
        list = numbered_list(names),
        mode = mode
    )
}

/// Prompt asking for better names, one suggestion per tag worth renaming.
pub fn build_rename_prompt(names: &[String]) -> String {
    format!(
        r#"You are an assistant that improves email tags.

Here are the current tags:
{list}

Suggest a better, more consistent name for each tag where needed.
Consider:
- Uniform naming conventions
- Clarity and precision
- Consistent capitalization
- Avoiding special characters

Answer in JSON with an object containing a "suggestions" array:
{{
  "suggestions": [
    {{
      "old_name": "old_name",
      "new_name": "new_name",
      "reason": "Reason for the change"
    }}
  ]
}}

Only suggest changes that are genuinely useful. Output JSON only."#,
        list = numbered_list(names)
    )
}

/// Prompt asking for thematic categories. Usage counts give the model a hint
/// of which tags matter.
pub fn build_category_prompt(tags: &[TagRecord]) -> String {
    let list = tags
        .iter()
        .map(|tag| format!("- {} (used {}x)", tag.name, tag.usage_count))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Analyze these email tags and sort them into meaningful categories.

Tags (with usage count):
{list}

Create categories such as:
- Projects
- Priorities
- Status
- Topics
- People
etc.

Answer in JSON:
{{
  "categories": [
    {{
      "category": "Category name",
      "tags": ["tag1", "tag2"],
      "description": "Description of the category"
    }}
  ]
}}

Output JSON only."#,
        list = list
    )
}
