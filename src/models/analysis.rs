//! Analysis Result Models
//!
//! What the three analysis operations hand back to the caller. These are also
//! the shapes written to disk by the CLI and read back by `pairs`.

use serde::{Deserialize, Serialize};

use tagmend_core::{Category, CoverageWarning, RenameSuggestion, SimilarityGroup};

/// Result of a similarity analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub groups: Vec<SimilarityGroup>,
    /// Present only for a deep analysis that looks cut short
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<CoverageWarning>,
}

/// Result of a rename analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameReport {
    pub suggestions: Vec<RenameSuggestion>,
}

/// Result of a categorization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub categories: Vec<Category>,
}

/// Any saved analysis report, told apart by its top-level key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisReport {
    Similarity(SimilarityReport),
    Rename(RenameReport),
    Category(CategoryReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_without_warning_omits_key() {
        let report = SimilarityReport::default();
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"groups":[]}"#);
    }

    #[test]
    fn test_untagged_report_detection() {
        let similarity: AnalysisReport = serde_json::from_str(
            r#"{"groups":[{"group":["A","a"],"suggested_name":"A","reason":"Case"}]}"#,
        )
        .unwrap();
        match similarity {
            AnalysisReport::Similarity(report) => assert_eq!(report.groups[0].members, vec!["A", "a"]),
            other => panic!("unexpected report: {:?}", other),
        }

        let rename: AnalysisReport = serde_json::from_str(
            r#"{"suggestions":[{"old_name":"todo","new_name":"To Do","reason":"Casing"}]}"#,
        )
        .unwrap();
        assert!(matches!(rename, AnalysisReport::Rename(_)));

        let category: AnalysisReport =
            serde_json::from_str(r#"{"categories":[{"category":"Work","tags":["Meeting"]}]}"#)
                .unwrap();
        assert!(matches!(category, AnalysisReport::Category(_)));
    }
}
