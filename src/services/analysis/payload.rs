//! Response Payloads
//!
//! The JSON shapes a cleaned model reply may take. Each operation accepts its
//! documented wrapper object (`{"groups": [...]}` and so on) and, for
//! providers that leave the wrapper out, a bare array of items.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use tagmend_core::{Category, RenameSuggestion, SimilarityGroup};

/// A reply shape that yields a list of items.
pub trait ResponsePayload: DeserializeOwned {
    type Item;

    fn into_items(self) -> Vec<Self::Item>;
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GroupsPayload {
    Wrapped { groups: Vec<SimilarityGroup> },
    Bare(Vec<SimilarityGroup>),
}

impl ResponsePayload for GroupsPayload {
    type Item = SimilarityGroup;

    fn into_items(self) -> Vec<SimilarityGroup> {
        match self {
            GroupsPayload::Wrapped { groups } | GroupsPayload::Bare(groups) => groups,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SuggestionsPayload {
    Wrapped { suggestions: Vec<RenameSuggestion> },
    Bare(Vec<RenameSuggestion>),
}

impl ResponsePayload for SuggestionsPayload {
    type Item = RenameSuggestion;

    fn into_items(self) -> Vec<RenameSuggestion> {
        match self {
            SuggestionsPayload::Wrapped { suggestions } | SuggestionsPayload::Bare(suggestions) => {
                suggestions
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CategoriesPayload {
    Wrapped { categories: Vec<Category> },
    Bare(Vec<Category>),
}

impl ResponsePayload for CategoriesPayload {
    type Item = Category;

    fn into_items(self) -> Vec<Category> {
        match self {
            CategoriesPayload::Wrapped { categories } | CategoriesPayload::Bare(categories) => {
                categories
            }
        }
    }
}

/// Parse a cleaned reply into the items of payload `P`.
///
/// Syntax errors keep serde's position information; valid JSON of the wrong
/// shape is an error too.
pub fn parse_payload<P: ResponsePayload>(cleaned: &str) -> Result<Vec<P::Item>, serde_json::Error> {
    serde_json::from_str::<P>(cleaned).map(P::into_items)
}
