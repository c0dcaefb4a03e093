use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod recommendation;

pub use recommendation::{
    ItemRecommendRequest, ItemRecommendResponse, SimilarBook, SimilarUser, SourceBook,
    UserRecommendRequest, UserRecommendResponse, UserRecommendation,
};

/// Identifier as the server sends it: user ids arrive as JSON numbers or strings,
/// ISBNs as strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(serde_json::Number),
    Text(String),
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identifier::Number(n) => write!(f, "{}", n),
            Identifier::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Which field a suggestion feed serves; selects the identifier shown per hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    UserId,
    Isbn,
}

impl Display for FieldRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldRole::UserId => write!(f, "user-id"),
            FieldRole::Isbn => write!(f, "book-isbn"),
        }
    }
}

// ============================================================================
// Search API Types
// ============================================================================

/// Response from GET {prefix}{partial}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// One search hit; user searches fill `user_id`, book searches fill `isbn`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub user_id: Option<Identifier>,
    #[serde(default)]
    pub isbn: Option<Identifier>,
}

impl SearchHit {
    /// Displayable value for the given field role
    pub fn value_for(&self, role: FieldRole) -> Option<String> {
        let id = match role {
            FieldRole::UserId => self.user_id.as_ref(),
            FieldRole::Isbn => self.isbn.as_ref(),
        };
        id.map(Identifier::to_string)
    }
}

/// Body of a failed response (non-2xx)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_hit_selects_value_by_role() {
        let response: SearchResponse = serde_json::from_value(json!({
            "results": [{ "user_id": 276725 }, { "user_id": "276726" }]
        }))
        .unwrap();

        let values: Vec<_> = response
            .results
            .iter()
            .filter_map(|hit| hit.value_for(FieldRole::UserId))
            .collect();
        assert_eq!(values, vec!["276725", "276726"]);
        assert_eq!(response.results[0].value_for(FieldRole::Isbn), None);
    }

    #[test]
    fn test_isbn_keeps_leading_zeros() {
        let hit: SearchHit = serde_json::from_value(json!({ "isbn": "0195153448" })).unwrap();
        assert_eq!(hit.value_for(FieldRole::Isbn).as_deref(), Some("0195153448"));
    }

    #[test]
    fn test_missing_results_is_empty() {
        let response: SearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.results.is_empty());
    }
}
