use serde::{Deserialize, Serialize};

use super::Identifier;

/// POST /api/user-based/recommend body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecommendRequest {
    pub user_id: String,
    pub k: i64,
}

/// POST /api/item-based/recommend body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecommendRequest {
    pub isbn: String,
    pub k: i64,
}

/// Neighbor user with its similarity to the requested user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarUser {
    pub user_id: Identifier,
    pub similarity: f64,
}

/// Book recommended from neighbor users' ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecommendation {
    pub isbn: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub predicted_score: f64,
    pub similarity: f64,
}

/// Book the item-based query started from
///
/// The server sends an empty object for books it has no metadata for, so every
/// field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceBook {
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Book similar to the source book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarBook {
    pub isbn: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub similarity: f64,
    pub avg_rating: f64,
}

/// Response from the user-based endpoint; failures carry `success: false`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecommendResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub similar_users: Vec<SimilarUser>,
    #[serde(default)]
    pub recommendations: Vec<UserRecommendation>,
}

/// Response from the item-based endpoint; failures carry `success: false`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecommendResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub source_book: SourceBook,
    #[serde(default)]
    pub recommendations: Vec<SimilarBook>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_body_deserializes_without_payload() {
        let response: UserRecommendResponse =
            serde_json::from_value(json!({ "success": false, "error": "User not found" }))
                .unwrap();

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("User not found"));
        assert!(response.recommendations.is_empty());
    }

    #[test]
    fn test_missing_success_reads_as_failure() {
        let response: UserRecommendResponse =
            serde_json::from_str(r#"{"error":"User not found"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("User not found"));

        let response: ItemRecommendResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.success);
    }

    #[test]
    fn test_item_response_with_empty_source_book() {
        let response: ItemRecommendResponse = serde_json::from_value(json!({
            "success": true,
            "source_book": {},
            "recommendations": [{
                "isbn": "0060928336",
                "title": "Divine Secrets of the Ya-Ya Sisterhood",
                "author": "Rebecca Wells",
                "similarity": 0.912,
                "avg_rating": 7.5
            }]
        }))
        .unwrap();

        assert_eq!(response.source_book, SourceBook::default());
        assert_eq!(response.recommendations[0].image_url, None);
        assert_eq!(response.recommendations[0].avg_rating, 7.5);
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(UserRecommendRequest {
            user_id: "276725".to_string(),
            k: 5,
        })
        .unwrap();
        assert_eq!(body, json!({ "user_id": "276725", "k": 5 }));
    }
}
