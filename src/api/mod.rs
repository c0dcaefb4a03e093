//! Recommendation server abstraction
//!
//! The controller and both suggestion feeds talk to the server only through
//! [`BookApi`], so tests can substitute a mock or a scripted fake for the HTTP
//! implementation.
use crate::{
    error::AppResult,
    models::{
        ItemRecommendRequest, ItemRecommendResponse, SearchResponse, UserRecommendRequest,
        UserRecommendResponse,
    },
};

pub mod http;
pub mod request_id;
#[cfg(test)]
pub(crate) mod testing;

pub use http::HttpBookApi;
pub use request_id::{new_request_id, REQUEST_ID_HEADER};

/// Path of the user-based recommendation endpoint
pub const USER_RECOMMEND_PATH: &str = "/api/user-based/recommend";
/// Path of the item-based recommendation endpoint
pub const ITEM_RECOMMEND_PATH: &str = "/api/item-based/recommend";

/// Trait for the recommendation server
///
/// Non-2xx responses surface as [`crate::error::AppError::Http`] carrying the
/// server's `error` text. A 2xx body with `success: false` is returned as-is;
/// interpreting it is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BookApi: Send + Sync {
    /// Fetch suggestion candidates from `{prefix}{text}`
    async fn search(&self, prefix: &str, text: &str) -> AppResult<SearchResponse>;

    /// Ask for recommendations from users similar to `request.user_id`
    async fn recommend_by_user(
        &self,
        request: &UserRecommendRequest,
    ) -> AppResult<UserRecommendResponse>;

    /// Ask for books similar to `request.isbn`
    async fn recommend_by_item(
        &self,
        request: &ItemRecommendRequest,
    ) -> AppResult<ItemRecommendResponse>;
}
