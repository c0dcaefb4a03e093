use std::time::Duration;

use reqwest::{header::ACCEPT, Client as HttpClient};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    api::{
        new_request_id, BookApi, ITEM_RECOMMEND_PATH, REQUEST_ID_HEADER, USER_RECOMMEND_PATH,
    },
    error::{AppError, AppResult, REQUEST_FAILED},
    models::{
        ErrorBody, ItemRecommendRequest, ItemRecommendResponse, SearchResponse,
        UserRecommendRequest, UserRecommendResponse,
    },
};

/// reqwest-backed client for the recommendation server
#[derive(Clone)]
pub struct HttpBookApi {
    http_client: HttpClient,
    base_url: String,
}

impl HttpBookApi {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let base_url = base_url.into();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::InvalidUrl(base_url));
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Suggestion URL: the prefix with the typed text appended, percent-encoded
    pub fn search_url(&self, prefix: &str, text: &str) -> String {
        format!("{}{}", self.url(prefix), urlencoding::encode(text))
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> AppResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request_id = new_request_id();
        let response = self
            .http_client
            .post(self.url(path))
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, &request_id)
            .json(body)
            .send()
            .await?;

        tracing::debug!(
            endpoint = %path,
            request_id = %request_id,
            status = %response.status(),
            "Recommendation response received"
        );

        parse_response(response).await
    }
}

/// Decode a 2xx body, or turn a failed response into [`AppError::Http`]
async fn parse_response<R>(response: reqwest::Response) -> AppResult<R>
where
    R: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Http {
            status,
            message: error_message(&body),
        });
    }

    Ok(response.json().await?)
}

/// `error` field of a failure body, or the generic fallback
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| REQUEST_FAILED.to_string())
}

#[async_trait::async_trait]
impl BookApi for HttpBookApi {
    async fn search(&self, prefix: &str, text: &str) -> AppResult<SearchResponse> {
        let url = self.search_url(prefix, text);
        let response = self
            .http_client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let results: SearchResponse = parse_response(response).await?;

        tracing::debug!(
            prefix = %prefix,
            query = %text,
            results = results.results.len(),
            "Suggestion search completed"
        );

        Ok(results)
    }

    async fn recommend_by_user(
        &self,
        request: &UserRecommendRequest,
    ) -> AppResult<UserRecommendResponse> {
        self.post_json(USER_RECOMMEND_PATH, request).await
    }

    async fn recommend_by_item(
        &self,
        request: &ItemRecommendRequest,
    ) -> AppResult<ItemRecommendResponse> {
        self.post_json(ITEM_RECOMMEND_PATH, request).await
    }
}
