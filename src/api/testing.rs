//! Scripted [`BookApi`] for exercising timing and ordering in unit tests

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
    time::Duration,
};

use crate::{
    api::BookApi,
    error::{AppError, AppResult},
    models::{
        Identifier, ItemRecommendRequest, ItemRecommendResponse, SearchHit, SearchResponse,
        UserRecommendRequest, UserRecommendResponse,
    },
};

type Scripted<T> = VecDeque<(Duration, AppResult<T>)>;

/// Answers searches with `{text}0`, `{text}1` after a per-query delay, and
/// recommendation calls from queued responses
#[derive(Default)]
pub(crate) struct ScriptedApi {
    search_delays: HashMap<String, Duration>,
    failing_searches: Vec<String>,
    pub search_calls: Mutex<Vec<(String, String)>>,
    user_responses: Mutex<Scripted<UserRecommendResponse>>,
    item_responses: Mutex<Scripted<ItemRecommendResponse>>,
    pub user_requests: Mutex<Vec<UserRecommendRequest>>,
    pub item_requests: Mutex<Vec<ItemRecommendRequest>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_delay(mut self, text: &str, delay: Duration) -> Self {
        self.search_delays.insert(text.to_string(), delay);
        self
    }

    pub fn with_failing_search(mut self, text: &str) -> Self {
        self.failing_searches.push(text.to_string());
        self
    }

    pub fn push_user(&self, delay: Duration, response: AppResult<UserRecommendResponse>) {
        self.user_responses
            .lock()
            .unwrap()
            .push_back((delay, response));
    }

    pub fn push_item(&self, delay: Duration, response: AppResult<ItemRecommendResponse>) {
        self.item_responses
            .lock()
            .unwrap()
            .push_back((delay, response));
    }

    pub fn searched_texts(&self) -> Vec<String> {
        self.search_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl BookApi for ScriptedApi {
    async fn search(&self, prefix: &str, text: &str) -> AppResult<SearchResponse> {
        self.search_calls
            .lock()
            .unwrap()
            .push((prefix.to_string(), text.to_string()));

        let delay = self.search_delays.get(text).copied().unwrap_or_default();
        tokio::time::sleep(delay).await;

        if self.failing_searches.iter().any(|t| t == text) {
            return Err(AppError::Server("search index unavailable".to_string()));
        }

        let results = (0..2)
            .map(|i| {
                let id = Identifier::Text(format!("{}{}", text, i));
                SearchHit {
                    user_id: Some(id.clone()),
                    isbn: Some(id),
                }
            })
            .collect();
        Ok(SearchResponse { results })
    }

    async fn recommend_by_user(
        &self,
        request: &UserRecommendRequest,
    ) -> AppResult<UserRecommendResponse> {
        self.user_requests.lock().unwrap().push(request.clone());
        let (delay, response) = self
            .user_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted user response");
        tokio::time::sleep(delay).await;
        response
    }

    async fn recommend_by_item(
        &self,
        request: &ItemRecommendRequest,
    ) -> AppResult<ItemRecommendResponse> {
        self.item_requests.lock().unwrap().push(request.clone());
        let (delay, response) = self
            .item_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted item response");
        tokio::time::sleep(delay).await;
        response
    }
}
