use std::fmt::Display;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    api::BookApi,
    config::Config,
    error::{AppError, AppResult},
    models::{
        ItemRecommendRequest, ItemRecommendResponse, UserRecommendRequest, UserRecommendResponse,
    },
    view::{ItemPanel, UserPanel, View, ViewState},
};

pub const INVALID_USER_ID: &str = "Please enter a valid user ID";
pub const INVALID_ISBN: &str = "Please enter a valid ISBN number";
pub const NO_USER_RECOMMENDATIONS: &str = "No recommendations found for this user";
pub const NO_SIMILAR_BOOKS: &str = "No similar books found for this ISBN";
pub const USER_FALLBACK_ERROR: &str = "Error getting recommendations";
pub const ITEM_FALLBACK_ERROR: &str = "Error finding similar books";

/// Which recommendation query a submit issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    User,
    Item,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::User => write!(f, "user-based"),
            Mode::Item => write!(f, "item-based"),
        }
    }
}

/// How a submit ended, from the page's point of view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Results were rendered; carries the resulting view state
    Rendered(ViewState),
    /// The request failed or came back empty; the message is on the error banner
    Failed(String),
    /// Input was invalid and no request was issued
    Rejected(String),
    /// A later submit was triggered before this one completed; nothing was applied
    Superseded,
}

/// Page state guarded as one unit so a generation check and the view update
/// it guards happen under the same lock
struct PageState {
    view: View,
    generation: u64,
}

/// Coordinates both recommendation flows and owns the displayed view
///
/// Every trigger starts a new generation. A request's completion is applied only
/// if no other trigger happened while it was in flight, so the view always
/// reflects the latest user action rather than whichever response arrived last.
#[derive(Clone)]
pub struct RecommendationController {
    api: Arc<dyn BookApi>,
    page: Arc<RwLock<PageState>>,
    default_k: i64,
    placeholder_image_url: String,
}

impl RecommendationController {
    pub fn new(api: Arc<dyn BookApi>, config: &Config) -> Self {
        Self {
            api,
            page: Arc::new(RwLock::new(PageState {
                view: View::new(),
                generation: 0,
            })),
            default_k: config.default_k,
            placeholder_image_url: config.placeholder_image_url.clone(),
        }
    }

    /// Snapshot of the displayed view
    pub async fn view(&self) -> View {
        self.page.read().await.view.clone()
    }

    pub async fn state(&self) -> ViewState {
        self.page.read().await.view.state()
    }

    /// Empty both panels and hide the error banner
    pub async fn clear_results(&self) {
        self.page.write().await.view.clear_results();
    }

    /// Request user-based recommendations for the id typed in the user field
    pub async fn submit_user(&self, user_id: &str, k: &str) -> SubmitOutcome {
        let user_id = user_id.trim();
        let k = parse_k(k, self.default_k);

        let generation = match self.begin(Mode::User, user_id, INVALID_USER_ID).await {
            Some(generation) => generation,
            None => return SubmitOutcome::Rejected(INVALID_USER_ID.to_string()),
        };

        let request = UserRecommendRequest {
            user_id: user_id.to_string(),
            k,
        };
        tracing::info!(
            mode = %Mode::User,
            user_id = %request.user_id,
            k,
            generation,
            "Requesting recommendations"
        );

        let result = self
            .api
            .recommend_by_user(&request)
            .await
            .and_then(|response| self.user_panel(response));

        self.complete(Mode::User, generation, result, |view, panel| {
            view.show_user(panel)
        })
        .await
    }

    /// Request item-based recommendations for the ISBN typed in the book field
    pub async fn submit_item(&self, isbn: &str, k: &str) -> SubmitOutcome {
        let isbn = isbn.trim();
        let k = parse_k(k, self.default_k);

        let generation = match self.begin(Mode::Item, isbn, INVALID_ISBN).await {
            Some(generation) => generation,
            None => return SubmitOutcome::Rejected(INVALID_ISBN.to_string()),
        };

        let request = ItemRecommendRequest {
            isbn: isbn.to_string(),
            k,
        };
        tracing::info!(
            mode = %Mode::Item,
            isbn = %request.isbn,
            k,
            generation,
            "Requesting recommendations"
        );

        let result = self
            .api
            .recommend_by_item(&request)
            .await
            .and_then(|response| self.item_panel(response));

        self.complete(Mode::Item, generation, result, |view, panel| {
            view.show_item(panel)
        })
        .await
    }

    /// Start a new generation. Invalid input shows `invalid_message` and returns
    /// `None`; otherwise the result area is cleared before the request goes out.
    async fn begin(&self, mode: Mode, identifier: &str, invalid_message: &str) -> Option<u64> {
        let mut page = self.page.write().await;
        page.generation += 1;

        if identifier.is_empty() {
            tracing::debug!(mode = %mode, "Rejected submit with empty identifier");
            page.view.show_error(invalid_message);
            return None;
        }

        page.view.clear_results();
        Some(page.generation)
    }

    async fn complete<P>(
        &self,
        mode: Mode,
        generation: u64,
        result: AppResult<P>,
        show: impl FnOnce(&mut View, P),
    ) -> SubmitOutcome {
        let mut page = self.page.write().await;
        if page.generation != generation {
            tracing::debug!(
                mode = %mode,
                generation,
                latest = page.generation,
                "Dropping superseded response"
            );
            return SubmitOutcome::Superseded;
        }

        match result {
            Ok(panel) => {
                show(&mut page.view, panel);
                SubmitOutcome::Rendered(page.view.state())
            }
            Err(e) => {
                tracing::warn!(mode = %mode, error = %e, "Recommendation request failed");
                let message = e.user_message();
                page.view.show_error(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn user_panel(&self, response: UserRecommendResponse) -> AppResult<UserPanel> {
        if !response.success {
            return Err(AppError::Server(server_message(response.error, USER_FALLBACK_ERROR)));
        }
        if response.recommendations.is_empty() {
            return Err(AppError::NotFound(NO_USER_RECOMMENDATIONS.to_string()));
        }
        Ok(UserPanel::from_response(&response, &self.placeholder_image_url))
    }

    fn item_panel(&self, response: ItemRecommendResponse) -> AppResult<ItemPanel> {
        if !response.success {
            return Err(AppError::Server(server_message(response.error, ITEM_FALLBACK_ERROR)));
        }
        if response.recommendations.is_empty() {
            return Err(AppError::NotFound(NO_SIMILAR_BOOKS.to_string()));
        }
        Ok(ItemPanel::from_response(&response, &self.placeholder_image_url))
    }
}

fn server_message(error: Option<String>, fallback: &str) -> String {
    error
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Read the k field: blank means `default_k`, otherwise the leading integer
/// (surrounding whitespace and trailing junk ignored, so "7.5" is 7)
pub fn parse_k(raw: &str, default_k: i64) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default_k;
    }

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    match unsigned[..end].parse::<i64>() {
        Ok(k) if negative => -k,
        Ok(k) => k,
        Err(_) => {
            tracing::warn!(input = %raw, default_k, "Unreadable k, using default");
            default_k
        }
    }
}
