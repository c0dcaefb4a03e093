use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
};

use crate::{api::BookApi, config::Config, models::FieldRole};

/// Debounce and length thresholds for a suggestion feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSettings {
    pub debounce: Duration,
    pub min_query_chars: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_query_chars: 2,
        }
    }
}

impl From<&Config> for FeedSettings {
    fn from(config: &Config) -> Self {
        Self {
            debounce: config.debounce(),
            min_query_chars: config.min_query_chars,
        }
    }
}

/// Autocomplete source for one input field
///
/// Keystrokes are debounced; once the text has been quiet for
/// [`FeedSettings::debounce`] a search is issued against the feed's endpoint
/// prefix. In-flight searches are never aborted. Each issued search takes the
/// next sequence number and its response is applied only while that number is
/// still the latest issued, so a slow answer for an older prefix can't replace
/// the suggestions of a newer one.
#[derive(Clone)]
pub struct SuggestionFeed {
    inner: Arc<FeedInner>,
}

struct FeedInner {
    api: Arc<dyn BookApi>,
    role: FieldRole,
    endpoint_prefix: String,
    settings: FeedSettings,
    pending: Mutex<Option<JoinHandle<()>>>,
    latest_issued: AtomicU64,
    suggestions: watch::Sender<Vec<String>>,
}

impl SuggestionFeed {
    /// Attach a feed to the field playing `role`, querying `{endpoint_prefix}{text}`
    pub fn attach(
        api: Arc<dyn BookApi>,
        role: FieldRole,
        endpoint_prefix: impl Into<String>,
        settings: FeedSettings,
    ) -> Self {
        let (suggestions, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(FeedInner {
                api,
                role,
                endpoint_prefix: endpoint_prefix.into(),
                settings,
                pending: Mutex::new(None),
                latest_issued: AtomicU64::new(0),
                suggestions,
            }),
        }
    }

    pub fn role(&self) -> FieldRole {
        self.inner.role
    }

    /// Current suggestion list
    pub fn suggestions(&self) -> Vec<String> {
        self.inner.suggestions.borrow().clone()
    }

    /// Receiver notified every time the suggestion list is replaced
    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.inner.suggestions.subscribe()
    }

    /// Handle a text-change event; restarts the debounce timer
    pub async fn on_input(&self, text: &str) {
        let feed = self.clone();
        let text = text.to_string();
        let delay = self.inner.settings.debounce;

        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            feed.issue(text);
        });

        let mut pending = self.inner.pending.lock().await;
        if let Some(previous) = pending.replace(timer) {
            previous.abort();
        }
    }

    /// Runs once the field has been quiet for the debounce period
    fn issue(&self, text: String) {
        let inner = &self.inner;
        if text.chars().count() < inner.settings.min_query_chars {
            tracing::trace!(field = %inner.role, "Query too short, keeping suggestions");
            return;
        }

        let seq = inner.latest_issued.fetch_add(1, Ordering::SeqCst) + 1;
        let feed = self.clone();
        tokio::spawn(async move { feed.fetch(seq, text).await });
    }

    async fn fetch(&self, seq: u64, text: String) {
        let inner = &self.inner;
        let result = inner.api.search(&inner.endpoint_prefix, &text).await;

        match result {
            Ok(response) => {
                let latest = inner.latest_issued.load(Ordering::SeqCst);
                if seq != latest {
                    tracing::debug!(
                        field = %inner.role,
                        query = %text,
                        seq,
                        latest,
                        "Dropping stale suggestions"
                    );
                    return;
                }

                let values: Vec<String> = response
                    .results
                    .iter()
                    .filter_map(|hit| hit.value_for(inner.role))
                    .collect();

                tracing::debug!(
                    field = %inner.role,
                    query = %text,
                    suggestions = values.len(),
                    "Suggestions updated"
                );
                inner.suggestions.send_replace(values);
            }
            Err(e) => {
                tracing::warn!(
                    field = %inner.role,
                    query = %text,
                    error = %e,
                    "Suggestion fetch failed"
                );
            }
        }
    }
}
