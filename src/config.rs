use std::time::Duration;

use serde::Deserialize;

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the recommendation server
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Path prefix for user-id suggestions; the typed text is appended
    #[serde(default = "default_users_search_prefix")]
    pub users_search_prefix: String,

    /// Path prefix for ISBN suggestions; the typed text is appended
    #[serde(default = "default_books_search_prefix")]
    pub books_search_prefix: String,

    /// Quiet period before a suggestion query is issued
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Shortest text (in characters) worth querying suggestions for
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Result count used when the k field is left blank
    #[serde(default = "default_k")]
    pub default_k: i64,

    /// Cover shown for books without an image
    #[serde(default = "default_placeholder_image_url")]
    pub placeholder_image_url: String,

    /// Optional transport timeout; unset means requests never time out
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_users_search_prefix() -> String {
    "/api/search/users/".to_string()
}

fn default_books_search_prefix() -> String {
    "/api/search/books/".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_query_chars() -> usize {
    2
}

fn default_k() -> i64 {
    5
}

fn default_placeholder_image_url() -> String {
    "https://via.placeholder.com/60x90?text=No+Cover".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            users_search_prefix: default_users_search_prefix(),
            books_search_prefix: default_books_search_prefix(),
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
            default_k: default_k(),
            placeholder_image_url: default_placeholder_image_url(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_behavior() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();

        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.min_query_chars, 2);
        assert_eq!(config.default_k, 5);
        assert_eq!(config.users_search_prefix, "/api/search/users/");
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_overrides_from_environment() {
        let vars = vec![
            ("API_BASE_URL".to_string(), "http://books.local".to_string()),
            ("DEBOUNCE_MS".to_string(), "150".to_string()),
            ("REQUEST_TIMEOUT_SECS".to_string(), "10".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.api_base_url, "http://books.local");
        assert_eq!(config.debounce(), Duration::from_millis(150));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
    }
}
