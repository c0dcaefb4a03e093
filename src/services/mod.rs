pub mod controller;
pub mod suggestions;

pub use controller::{parse_k, Mode, RecommendationController, SubmitOutcome};
pub use suggestions::{FeedSettings, SuggestionFeed};
