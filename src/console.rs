//! Line-oriented front end: the two input fields, the two submit actions and
//! the result area of the recommendation page, driven from text commands

use std::sync::Arc;

use crate::{
    api::BookApi,
    config::Config,
    error::{AppError, AppResult},
    models::FieldRole,
    services::{FeedSettings, RecommendationController, SubmitOutcome, SuggestionFeed},
    view::render::render_view,
};

pub const HELP: &str = "\
Commands:
  user <user-id> [k]     user-based recommendations
  item <isbn> [k]        books similar to <isbn>
  type-user <text>       type into the user-id field (suggestions follow)
  type-book <text>       type into the ISBN field (suggestions follow)
  show                   print the current results
  help                   this message
  quit                   exit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    User { user_id: String, k: String },
    Item { isbn: String, k: String },
    TypeUser(String),
    TypeBook(String),
    Show,
    Help,
    Quit,
}

/// Parse one input line. Missing identifiers are passed through empty so the
/// controller reports them the same way the page would.
pub fn parse_command(line: &str) -> AppResult<Command> {
    let line = line.trim_start();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest),
        None => (line.trim_end(), ""),
    };

    let mut args = rest.split_whitespace();
    let mut next_arg = || args.next().unwrap_or_default().to_string();

    match verb {
        "user" => Ok(Command::User {
            user_id: next_arg(),
            k: next_arg(),
        }),
        "item" => Ok(Command::Item {
            isbn: next_arg(),
            k: next_arg(),
        }),
        "type-user" => Ok(Command::TypeUser(rest.trim_end_matches(['\r', '\n']).to_string())),
        "type-book" => Ok(Command::TypeBook(rest.trim_end_matches(['\r', '\n']).to_string())),
        "show" => Ok(Command::Show),
        "help" | "" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(AppError::InvalidInput(format!("Unknown command: {}", other))),
    }
}

/// Composition root: one controller and one suggestion feed per input field
#[derive(Clone)]
pub struct Console {
    controller: RecommendationController,
    user_feed: SuggestionFeed,
    book_feed: SuggestionFeed,
}

impl Console {
    pub fn new(api: Arc<dyn BookApi>, config: &Config) -> Self {
        let settings = FeedSettings::from(config);
        Self {
            controller: RecommendationController::new(api.clone(), config),
            user_feed: SuggestionFeed::attach(
                api.clone(),
                FieldRole::UserId,
                config.users_search_prefix.clone(),
                settings,
            ),
            book_feed: SuggestionFeed::attach(
                api,
                FieldRole::Isbn,
                config.books_search_prefix.clone(),
                settings,
            ),
        }
    }

    pub fn feeds(&self) -> [&SuggestionFeed; 2] {
        [&self.user_feed, &self.book_feed]
    }

    /// Run a submit command; returns the rendered page unless a later submit
    /// superseded this one
    pub async fn submit(&self, command: Command) -> Option<String> {
        let outcome = match command {
            Command::User { user_id, k } => self.controller.submit_user(&user_id, &k).await,
            Command::Item { isbn, k } => self.controller.submit_item(&isbn, &k).await,
            _ => return None,
        };

        match outcome {
            SubmitOutcome::Superseded => None,
            _ => Some(render_view(&self.controller.view().await)),
        }
    }

    /// Handle a non-submit command; returns text to print
    pub async fn handle(&self, command: Command) -> String {
        match command {
            Command::TypeUser(text) => {
                self.user_feed.on_input(&text).await;
                String::new()
            }
            Command::TypeBook(text) => {
                self.book_feed.on_input(&text).await;
                String::new()
            }
            Command::Show => render_view(&self.controller.view().await),
            Command::Help => HELP.to_string(),
            Command::User { .. } | Command::Item { .. } => {
                self.submit(command).await.unwrap_or_default()
            }
            Command::Quit => String::new(),
        }
    }
}
