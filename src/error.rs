use reqwest::StatusCode;

/// Message used when a failed response carries no readable `error` field
pub const REQUEST_FAILED: &str = "Request failed";

/// Client-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Http { status: StatusCode, message: String },

    #[error("Server error: {0}")]
    Server(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl AppError {
    /// Text shown on the error surface for this failure
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg)
            | AppError::Server(msg)
            | AppError::NotFound(msg)
            | AppError::Http { message: msg, .. } => msg.clone(),
            AppError::HttpClient(_) | AppError::InvalidUrl(_) => self.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
