// src/errors.rs

use thiserror::Error;

/// Message shown when the remote call fails without saying why.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to generate content. Please check your API key and try again.";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("API_KEY environment variable is missing.")]
    MissingCredential,

    #[error("No content generated from the model.")]
    EmptyResponse,

    #[error("{0}")]
    Remote(String),

    #[error("{0} is required")]
    InvalidRequest(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    pub fn remote(msg: impl Into<String>) -> Self {
        ContentError::Remote(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        ContentError::Config(msg.into())
    }

    pub fn clipboard_error(msg: impl Into<String>) -> Self {
        ContentError::Clipboard(msg.into())
    }

    /// The text stored on a failed generation.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for ContentError {
    fn from(err: reqwest::Error) -> Self {
        ContentError::Remote(err.to_string())
    }
}

pub type ContentResult<T> = Result<T, ContentError>;
