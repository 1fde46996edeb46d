use thiserror::Error;

/// Top-level error type for the chatbot workspace.
///
/// Feature crates define their own error types and implement
/// `From<ChatbotError>` so that `?` works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ChatbotError {
    fn from(err: toml::de::Error) -> Self {
        ChatbotError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ChatbotError {
    fn from(err: toml::ser::Error) -> Self {
        ChatbotError::Config(err.to_string())
    }
}

/// A specialized `Result` type for chatbot operations.
pub type Result<T> = std::result::Result<T, ChatbotError>;
