//! Shared configuration and error types for the chatbot workspace.

pub mod config;
pub mod error;

pub use config::{ChatbotConfig, GeneralConfig, LocalizationConfig, PgrConfig};
pub use error::{ChatbotError, Result};
