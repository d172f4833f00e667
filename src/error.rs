//! Error types for spelldrill

use std::io;
use thiserror::Error;

/// Main error type for spelldrill
#[derive(Error, Debug)]
pub enum SpellError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Word list error: {0}")]
    WordList(String),

    #[error("No API key configured: {0}")]
    MissingCredential(String),

    #[error("Speech backend error: {0}")]
    Backend(String),

    #[error("Audio playback error: {0}")]
    Playback(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("{0}")]
    Other(String),
}

impl SpellError {
    /// True for errors that won't go away until the user fixes their
    /// configuration (missing/invalid credential, bad config value).
    /// The shell shows these as a persistent warning rather than a
    /// one-shot error message.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SpellError::Config(_) | SpellError::MissingCredential(_)
        )
    }
}

/// Result type alias for spelldrill operations
pub type Result<T> = std::result::Result<T, SpellError>;

impl From<String> for SpellError {
    fn from(s: String) -> Self {
        SpellError::Other(s)
    }
}

impl From<&str> for SpellError {
    fn from(s: &str) -> Self {
        SpellError::Other(s.to_string())
    }
}
