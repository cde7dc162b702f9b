use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum QuranError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed upstream response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Request to {url} timed out after {after:?}")]
    Timeout { url: String, after: Duration },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("All {attempts} content sources failed")]
    AllSourcesExhausted { attempts: usize },

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<url::ParseError> for QuranError {
    fn from(err: url::ParseError) -> Self {
        QuranError::InvalidRequest(err.to_string())
    }
}

/// Input rejected locally, before any request is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No chapter selected")]
    NoChapterSelected,

    #[error("Verse {verse} is outside 1..={verse_count}")]
    VerseOutOfRange { verse: u32, verse_count: u32 },

    #[error("Search word is empty")]
    EmptyWord,

    #[error("Unknown chapter: {0}")]
    UnknownChapter(u32),
}

impl QuranError {
    /// Transport failure, non-2xx status or undecodable body.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            QuranError::Http(_)
                | QuranError::Status { .. }
                | QuranError::Malformed(_)
                | QuranError::Timeout { .. }
                | QuranError::Transport(_)
        )
    }

    /// Message suitable for showing to the user in place of a result.
    pub fn user_message(&self) -> String {
        match self {
            QuranError::Validation(ValidationError::NoChapterSelected) => {
                "Please select a chapter first.".to_string()
            }
            QuranError::Validation(ValidationError::VerseOutOfRange { verse_count, .. }) => {
                format!("Verse number must be between 1 and {}.", verse_count)
            }
            QuranError::Validation(ValidationError::EmptyWord) => {
                "Please enter a word to analyze.".to_string()
            }
            QuranError::Validation(ValidationError::UnknownChapter(number)) => {
                format!("There is no chapter number {}.", number)
            }
            QuranError::Http(e) if e.is_timeout() => {
                "The request timed out. The server might be slow right now.".to_string()
            }
            QuranError::Http(e) if e.is_connect() || e.is_request() => {
                "Connection error. Please check your internet connection and try again."
                    .to_string()
            }
            QuranError::Timeout { .. } => {
                "The request timed out. The server might be slow right now.".to_string()
            }
            QuranError::Malformed(_) | QuranError::Transport(_) => {
                "Received an unexpected response format from the server.".to_string()
            }
            QuranError::Http(_) | QuranError::Status { .. } => {
                "A network error occurred. Please try again later.".to_string()
            }
            QuranError::AllSourcesExhausted { .. } => {
                "The analysis source could not be reached through any relay. \
                 Please try again in a few minutes or open the source page directly."
                    .to_string()
            }
            QuranError::InvalidRequest(_) => "The request could not be built.".to_string(),
            QuranError::Config(e) => format!("Configuration problem: {}", e),
            QuranError::Io(e) => format!("File error: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuranError>;
