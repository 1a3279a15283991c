//! Error types for pinkfox-chat

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    /// Request never completed: network down, timeout, connection refused.
    /// The only chat failure surfaced to the user interface.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered, but not successfully
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatError {
    /// Transport-level failures are reported to the user; everything else
    /// is handled at the boundary where it occurs
    pub fn is_transport(&self) -> bool {
        matches!(self, ChatError::Transport(_))
    }
}

impl From<ChatError> for pinkfox_core::Error {
    fn from(err: ChatError) -> Self {
        pinkfox_core::Error::Chat(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
