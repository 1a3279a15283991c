//! Error types for pinkfox-stage

use thiserror::Error;

/// Playback engine errors
#[derive(Error, Debug)]
pub enum StageError {
    /// Tag not in the expression catalog; logged and ignored, never fatal
    #[error("Unknown expression: {0}")]
    UnknownExpression(String),

    /// Payload carries no audio; text-only playback proceeds
    #[error("No audio in payload")]
    EmptyAudio,

    /// `play` called while a clip is in flight. Indicates a broken
    /// cancellation order upstream, not a user-facing condition.
    #[error("Playback already in progress")]
    PlaybackBusy,

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Renderer error: {0}")]
    Renderer(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chat error: {0}")]
    Chat(#[from] pinkfox_chat::ChatError),
}

impl From<StageError> for pinkfox_core::Error {
    fn from(err: StageError) -> Self {
        pinkfox_core::Error::Stage(err.to_string())
    }
}
