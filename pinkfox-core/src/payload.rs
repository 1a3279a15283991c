//! Response payload consumed by the playback engine

use serde::{Deserialize, Serialize};

/// One chat turn's worth of playback input: reply text, optional
/// base64-encoded speech clip, optional expression tag.
///
/// Immutable after construction. The backend sends `""` for `audio` when
/// TTS is disabled and may omit `expression`; both normalize to `None` so
/// downstream code only has one "absent" shape to deal with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponsePayload {
    /// Reply text shown through the reveal scheduler
    pub text: String,

    /// Base64-encoded audio clip (complete file, not a stream)
    pub audio: Option<String>,

    /// Expression tag looked up in the catalog
    pub expression: Option<String>,
}

impl ResponsePayload {
    /// Build a payload, normalizing blank optional fields to `None`
    pub fn new(
        text: impl Into<String>,
        audio: Option<String>,
        expression: Option<String>,
    ) -> Self {
        Self {
            text: text.into(),
            audio: audio.filter(|a| !a.trim().is_empty()),
            expression: expression.filter(|e| !e.trim().is_empty()),
        }
    }

    /// Text-only payload
    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(text, None, None)
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optionals_normalize_to_none() {
        let payload = ResponsePayload::new("hi", Some(String::new()), Some("  ".to_string()));
        assert_eq!(payload.audio, None);
        assert_eq!(payload.expression, None);
        assert!(!payload.has_audio());
    }

    #[test]
    fn populated_optionals_survive() {
        let payload = ResponsePayload::new(
            "hi",
            Some("AAAA".to_string()),
            Some("吐舌".to_string()),
        );
        assert_eq!(payload.audio.as_deref(), Some("AAAA"));
        assert_eq!(payload.expression.as_deref(), Some("吐舌"));
        assert!(payload.has_audio());
    }
}
