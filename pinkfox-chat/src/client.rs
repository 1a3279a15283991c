//! Chat backend client

use crate::config::ChatConfig;
use crate::error::{ChatError, Result};
use async_trait::async_trait;
use pinkfox_core::ResponsePayload;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Request body for `POST /api/chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

/// Response body from `POST /api/chat`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    /// Base64 audio clip; the backend sends `""` when TTS is disabled
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub expression: Option<String>,
}

impl From<ChatResponse> for ResponsePayload {
    fn from(response: ChatResponse) -> Self {
        ResponsePayload::new(response.message, response.audio, response.expression)
    }
}

/// Seam between the playback engine and whatever produces replies
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one user message, get one reply payload
    async fn chat(&self, message: &str) -> Result<ResponsePayload>;
}

/// HTTP client for the companion's chat backend
pub struct HttpChatClient {
    client: Client,
    endpoint: String,
    session_id: String,
}

impl HttpChatClient {
    pub fn new(config: ChatConfig) -> Result<Self> {
        config.validate().map_err(ChatError::Config)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ChatError::Transport)?;

        let endpoint = format!("{}/api/chat", config.base_url.trim_end_matches('/'));
        let session_id = config
            .session_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        info!(endpoint = %endpoint, session_id = %session_id, "chat client ready");
        Ok(Self {
            client,
            endpoint,
            session_id,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

#[async_trait]
impl ChatBackend for HttpChatClient {
    async fn chat(&self, message: &str) -> Result<ResponsePayload> {
        let request = ChatRequest {
            message: message.to_string(),
            session_id: self.session_id.clone(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Backend(format!(
                "chat endpoint returned {}",
                status
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

        debug!(
            reply_len = body.message.len(),
            has_audio = body.audio.as_deref().map_or(false, |a| !a.is_empty()),
            expression = body.expression.as_deref().unwrap_or(""),
            "chat reply received"
        );
        Ok(body.into())
    }
}
