//! Configuration for the chat backend client

use serde::{Deserialize, Serialize};
use url::Url;

/// Chat backend client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Backend base URL; the chat endpoint lives at `{base_url}/api/chat`
    pub base_url: String,

    /// Fixed session id. `None` means generate a random one per client.
    pub session_id: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            session_id: Some("default".to_string()),
            timeout_secs: 30,
        }
    }
}

impl ChatConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("Base URL cannot be empty".to_string());
        }
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid base URL: {}", e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("Base URL must use http or https".to_string());
        }

        if !(1..=300).contains(&self.timeout_secs) {
            return Err("Timeout must be between 1 and 300 seconds".to_string());
        }

        if let Some(ref session_id) = self.session_id {
            if session_id.is_empty() {
                return Err("Session id cannot be empty if provided".to_string());
            }
            if session_id.len() > 128 {
                return Err("Session id too long (max 128 chars)".to_string());
            }
            if session_id.chars().any(|c| c.is_control()) {
                return Err("Session id contains invalid characters".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ChatConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_url() {
        let mut config = ChatConfig::default();
        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_timeout() {
        let mut config = ChatConfig::default();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.timeout_secs = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_session_id() {
        let mut config = ChatConfig::default();
        config.session_id = Some(String::new());
        assert!(config.validate().is_err());
        config.session_id = Some("a\0b".to_string());
        assert!(config.validate().is_err());
        config.session_id = None;
        assert!(config.validate().is_ok());
    }
}
