//! pinkfox-chat: client for the companion's chat backend
//!
//! Speaks the `/api/chat` contract: `{message, session_id}` in,
//! `{message, audio?, expression?}` out. The transport seam is the
//! [`ChatBackend`] trait so the playback engine can be driven by a fake
//! in tests.

pub mod client;
pub mod config;
pub mod error;

pub use client::{ChatBackend, ChatRequest, ChatResponse, HttpChatClient};
pub use config::ChatConfig;
pub use error::{ChatError, Result};
