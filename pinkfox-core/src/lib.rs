//! pinkfox-core: shared types for the PinkFox companion engine
//!
//! Leaf crate holding what every other member needs:
//! - The workspace error hub
//! - The response payload produced by the chat backend
//! - The expression catalog (name -> model parameter id)
//! - The in-memory conversation log

pub mod catalog;
pub mod conversation;
pub mod error;
pub mod payload;

pub use catalog::{ExpressionCatalog, ExpressionDef};
pub use conversation::{ConversationLog, ConversationTurn};
pub use error::Error;
pub use payload::ResponsePayload;
