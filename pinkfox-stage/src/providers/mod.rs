//! Renderer provider implementations

pub mod channel;
pub use channel::{ChannelRenderer, RendererCommand};

pub mod null;
pub use null::NullRenderer;
