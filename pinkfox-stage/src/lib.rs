//! pinkfox-stage: the synchronized response playback engine
//!
//! Given one chat reply (text, optional base64 speech clip, optional
//! expression tag), this crate plays the clip, drives the avatar's
//! expression in lockstep with it, and reveals the text in reading-paced
//! segments. Every piece is interruptible: a new turn cleanly supersedes
//! all timers, audio, and expression state of the previous one.
//!
//! - [`expression::ExpressionState`]: mutually-exclusive expression flags
//! - [`audio::AudioPlaybackController`]: decode-and-play with a single
//!   completion signal, over pluggable [`engines`]
//! - [`reveal::TextRevealScheduler`]: segment reveal on a fixed cadence
//! - [`orchestrator::ResponseOrchestrator`]: the coordinating state machine

pub mod audio;
pub mod config;
pub mod engines;
pub mod error;
pub mod expression;
pub mod orchestrator;
pub mod providers;
pub mod renderer;
pub mod reveal;

pub use audio::{AudioPlaybackController, PlaybackCompletion};
pub use config::StageConfig;
pub use engines::{AudioEngine, ClipControl, PlaybackOutcome};
#[cfg(feature = "audio")]
pub use engines::RodioEngine;
pub use error::StageError;
pub use expression::{Activation, ExpressionState};
pub use orchestrator::{ResponseOrchestrator, TurnState, EXPRESSION_LINGER};
pub use providers::{ChannelRenderer, NullRenderer, RendererCommand};
pub use renderer::ModelRenderer;
pub use reveal::{RevealEvent, TextRevealScheduler, SEGMENT_INTERVAL};
