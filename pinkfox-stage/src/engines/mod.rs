//! Pluggable audio output engines

use crate::error::StageError;
use bytes::Bytes;
use tokio::sync::oneshot;

#[cfg(feature = "audio")]
pub mod rodio;
#[cfg(feature = "audio")]
pub use self::rodio::RodioEngine;

/// Terminal result of one clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The clip played to its natural end
    Ended,
    /// Decode or playback-engine failure
    Failed(String),
}

/// Handle used to stop one in-flight clip
#[derive(Debug)]
pub struct ClipControl {
    stop: Option<oneshot::Sender<()>>,
}

impl ClipControl {
    pub fn new(stop: oneshot::Sender<()>) -> Self {
        Self { stop: Some(stop) }
    }

    /// Tell the engine to halt playback and release the clip; idempotent
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

/// One-clip-at-a-time audio output.
///
/// `begin` must not block: it hands the clip to the engine and returns a
/// stop handle. The engine owns the decoded resource for the clip's
/// lifetime and releases it exactly once, whether the clip completes,
/// fails, or is stopped. The terminal outcome is reported on `outcome`
/// unless the clip was stopped first, in which case the sender is dropped.
pub trait AudioEngine: Send + Sync {
    fn begin(
        &self,
        clip: Bytes,
        outcome: oneshot::Sender<PlaybackOutcome>,
    ) -> Result<ClipControl, StageError>;
}
