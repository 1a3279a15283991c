//! Audio decode-and-play pipeline

use crate::engines::{AudioEngine, ClipControl, PlaybackOutcome};
use crate::error::StageError;
use base64::{engine::general_purpose, Engine as _};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Single-fire completion signal for one clip
pub type PlaybackCompletion = oneshot::Receiver<PlaybackOutcome>;

struct ActiveClip {
    control: ClipControl,
    finished: Arc<AtomicBool>,
}

/// Plays at most one clip at a time.
///
/// Decode failures (bad base64, bad codec data, no output device) resolve
/// the returned completion as `Failed` rather than erroring out of `play`,
/// so the caller wires the same follow-up for success and failure and the
/// avatar never gets stuck mid-expression behind a broken clip.
pub struct AudioPlaybackController {
    engine: Arc<dyn AudioEngine>,
    active: Mutex<Option<ActiveClip>>,
}

impl AudioPlaybackController {
    pub fn new(engine: Arc<dyn AudioEngine>) -> Self {
        Self {
            engine,
            active: Mutex::new(None),
        }
    }

    /// Decode a base64-encoded clip and start playing it.
    ///
    /// Fails fast with `EmptyAudio` when there is nothing to play; the
    /// caller treats that as "no audio for this turn", and no transient
    /// resource is created. `PlaybackBusy` means `cancel` was skipped
    /// before starting a new turn, which the orchestrator never does.
    pub fn play(&self, audio_b64: &str) -> Result<PlaybackCompletion, StageError> {
        let encoded = audio_b64.trim();
        if encoded.is_empty() {
            return Err(StageError::EmptyAudio);
        }

        let mut active = self.active.lock();
        if active
            .as_ref()
            .map_or(false, |clip| !clip.finished.load(Ordering::Acquire))
        {
            return Err(StageError::PlaybackBusy);
        }

        let (completion_tx, completion_rx) = oneshot::channel();

        let clip = match general_purpose::STANDARD.decode(encoded) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "failed to decode base64 audio");
                let _ = completion_tx.send(PlaybackOutcome::Failed(format!(
                    "base64 decode error: {}",
                    e
                )));
                *active = None;
                return Ok(completion_rx);
            }
        };

        let (engine_tx, engine_rx) = oneshot::channel();
        let control = match self.engine.begin(clip.into(), engine_tx) {
            Ok(control) => control,
            Err(e) => {
                warn!(error = %e, "audio engine refused clip");
                let _ = completion_tx.send(PlaybackOutcome::Failed(e.to_string()));
                *active = None;
                return Ok(completion_rx);
            }
        };

        let finished = Arc::new(AtomicBool::new(false));
        let finished_flag = Arc::clone(&finished);
        tokio::spawn(async move {
            let outcome = match engine_rx.await {
                Ok(outcome) => outcome,
                // The engine dropped its sender: the clip was stopped mid-flight
                Err(_) => PlaybackOutcome::Failed("playback cancelled".to_string()),
            };
            finished_flag.store(true, Ordering::Release);
            match &outcome {
                PlaybackOutcome::Ended => debug!("clip finished"),
                PlaybackOutcome::Failed(reason) => warn!(reason = %reason, "clip failed"),
            }
            let _ = completion_tx.send(outcome);
        });

        *active = Some(ActiveClip { control, finished });
        Ok(completion_rx)
    }

    /// Stop any in-flight clip and release it; safe to call when idle
    pub fn cancel(&self) {
        let mut active = self.active.lock();
        if let Some(mut clip) = active.take() {
            clip.control.stop();
            debug!("playback cancelled");
        }
    }

    /// Whether a clip is currently playing (UI gating)
    pub fn is_playing(&self) -> bool {
        self.active
            .lock()
            .as_ref()
            .map_or(false, |clip| !clip.finished.load(Ordering::Acquire))
    }
}
