//! rodio-backed audio engine
//!
//! Playback runs on a dedicated thread because rodio's `OutputStream` is
//! not Send/Sync; clips arrive over a bounded channel. A machine without
//! an output device still works: every clip is reported as failed instead
//! of panicking, which keeps text-only operation intact on headless hosts.

use super::{AudioEngine, ClipControl, PlaybackOutcome};
use crate::error::StageError;
use bytes::Bytes;
use std::io::Cursor;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// How often the playback thread polls for the stop signal
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(25);

struct PlayRequest {
    clip: Bytes,
    outcome: oneshot::Sender<PlaybackOutcome>,
    stop: oneshot::Receiver<()>,
}

/// Plays clips through the default output device
pub struct RodioEngine {
    requests: mpsc::SyncSender<PlayRequest>,
}

impl RodioEngine {
    /// Spawn the playback thread and return the engine
    pub fn new() -> Result<Self, StageError> {
        let (requests, receiver) = mpsc::sync_channel::<PlayRequest>(4);
        thread::Builder::new()
            .name("pinkfox-audio".to_string())
            .spawn(move || playback_thread(receiver))
            .map_err(|e| StageError::Playback(format!("failed to spawn audio thread: {}", e)))?;
        Ok(Self { requests })
    }
}

impl AudioEngine for RodioEngine {
    fn begin(
        &self,
        clip: Bytes,
        outcome: oneshot::Sender<PlaybackOutcome>,
    ) -> Result<ClipControl, StageError> {
        let (stop_tx, stop_rx) = oneshot::channel();
        self.requests
            .try_send(PlayRequest {
                clip,
                outcome,
                stop: stop_rx,
            })
            .map_err(|_| StageError::Playback("audio thread unavailable".to_string()))?;
        Ok(ClipControl::new(stop_tx))
    }
}

fn playback_thread(requests: mpsc::Receiver<PlayRequest>) {
    let output = match rodio::OutputStream::try_default() {
        Ok(pair) => Some(pair),
        Err(e) => {
            warn!(error = %e, "audio output unavailable, clips will be reported as failed");
            None
        }
    };

    while let Ok(request) = requests.recv() {
        match output.as_ref() {
            Some((_stream, handle)) => play_clip(handle, request),
            None => {
                let _ = request
                    .outcome
                    .send(PlaybackOutcome::Failed("audio output unavailable".to_string()));
            }
        }
    }
    debug!("audio playback thread stopped");
}

fn play_clip(handle: &rodio::OutputStreamHandle, request: PlayRequest) {
    let PlayRequest {
        clip,
        outcome,
        mut stop,
    } = request;

    let source = match rodio::Decoder::new(Cursor::new(clip.to_vec())) {
        Ok(source) => source,
        Err(e) => {
            let _ = outcome.send(PlaybackOutcome::Failed(format!("decode error: {}", e)));
            return;
        }
    };
    let sink = match rodio::Sink::try_new(handle) {
        Ok(sink) => sink,
        Err(e) => {
            let _ = outcome.send(PlaybackOutcome::Failed(format!("sink error: {}", e)));
            return;
        }
    };
    sink.append(source);

    // The sink, and with it the decoded clip, is dropped exactly once when
    // this function returns: finished, failed, or stopped.
    loop {
        match stop.try_recv() {
            Ok(()) | Err(oneshot::error::TryRecvError::Closed) => {
                sink.stop();
                debug!("clip stopped before completion");
                return;
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
        }
        if sink.empty() {
            let _ = outcome.send(PlaybackOutcome::Ended);
            return;
        }
        thread::sleep(STOP_POLL_INTERVAL);
    }
}
