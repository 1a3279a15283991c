//! Shared fakes for pinkfox-stage integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use parking_lot::Mutex;
use pinkfox_chat::{ChatBackend, ChatError};
use pinkfox_core::ResponsePayload;
use pinkfox_stage::{AudioEngine, ClipControl, ModelRenderer, PlaybackOutcome, StageError};
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

/// Renderer that records every write and continuously checks the
/// one-active-parameter invariant.
#[derive(Default)]
pub struct RecordingRenderer {
    parameters: Mutex<BTreeMap<String, f64>>,
    writes: Mutex<Vec<(String, f64)>>,
    tracking: Mutex<Option<bool>>,
    violations: AtomicUsize,
}

impl RecordingRenderer {
    pub fn parameter(&self, id: &str) -> f64 {
        self.parameters.lock().get(id).copied().unwrap_or(0.0)
    }

    /// Parameter ids currently at 1
    pub fn active_parameters(&self) -> Vec<String> {
        self.parameters
            .lock()
            .iter()
            .filter(|(_, value)| **value == 1.0)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    pub fn tracking(&self) -> Option<bool> {
        *self.tracking.lock()
    }

    /// Times more than one parameter was at 1 simultaneously
    pub fn mutual_exclusion_violations(&self) -> usize {
        self.violations.load(Ordering::SeqCst)
    }
}

impl ModelRenderer for RecordingRenderer {
    fn set_parameter_value_by_id(&self, id: &str, value: f64) -> Result<(), StageError> {
        let mut parameters = self.parameters.lock();
        parameters.insert(id.to_string(), value);
        if parameters.values().filter(|v| **v == 1.0).count() > 1 {
            self.violations.fetch_add(1, Ordering::SeqCst);
        }
        drop(parameters);
        self.writes.lock().push((id.to_string(), value));
        Ok(())
    }

    fn set_tracking(&self, enabled: bool) -> Result<(), StageError> {
        *self.tracking.lock() = Some(enabled);
        Ok(())
    }
}

struct PendingClip {
    clip: Bytes,
    outcome: Option<oneshot::Sender<PlaybackOutcome>>,
    stop: oneshot::Receiver<()>,
    stopped: bool,
}

/// Audio engine whose clips finish only when the test says so
#[derive(Default)]
pub struct ManualAudioEngine {
    pending: Mutex<Vec<PendingClip>>,
    begin_calls: AtomicUsize,
}

impl ManualAudioEngine {
    pub fn begin_calls(&self) -> usize {
        self.begin_calls.load(Ordering::SeqCst)
    }

    /// Resolve the most recent clip with `outcome`
    pub fn finish_current(&self, outcome: PlaybackOutcome) {
        let mut pending = self.pending.lock();
        let clip = pending.last_mut().expect("no clip in flight");
        if let Some(sender) = clip.outcome.take() {
            let _ = sender.send(outcome);
        }
    }

    /// Drop the most recent clip's outcome sender, as a real engine does
    /// after being stopped
    pub fn release_current(&self) {
        if let Some(clip) = self.pending.lock().last_mut() {
            clip.outcome.take();
        }
    }

    /// Whether the most recent clip received a stop signal
    pub fn stop_requested(&self) -> bool {
        let mut pending = self.pending.lock();
        match pending.last_mut() {
            Some(clip) => {
                if clip.stopped {
                    return true;
                }
                if clip.stop.try_recv().is_ok() {
                    clip.stopped = true;
                }
                clip.stopped
            }
            None => false,
        }
    }

    /// Bytes handed to the engine for the most recent clip
    pub fn current_clip(&self) -> Option<Bytes> {
        self.pending.lock().last().map(|clip| clip.clip.clone())
    }
}

impl AudioEngine for ManualAudioEngine {
    fn begin(
        &self,
        clip: Bytes,
        outcome: oneshot::Sender<PlaybackOutcome>,
    ) -> Result<ClipControl, StageError> {
        self.begin_calls.fetch_add(1, Ordering::SeqCst);
        let (stop_tx, stop_rx) = oneshot::channel();
        self.pending.lock().push(PendingClip {
            clip,
            outcome: Some(outcome),
            stop: stop_rx,
            stopped: false,
        });
        Ok(ClipControl::new(stop_tx))
    }
}

/// Chat backend that replays scripted replies
#[derive(Default)]
pub struct FakeChatBackend {
    replies: Mutex<VecDeque<Result<ResponsePayload, String>>>,
    calls: AtomicUsize,
}

impl FakeChatBackend {
    pub fn push_reply(&self, payload: ResponsePayload) {
        self.replies.lock().push_back(Ok(payload));
    }

    pub fn push_failure(&self, reason: &str) {
        self.replies.lock().push_back(Err(reason.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for FakeChatBackend {
    async fn chat(&self, _message: &str) -> Result<ResponsePayload, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.replies.lock().pop_front() {
            Some(Ok(payload)) => Ok(payload),
            Some(Err(reason)) => Err(ChatError::Backend(reason)),
            None => Err(ChatError::Backend("no scripted reply".to_string())),
        }
    }
}

/// A valid base64 clip payload
pub fn clip_b64() -> String {
    general_purpose::STANDARD.encode(b"pinkfox-test-clip")
}

/// Let every spawned task run to its next await point
pub async fn drain_tasks() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}
