//! Turn orchestration: one chat request in, synchronized playback out

use crate::audio::AudioPlaybackController;
use crate::config::StageConfig;
use crate::engines::{AudioEngine, PlaybackOutcome};
use crate::error::StageError;
use crate::expression::ExpressionState;
use crate::renderer::ModelRenderer;
use crate::reveal::{RevealEvent, TextRevealScheduler};
use parking_lot::{Mutex, RwLock};
use pinkfox_chat::ChatBackend;
use pinkfox_core::{ConversationLog, ConversationTurn, ResponsePayload};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// How long an expression lingers after its clip settles, so the face does
/// not snap back the instant speech stops. Contractual, like the reveal
/// cadence.
pub const EXPRESSION_LINGER: std::time::Duration = std::time::Duration::from_millis(1000);

/// Where the engine is in the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingResponse,
    Playing,
}

/// The coordinating state machine for one companion session.
///
/// Owns the current turn's reveal session and playback handle. Starting a
/// new turn supersedes the previous one completely: previous audio is
/// cancelled, then the previous reveal, then the previous settlement
/// watcher, before any new side effect begins. Audio and text run as
/// independent tracks; the turn settles (returns to `Idle`) once every
/// track that started has finished, and a failure in one track never
/// aborts the other.
pub struct ResponseOrchestrator {
    chat: Arc<dyn ChatBackend>,
    renderer: Arc<dyn ModelRenderer>,
    expressions: Arc<ExpressionState>,
    audio: AudioPlaybackController,
    reveal: TextRevealScheduler,
    log: RwLock<ConversationLog>,
    state: Arc<RwLock<TurnState>>,
    generation: Arc<AtomicU64>,
    settlement: Mutex<Option<JoinHandle<()>>>,
    tracking: AtomicBool,
}

impl ResponseOrchestrator {
    pub fn new(
        config: StageConfig,
        chat: Arc<dyn ChatBackend>,
        renderer: Arc<dyn ModelRenderer>,
        engine: Arc<dyn AudioEngine>,
    ) -> Result<Self, StageError> {
        config.validate().map_err(StageError::Config)?;

        let expressions = Arc::new(ExpressionState::new(
            config.catalog.clone(),
            Arc::clone(&renderer),
        )?);

        if let Err(e) = renderer.set_tracking(config.tracking_enabled) {
            warn!(error = %e, "failed to set initial tracking state");
        }

        Ok(Self {
            chat,
            renderer,
            expressions,
            audio: AudioPlaybackController::new(engine),
            reveal: TextRevealScheduler::new(),
            log: RwLock::new(ConversationLog::new(config.max_turns)),
            state: Arc::new(RwLock::new(TurnState::Idle)),
            generation: Arc::new(AtomicU64::new(0)),
            settlement: Mutex::new(None),
            tracking: AtomicBool::new(config.tracking_enabled),
        })
    }

    /// Submit one user message: issue the chat request and, on success,
    /// play the reply. Blank input is ignored without a state change.
    ///
    /// Only transport-level failures surface to the caller; everything
    /// else degrades inside the playback tracks.
    pub async fn submit(&self, input: &str) -> Result<(), StageError> {
        let message = input.trim();
        if message.is_empty() {
            return Ok(());
        }

        *self.state.write() = TurnState::AwaitingResponse;
        info!(chars = message.chars().count(), "chat request issued");

        let payload = match self.chat.chat(message).await {
            Ok(payload) => payload,
            Err(e) => {
                *self.state.write() = TurnState::Idle;
                warn!(error = %e, "chat request failed");
                return Err(StageError::Chat(e));
            }
        };

        self.log.write().push(message, payload.text.clone());
        self.play_response(payload);
        Ok(())
    }

    /// Start playback of one response payload, superseding any turn still
    /// in flight.
    pub fn play_response(&self, payload: ResponsePayload) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        // Supersede the previous turn before any new side effect:
        // audio, then reveal, then the settlement watcher.
        self.audio.cancel();
        self.reveal.cancel();
        if let Some(handle) = self.settlement.lock().take() {
            handle.abort();
        }

        *self.state.write() = TurnState::Playing;

        // Expression goes first so it is visible before the first segment
        let activation = payload.expression.as_deref().and_then(|tag| {
            match self.expressions.set_active(tag) {
                Ok(activation) => Some(activation),
                Err(e) => {
                    warn!(error = %e, "expression skipped for this turn");
                    None
                }
            }
        });

        let completion = match payload.audio.as_deref() {
            Some(audio) => match self.audio.play(audio) {
                Ok(completion) => Some(completion),
                Err(StageError::EmptyAudio) => None,
                Err(e) => {
                    // Busy here would mean the cancel above did not run
                    warn!(error = %e, "audio track skipped");
                    None
                }
            },
            None => None,
        };

        let events = self.reveal.start(&payload.text);

        let expressions = Arc::clone(&self.expressions);
        let state = Arc::clone(&self.state);
        let current_generation = Arc::clone(&self.generation);
        let handle = tokio::spawn(async move {
            let mut events = events;

            let audio_track = async {
                if let Some(completion) = completion {
                    match completion.await {
                        Ok(PlaybackOutcome::Ended) => debug!("speech finished"),
                        Ok(PlaybackOutcome::Failed(reason)) => {
                            warn!(reason = %reason, "speech failed, expression reset still scheduled")
                        }
                        Err(_) => debug!("speech completion dropped"),
                    }
                    // Let the expression linger briefly after speech ends
                    sleep(EXPRESSION_LINGER).await;
                    if let Some(activation) = activation {
                        expressions.clear_if(activation);
                    }
                }
            };

            let text_track = async {
                while let Some(event) = events.recv().await {
                    if event == RevealEvent::Completed {
                        break;
                    }
                }
            };

            tokio::join!(audio_track, text_track);

            if current_generation.load(Ordering::Acquire) == generation {
                let mut state = state.write();
                if *state == TurnState::Playing {
                    *state = TurnState::Idle;
                    debug!(generation, "turn settled");
                }
            }
        });
        *self.settlement.lock() = Some(handle);
    }

    /// Tear down all in-flight work and zero every expression parameter.
    /// Used on shutdown and model swap.
    pub fn reset(&self) {
        self.audio.cancel();
        self.reveal.cancel();
        if let Some(handle) = self.settlement.lock().take() {
            handle.abort();
        }
        self.expressions.reset_all();
        *self.state.write() = TurnState::Idle;
        info!("stage reset");
    }

    /// Forward the tracking flag verbatim to the renderer
    pub fn set_tracking(&self, enabled: bool) {
        self.tracking.store(enabled, Ordering::Release);
        if let Err(e) = self.renderer.set_tracking(enabled) {
            warn!(error = %e, "failed to forward tracking flag");
        }
        info!(enabled, "tracking toggled");
    }

    /// Flip the tracking flag (bound to a key press upstream); returns the
    /// new value
    pub fn toggle_tracking(&self) -> bool {
        let enabled = !self.tracking.load(Ordering::Acquire);
        self.set_tracking(enabled);
        enabled
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.load(Ordering::Acquire)
    }

    pub fn state(&self) -> TurnState {
        *self.state.read()
    }

    /// Whether speech audio is currently playing (UI gating)
    pub fn is_playing_audio(&self) -> bool {
        self.audio.is_playing()
    }

    /// Whether the current reveal has shown everything (UI gating)
    pub fn is_reveal_complete(&self) -> bool {
        self.reveal.is_complete()
    }

    /// Subtitle segments currently visible, in order
    pub fn visible_segments(&self) -> Vec<String> {
        self.reveal.visible_segments()
    }

    /// Latest assistant reply, if any
    pub fn latest_reply(&self) -> Option<String> {
        self.log.read().latest_answer().map(str::to_string)
    }

    /// Snapshot of the conversation window
    pub fn conversation(&self) -> Vec<ConversationTurn> {
        self.log.read().turns().to_vec()
    }

    /// Currently active expression tag, if any
    pub fn current_expression(&self) -> Option<String> {
        self.expressions.current()
    }
}
