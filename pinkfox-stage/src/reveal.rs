//! Reading-paced text reveal

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::debug;

/// Pause between consecutive segment reveals. Part of the observable
/// contract, together with the zero delay on the first segment.
pub const SEGMENT_INTERVAL: Duration = Duration::from_millis(1500);

/// Events emitted while revealing one response text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// Segment `index` is now visible
    Segment { index: usize, text: String },
    /// Every segment has been shown (the only event for blank text)
    Completed,
}

#[derive(Debug, Default)]
struct Session {
    generation: u64,
    segments: Vec<String>,
    revealed: usize,
    complete: bool,
}

/// Splits response text into display segments and reveals them one at a
/// time on a fixed cadence.
///
/// Each session carries a generation id. A pending timer checks that id
/// before touching anything, so a tick left over from a superseded session
/// is a no-op instead of appending stale text to the live one.
pub struct TextRevealScheduler {
    session: Arc<RwLock<Session>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

/// Normalize literal `\n` escapes to real line breaks, split on line
/// breaks, and drop blank segments. Kept segments stay verbatim.
fn split_segments(text: &str) -> Vec<String> {
    text.replace("\\n", "\n")
        .split('\n')
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| segment.to_string())
        .collect()
}

impl TextRevealScheduler {
    pub fn new() -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::default())),
            ticker: Mutex::new(None),
        }
    }

    /// Begin revealing `text`, superseding any session still in flight.
    ///
    /// Segment 0 is emitted synchronously (elapsed time 0); each later
    /// segment follows after exactly [`SEGMENT_INTERVAL`]. The returned
    /// channel ends with [`RevealEvent::Completed`]; text with no
    /// non-blank segments completes immediately with nothing shown.
    pub fn start(&self, text: &str) -> mpsc::UnboundedReceiver<RevealEvent> {
        self.cancel();

        let segments = split_segments(text);
        let (events, receiver) = mpsc::unbounded_channel();

        let generation;
        {
            let mut session = self.session.write();
            session.generation += 1;
            generation = session.generation;
            session.segments = segments.clone();
            session.revealed = 0;
            session.complete = false;

            if segments.is_empty() {
                session.complete = true;
                let _ = events.send(RevealEvent::Completed);
                debug!(generation, "reveal complete: nothing to show");
                return receiver;
            }

            session.revealed = 1;
            let _ = events.send(RevealEvent::Segment {
                index: 0,
                text: segments[0].clone(),
            });
            if segments.len() == 1 {
                session.complete = true;
                let _ = events.send(RevealEvent::Completed);
                return receiver;
            }
        }

        let shared = Arc::clone(&self.session);
        let handle = tokio::spawn(async move {
            for (index, text) in segments.into_iter().enumerate().skip(1) {
                sleep(SEGMENT_INTERVAL).await;
                {
                    let mut session = shared.write();
                    if session.generation != generation {
                        // Superseded while sleeping
                        return;
                    }
                    session.revealed = index + 1;
                    if session.revealed == session.segments.len() {
                        session.complete = true;
                    }
                }
                let _ = events.send(RevealEvent::Segment { index, text });
            }
            let _ = events.send(RevealEvent::Completed);
            debug!(generation, "reveal complete");
        });
        *self.ticker.lock() = Some(handle);

        receiver
    }

    /// Invalidate the current session and stop its pending timer.
    ///
    /// Must run before `start` is called for a new response; the
    /// generation bump makes any timer that already fired a no-op.
    pub fn cancel(&self) {
        if let Some(handle) = self.ticker.lock().take() {
            handle.abort();
        }
        self.session.write().generation += 1;
    }

    /// Segments currently visible, in order (read-only presentation view)
    pub fn visible_segments(&self) -> Vec<String> {
        let session = self.session.read();
        session.segments[..session.revealed].to_vec()
    }

    /// Whether the current session has shown everything
    pub fn is_complete(&self) -> bool {
        self.session.read().complete
    }
}

impl Default for TextRevealScheduler {
    fn default() -> Self {
        Self::new()
    }
}
