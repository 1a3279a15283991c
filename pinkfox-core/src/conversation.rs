//! In-memory conversation log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default window size before the oldest half is dropped
pub const DEFAULT_MAX_TURNS: usize = 20;

/// One user ask / assistant answer pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationTurn {
    pub ask: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded in-memory turn list.
///
/// Holds just enough history to render the latest reply and give the
/// presentation layer a scrollback window. When the window fills, the
/// oldest half is dropped; persisting history is a non-goal.
#[derive(Debug, Clone)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
    max_turns: usize,
}

impl ConversationLog {
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: Vec::new(),
            max_turns: max_turns.max(2),
        }
    }

    /// Record one completed dialog turn
    pub fn push(&mut self, ask: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(ConversationTurn {
            ask: ask.into(),
            answer: answer.into(),
            timestamp: Utc::now(),
        });
        if self.turns.len() >= self.max_turns {
            let drop_count = self.turns.len() / 2;
            self.turns.drain(..drop_count);
        }
    }

    /// Latest assistant reply, if any (what the subtitle layer renders)
    pub fn latest_answer(&self) -> Option<&str> {
        self.turns.last().map(|t| t.answer.as_str())
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_answer_tracks_pushes() {
        let mut log = ConversationLog::default();
        assert_eq!(log.latest_answer(), None);
        log.push("hi", "hello");
        log.push("how are you", "fine");
        assert_eq!(log.latest_answer(), Some("fine"));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn overflow_drops_oldest_half() {
        let mut log = ConversationLog::new(4);
        for i in 0..4 {
            log.push(format!("q{i}"), format!("a{i}"));
        }
        // Hitting the cap halves the window; the newest turns survive
        assert_eq!(log.len(), 2);
        assert_eq!(log.turns()[0].ask, "q2");
        assert_eq!(log.latest_answer(), Some("a3"));
    }
}
