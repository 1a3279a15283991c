//! Configuration for the playback stage

use pinkfox_core::{conversation::DEFAULT_MAX_TURNS, ExpressionCatalog};
use serde::{Deserialize, Serialize};

/// Stage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Expression tag -> model parameter id table
    pub catalog: ExpressionCatalog,

    /// Conversation window size before the oldest half is dropped
    pub max_turns: usize,

    /// Whether model interaction tracking starts enabled
    pub tracking_enabled: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            catalog: ExpressionCatalog::default(),
            max_turns: DEFAULT_MAX_TURNS,
            // The model loads with tracking off; the user toggles it
            tracking_enabled: false,
        }
    }
}

impl StageConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.catalog.validate()?;
        if self.catalog.is_empty() {
            return Err("Expression catalog cannot be empty".to_string());
        }
        if !(2..=1000).contains(&self.max_turns) {
            return Err("max_turns must be between 2 and 1000".to_string());
        }
        Ok(())
    }
}
