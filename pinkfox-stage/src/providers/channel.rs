//! Channel-backed renderer provider

use crate::error::StageError;
use crate::renderer::ModelRenderer;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

/// Commands forwarded to connected rendering frontends
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum RendererCommand {
    /// Set one model parameter
    SetParameter { id: String, value: f64 },
    /// Enable or disable interaction tracking
    SetTracking { enabled: bool },
}

/// Renderer that broadcasts parameter writes to whatever frontend actually
/// owns the model (a websocket bridge, a local canvas, a test harness).
///
/// Commands sent while no frontend is subscribed are dropped; the engine
/// keeps its own expression state, so a frontend that attaches late only
/// misses cosmetic updates.
pub struct ChannelRenderer {
    commands: broadcast::Sender<RendererCommand>,
}

impl ChannelRenderer {
    pub fn new(capacity: usize) -> Self {
        let (commands, _) = broadcast::channel(capacity.max(1));
        Self { commands }
    }

    /// Subscribe a rendering frontend
    pub fn subscribe(&self) -> broadcast::Receiver<RendererCommand> {
        self.commands.subscribe()
    }

    fn send(&self, command: RendererCommand) {
        if self.commands.send(command).is_err() {
            debug!("no renderer frontend connected, dropping command");
        }
    }
}

impl Default for ChannelRenderer {
    fn default() -> Self {
        Self::new(256)
    }
}

impl ModelRenderer for ChannelRenderer {
    fn set_parameter_value_by_id(&self, id: &str, value: f64) -> Result<(), StageError> {
        self.send(RendererCommand::SetParameter {
            id: id.to_string(),
            value,
        });
        Ok(())
    }

    fn set_tracking(&self, enabled: bool) -> Result<(), StageError> {
        self.send(RendererCommand::SetTracking { enabled });
        Ok(())
    }
}
