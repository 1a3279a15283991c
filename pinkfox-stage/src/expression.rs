//! Mutually-exclusive avatar expression state

use crate::error::StageError;
use crate::renderer::ModelRenderer;
use parking_lot::Mutex;
use pinkfox_core::ExpressionCatalog;
use std::sync::Arc;
use tracing::{debug, warn};

/// Token identifying one expression activation.
///
/// Each `set_active` call mints a fresh token, even when the tag repeats,
/// so a delayed reset belonging to an earlier turn can never clear a newer
/// turn's expression, including the case where both turns used the same
/// tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation(u64);

#[derive(Debug)]
struct ActiveExpression {
    name: String,
    token: u64,
}

#[derive(Debug, Default)]
struct Inner {
    current: Option<ActiveExpression>,
    next_token: u64,
}

/// Drives the model's expression parameters with a single invariant: at
/// most one catalog entry is at 1 at any time, all others at 0.
///
/// The orchestrator is the only writer; renderer write failures are logged
/// and do not poison the tracked state.
pub struct ExpressionState {
    catalog: ExpressionCatalog,
    renderer: Arc<dyn ModelRenderer>,
    inner: Mutex<Inner>,
}

impl ExpressionState {
    pub fn new(
        catalog: ExpressionCatalog,
        renderer: Arc<dyn ModelRenderer>,
    ) -> Result<Self, StageError> {
        catalog.validate().map_err(StageError::Config)?;
        Ok(Self {
            catalog,
            renderer,
            inner: Mutex::new(Inner::default()),
        })
    }

    /// Make `name` the one active expression.
    ///
    /// Unknown tags return `UnknownExpression` and leave the model
    /// untouched; the catalog is supplied externally, so an unrecognized
    /// tag is a routine condition, not a fault.
    pub fn set_active(&self, name: &str) -> Result<Activation, StageError> {
        let Some(parameter_id) = self.catalog.lookup(name) else {
            warn!(expression = name, "unknown expression tag, ignoring");
            return Err(StageError::UnknownExpression(name.to_string()));
        };

        let mut inner = self.inner.lock();
        self.zero_all_parameters();
        self.write_parameter(parameter_id, 1.0);

        inner.next_token += 1;
        let token = inner.next_token;
        inner.current = Some(ActiveExpression {
            name: name.to_string(),
            token,
        });
        debug!(expression = name, token, "expression activated");
        Ok(Activation(token))
    }

    /// Clear the expression `activation` refers to, if it is still the
    /// current one; a stale token is a no-op.
    pub fn clear_if(&self, activation: Activation) {
        let mut inner = self.inner.lock();
        let is_current = inner
            .current
            .as_ref()
            .map_or(false, |active| active.token == activation.0);
        if !is_current {
            return;
        }
        if let Some(active) = inner.current.take() {
            if let Some(parameter_id) = self.catalog.lookup(&active.name) {
                self.write_parameter(parameter_id, 0.0);
            }
            debug!(expression = %active.name, "expression cleared");
        }
    }

    /// Zero every catalog parameter unconditionally; idempotent.
    /// Used on teardown and model swap.
    pub fn reset_all(&self) {
        let mut inner = self.inner.lock();
        self.zero_all_parameters();
        inner.current = None;
        debug!("all expression parameters reset");
    }

    /// Currently active tag, if any
    pub fn current(&self) -> Option<String> {
        self.inner
            .lock()
            .current
            .as_ref()
            .map(|active| active.name.clone())
    }

    pub fn catalog(&self) -> &ExpressionCatalog {
        &self.catalog
    }

    fn zero_all_parameters(&self) {
        for entry in self.catalog.iter() {
            self.write_parameter(&entry.parameter_id, 0.0);
        }
    }

    fn write_parameter(&self, id: &str, value: f64) {
        if let Err(e) = self.renderer.set_parameter_value_by_id(id, value) {
            warn!(parameter = id, error = %e, "renderer rejected parameter write");
        }
    }
}
