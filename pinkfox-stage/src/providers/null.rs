//! No-op renderer provider

use crate::error::StageError;
use crate::renderer::ModelRenderer;

/// Renderer that discards every command. Used when the avatar is disabled
/// and in headless tests that only care about engine state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl ModelRenderer for NullRenderer {
    fn set_parameter_value_by_id(&self, _id: &str, _value: f64) -> Result<(), StageError> {
        Ok(())
    }

    fn set_tracking(&self, _enabled: bool) -> Result<(), StageError> {
        Ok(())
    }
}
