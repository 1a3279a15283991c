//! Seam to the avatar model renderer

use crate::error::StageError;

/// The two primitives the playback engine needs from whatever renders the
/// avatar. Any renderer that can set a named model parameter to 0 or 1 and
/// accept a tracking flag is compatible; the engine never reaches past this
/// trait into rendering internals.
pub trait ModelRenderer: Send + Sync {
    /// Write one model parameter (expression parameters use 0.0 and 1.0)
    fn set_parameter_value_by_id(&self, id: &str, value: f64) -> Result<(), StageError>;

    /// Forward the user's tracking toggle verbatim
    fn set_tracking(&self, enabled: bool) -> Result<(), StageError>;
}
