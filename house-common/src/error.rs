//! Error type shared by every house mesh generator

/// Geometry generation failure
///
/// Generation is deterministic, so none of these are worth retrying: the
/// house build that hit one is abandoned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Input geometry cannot produce a valid mesh (zero-length segment,
    /// degenerate direction, malformed outline, ...)
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    /// Emitting the mesh would push vertex numbers past what a u16 index can address
    #[error("vertex count {vertex_count} exceeds the u16 index limit ({max})", max = u16::MAX)]
    BufferOverflow { vertex_count: u64 },
}

impl GeometryError {
    /// Shorthand for [`GeometryError::InvalidGeometry`]
    pub fn invalid(reason: impl Into<String>) -> Self {
        GeometryError::InvalidGeometry {
            reason: reason.into(),
        }
    }

    /// Fail with [`GeometryError::InvalidGeometry`] unless every value is finite
    pub fn ensure_finite(what: &str, values: &[f32]) -> Result<(), GeometryError> {
        if values.iter().all(|value| value.is_finite()) {
            Ok(())
        } else {
            Err(GeometryError::invalid(format!("{what} must be finite")))
        }
    }
}
