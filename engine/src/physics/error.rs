//! Physics error types
//!
//! The core is pure in-memory math, so the taxonomy is narrow: precondition
//! violations rejected at construction/entry, invalid geometry, and stale
//! body handles. Degenerate vectors never produce an error; they fail safe.

use glam::Vec3;
use thiserror::Error;

/// Errors reported by the physics core.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PhysicsError {
    /// Sphere radius must be finite and strictly positive.
    #[error("invalid sphere radius: {0}")]
    InvalidRadius(f32),

    /// Frame delta must be finite and non-negative.
    #[error("invalid time step: {0}")]
    InvalidTimeStep(f32),

    /// Ground friction must lie in (0, 1].
    #[error("invalid friction coefficient: {0}")]
    InvalidFriction(f32),

    /// Triangle vertices are collinear or coincident.
    #[error("degenerate triangle (collinear or coincident vertices)")]
    DegenerateTriangle,

    /// Box bounds are inverted on at least one axis.
    #[error("invalid box bounds: min {min} is not <= max {max}")]
    InvalidBox {
        /// Requested minimum corner
        min: Vec3,
        /// Requested maximum corner
        max: Vec3,
    },

    /// An input vector contained NaN or infinity.
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    /// A body handle does not refer to a body in the scene.
    #[error("unknown body handle: {0}")]
    UnknownBody(usize),
}
