//! Physics type re-exports from glam
//!
//! This module provides the core mathematical types used throughout
//! the physics system, re-exported from the glam library, plus the
//! axis-angle rotation shared by the sphere and the camera.

pub use glam::{Quat, Vec2, Vec3};

/// Squared-length threshold below which a vector is treated as zero.
pub const DEGENERATE_EPSILON: f32 = 1e-12;

/// Rotates `v` about `axis` by `angle` radians using Rodrigues' formula.
///
/// `v' = v cos(θ) + (k × v) sin(θ) + k (k · v)(1 − cos(θ))`
///
/// The axis does not need to be normalized. A zero-length axis has no
/// defined rotation, so `v` is returned unchanged.
pub fn rotate_about_axis(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let Some(k) = axis.try_normalize() else {
        return v;
    };
    let (sin, cos) = angle.sin_cos();
    v * cos + k.cross(v) * sin + k * k.dot(v) * (1.0 - cos)
}
