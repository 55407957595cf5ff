//! Movement intent
//!
//! Builds the horizontal ground impulse from held movement keys and the
//! camera basis. `forward` here is the camera's `forward_v()`, which points
//! from the view target back toward the eye, so W subtracts it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::keyboard::MovementKeys;

/// Default per-frame ground impulse
pub const GROUND_SPEED: f32 = 0.17;

/// Default jump impulse
pub const JUMP_FORCE: f32 = 19.5;

/// Default swoosh direction scale
pub const SWOOSH_SPEED: f32 = 8.5;

/// Player action tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Magnitude of the per-frame ground impulse while a key is held
    pub ground_speed: f32,
    /// Upward velocity added by a jump
    pub jump_force: f32,
    /// Scale of the swoosh direction vector
    pub swoosh_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            ground_speed: GROUND_SPEED,
            jump_force: JUMP_FORCE,
            swoosh_speed: SWOOSH_SPEED,
        }
    }
}

/// Drop the vertical component.
#[inline]
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Horizontal movement impulse for this frame.
///
/// Sums the flattened basis vectors for each held key, normalizes, and
/// scales to `ground_speed`. Opposing keys cancel to zero.
pub fn movement_intent(keys: &MovementKeys, forward: Vec3, right: Vec3, ground_speed: f32) -> Vec3 {
    if !keys.any_pressed() {
        return Vec3::ZERO;
    }
    let forward = flatten(forward);
    let right = flatten(right);

    let mut projected = Vec3::ZERO;
    if keys.forward {
        projected -= forward;
    }
    if keys.backward {
        projected += forward;
    }
    if keys.left {
        projected -= right;
    }
    if keys.right {
        projected += right;
    }

    projected.normalize_or_zero() * ground_speed
}
