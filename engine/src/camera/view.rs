//! Render-facing view transform.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Default vertical field of view in degrees
pub const DEFAULT_FOVY: f32 = 80.0;

/// Projection mode handed to the renderer. Opaque to the physics core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

/// A look-at camera: where it is, what it looks at, and which way is up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Eye position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Camera up axis (yaw rotates about this)
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fovy: f32,
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 5.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: DEFAULT_FOVY,
            projection: Projection::Perspective,
        }
    }
}

impl Camera {
    /// Perspective camera at `position` looking at `target` with world-up.
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Default::default()
        }
    }

    /// Right-handed view matrix for the renderer.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }
}
