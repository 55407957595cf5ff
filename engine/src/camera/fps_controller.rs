//! First-Person Follow Camera Module
//!
//! A free-look camera that rides on top of the player sphere. Mouse movement
//! rotates the view direction without any button held, and the controller
//! exposes the horizontal movement basis used to build player input.
//!
//! Key features:
//! - Eye placed `eye_height` above the followed body every frame
//! - Look direction preserved across body movement
//! - Yaw about the camera up axis, pitch about `up × direction`
//! - No pitch clamp unless `max_pitch` is configured
//! - The body is reached through a [`BodyHandle`], never owned

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::view::Camera;
use crate::physics::{PhysicsError, rotate_about_axis};
use crate::world::{BodyHandle, Scene};

/// Default mouse sensitivity in radians per pixel
pub const DEFAULT_ROTATION_SPEED: f32 = 0.005;

/// Default eye height above the sphere center
pub const DEFAULT_EYE_HEIGHT: f32 = 1.5;

/// Squared length under which the pitch axis is undefined (looking along up).
const POLE_EPSILON: f32 = 1e-10;

/// Camera tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Radians of rotation per pixel of mouse movement
    pub rotation_speed: f32,
    /// Eye offset above the followed body's center
    pub eye_height: f32,
    /// Vertical field of view in degrees
    pub fovy: f32,
    /// Optional bound on the view elevation in radians
    pub max_pitch: Option<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            rotation_speed: DEFAULT_ROTATION_SPEED,
            eye_height: DEFAULT_EYE_HEIGHT,
            fovy: super::view::DEFAULT_FOVY,
            max_pitch: None,
        }
    }
}

/// Follow camera controller
///
/// ## Usage
/// ```rust,ignore
/// let mut controller = CameraController::new(camera, player, 0.005, mouse_position);
///
/// // Each frame, before building movement intent
/// controller.update(&scene, mouse_position)?;
///
/// // forward_v points from the target back toward the eye
/// let forward = controller.forward_v();
/// let right = controller.right_v();
/// ```
#[derive(Clone, Debug)]
pub struct CameraController {
    /// View transform handed to the renderer
    camera: Camera,
    /// Body the eye follows
    body: BodyHandle,
    /// Mouse sensitivity in radians per pixel
    rotation_speed: f32,
    /// Eye offset above the body center
    eye_height: f32,
    /// Elevation bound in radians, if any
    max_pitch: Option<f32>,
    /// Mouse sample from the previous update
    last_mouse_position: Vec2,
    /// Last well-defined horizontal right vector
    last_right: Vec3,
}

impl CameraController {
    /// Create a controller following `body`.
    ///
    /// `mouse_position` is the current pointer sample; the first update
    /// measures its delta from here.
    pub fn new(camera: Camera, body: BodyHandle, rotation_speed: f32, mouse_position: Vec2) -> Self {
        let mut controller = Self {
            camera,
            body,
            rotation_speed,
            eye_height: DEFAULT_EYE_HEIGHT,
            max_pitch: None,
            last_mouse_position: mouse_position,
            last_right: Vec3::X,
        };
        controller.refresh_right();
        controller
    }

    /// Create a controller with full camera tuning.
    pub fn with_config(
        mut camera: Camera,
        body: BodyHandle,
        config: &CameraConfig,
        mouse_position: Vec2,
    ) -> Self {
        camera.fovy = config.fovy;
        let mut controller = Self::new(camera, body, config.rotation_speed, mouse_position);
        controller.eye_height = config.eye_height;
        controller.max_pitch = config.max_pitch;
        controller
    }

    /// The view transform for rendering.
    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Handle of the followed body.
    #[inline]
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Change the mouse sensitivity, e.g. from a settings menu.
    #[inline]
    pub fn set_rotation_speed(&mut self, rotation_speed: f32) {
        self.rotation_speed = rotation_speed;
    }

    #[inline]
    pub fn last_mouse_position(&self) -> Vec2 {
        self.last_mouse_position
    }

    /// Re-baseline the mouse so the next update sees no delta.
    ///
    /// Use after capturing or warping the cursor.
    pub fn reset_mouse(&mut self, mouse_position: Vec2) {
        self.last_mouse_position = mouse_position;
    }

    /// Follow the body and apply this frame's mouse look.
    ///
    /// # Errors
    ///
    /// * `UnknownBody` if the handle no longer refers to a body
    /// * `NonFinite` if `mouse_position` contains NaN or infinity
    pub fn update(&mut self, scene: &Scene, mouse_position: Vec2) -> Result<(), PhysicsError> {
        if !mouse_position.is_finite() {
            return Err(PhysicsError::NonFinite("mouse position"));
        }
        let body_position = scene.body(self.body)?.position();

        // Keep the previous look offset while the eye moves with the body
        let look = self.camera.target - self.camera.position;
        let eye = body_position + Vec3::Y * self.eye_height;
        self.camera.position = eye;
        self.camera.target = eye + look;

        let delta = mouse_position - self.last_mouse_position;
        let yaw = -delta.x * self.rotation_speed;
        let pitch = delta.y * self.rotation_speed;

        let up = self.camera.up;
        let mut direction = rotate_about_axis(look, up, yaw);

        let right = up.cross(direction);
        if right.length_squared() > POLE_EPSILON {
            let pitch = self.bounded_pitch(direction, pitch);
            direction = rotate_about_axis(direction, right, pitch);
        }

        let direction = direction
            .try_normalize()
            .or_else(|| look.try_normalize())
            .unwrap_or(Vec3::NEG_Z);
        self.camera.target = eye + direction;
        self.last_mouse_position = mouse_position;

        self.refresh_right();
        Ok(())
    }

    /// Unit vector from the target back toward the eye.
    ///
    /// This points opposite to the view direction: subtract it to move the
    /// way the camera faces.
    pub fn forward_v(&self) -> Vec3 {
        (self.camera.position - self.camera.target)
            .try_normalize()
            .unwrap_or(Vec3::Z)
    }

    /// Unit vector `world_up × forward_v()`.
    ///
    /// Uses world up rather than the camera up so the vector stays
    /// horizontal. When the view is vertical the last horizontal right
    /// vector is returned.
    pub fn right_v(&self) -> Vec3 {
        Vec3::Y
            .cross(self.forward_v())
            .try_normalize()
            .unwrap_or(self.last_right)
    }

    /// Unit view direction (eye toward target).
    pub fn look_direction(&self) -> Vec3 {
        -self.forward_v()
    }

    /// Scale `pitch` so the elevation stays within `max_pitch`.
    ///
    /// Positive pitch lowers the view.
    fn bounded_pitch(&self, direction: Vec3, pitch: f32) -> f32 {
        let Some(limit) = self.max_pitch else {
            return pitch;
        };
        let Some(unit) = direction.try_normalize() else {
            return pitch;
        };

        let elevation = unit.dot(self.camera.up).clamp(-1.0, 1.0).asin();
        let desired = (elevation - pitch).clamp(-limit, limit);
        elevation - desired
    }

    fn refresh_right(&mut self) {
        if let Some(right) = Vec3::Y.cross(self.forward_v()).try_normalize() {
            self.last_right = right;
        }
    }
}
