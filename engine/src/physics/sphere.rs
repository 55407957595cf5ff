//! Collision Sphere
//!
//! The single dynamic body of the scene: a sphere with kinematic state
//! that integrates gravity and ground friction each frame and is then
//! pushed out of static primitives one at a time.
//!
//! # Frame Contract
//!
//! 1. [`CollisionSphere::jump`] / [`CollisionSphere::swoosh`] (optional)
//! 2. [`CollisionSphere::update`] latches `was_standing` and integrates
//! 3. [`CollisionSphere::begin_contact_pass`] clears the per-frame contact flags
//! 4. [`CollisionSphere::check_collision`] for every primitive, in a fixed order
//!
//! Contact resolution is sequential: each check starts from the position
//! corrected by the previous one, so the final position depends on the
//! order of the primitives.

use glam::Vec3;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::collision::{Collider, Contact, StaticBox, StaticTriangle};
use super::error::PhysicsError;
use super::types::rotate_about_axis;

/// Gravity acceleration along Y in units per second squared
pub const GRAVITY: f32 = -21.0;

/// Velocity multiplier applied on every grounded frame
pub const FRICTION: f32 = 0.99;

/// Distance beyond the radius within which a resting sphere still counts as
/// standing. Only the ground flag uses it; nothing is moved or marked
/// colliding unless the sphere is closer than `radius`.
pub const CONTACT_SLOP: f32 = 1e-4;

/// Speeds below this have no direction to redirect.
const MIN_SWOOSH_SPEED: f32 = 1e-6;

/// Squared cross-product length under which two directions are parallel.
const PARALLEL_EPSILON: f32 = 1e-12;

/// Tuning for the sphere's integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    /// Gravity along Y (negative pulls down)
    pub gravity: f32,
    /// Grounded velocity multiplier per frame, in (0, 1]
    pub friction: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
        }
    }
}

impl SphereConfig {
    /// Check the values are usable by the integrator.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::NonFinite("gravity"));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(PhysicsError::InvalidFriction(self.friction));
        }
        Ok(())
    }
}

/// Debug visualization state of the sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugColor {
    /// No contact this frame (drawn black)
    Idle,
    /// Touching at least one primitive this frame (drawn red)
    Colliding,
}

impl DebugColor {
    /// RGBA bytes for the wireframe.
    pub fn rgba(self) -> [u8; 4] {
        match self {
            DebugColor::Idle => [0, 0, 0, 255],
            DebugColor::Colliding => [230, 41, 55, 255],
        }
    }
}

/// The player body.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionSphere {
    /// World-space center
    position: Vec3,
    /// Velocity in units per second
    velocity: Vec3,
    /// Constant `(0, gravity, 0)`
    acceleration: Vec3,
    /// Fixed at construction
    radius: f32,
    /// Grounded velocity multiplier
    friction: f32,
    /// Ground contact found during the last contact pass
    standing: bool,
    /// `standing` as it was at the start of the last update
    was_standing: bool,
    /// Any contact during the current contact pass
    colliding: bool,
}

impl CollisionSphere {
    /// Create a stationary sphere with default gravity and friction.
    ///
    /// # Errors
    ///
    /// * `InvalidRadius` if `radius` is not finite and positive
    /// * `NonFinite` if `position` contains NaN or infinity
    pub fn new(position: Vec3, radius: f32) -> Result<Self, PhysicsError> {
        Self::with_config(position, radius, &SphereConfig::default())
    }

    /// Create a stationary sphere with custom integrator tuning.
    pub fn with_config(
        position: Vec3,
        radius: f32,
        config: &SphereConfig,
    ) -> Result<Self, PhysicsError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(PhysicsError::InvalidRadius(radius));
        }
        if !position.is_finite() {
            return Err(PhysicsError::NonFinite("sphere position"));
        }
        config.validate()?;

        Ok(Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::new(0.0, config.gravity, 0.0),
            radius,
            friction: config.friction,
            standing: false,
            was_standing: false,
            colliding: false,
        })
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleport the sphere. Velocity and contact state are kept.
    pub fn set_position(&mut self, position: Vec3) -> Result<(), PhysicsError> {
        if !position.is_finite() {
            return Err(PhysicsError::NonFinite("sphere position"));
        }
        self.position = position;
        Ok(())
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec3) -> Result<(), PhysicsError> {
        if !velocity.is_finite() {
            return Err(PhysicsError::NonFinite("sphere velocity"));
        }
        self.velocity = velocity;
        Ok(())
    }

    #[inline]
    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Ground contact found by the most recent contact pass.
    #[inline]
    pub fn is_standing(&self) -> bool {
        self.standing
    }

    /// Ground contact as latched at the start of the most recent update.
    #[inline]
    pub fn was_standing(&self) -> bool {
        self.was_standing
    }

    #[inline]
    pub fn is_colliding(&self) -> bool {
        self.colliding
    }

    /// Grounded now or one frame ago.
    #[inline]
    pub fn can_jump(&self) -> bool {
        self.was_standing || self.standing
    }

    pub fn debug_color(&self) -> DebugColor {
        if self.colliding {
            DebugColor::Colliding
        } else {
            DebugColor::Idle
        }
    }

    /// Advance the sphere by one frame.
    ///
    /// Airborne: gravity is integrated once, `velocity += acceleration * dt`.
    /// Grounded: friction scales the velocity and `input_velocity` is added
    /// as a per-frame impulse (not scaled by `dt`).
    ///
    /// # Errors
    ///
    /// * `InvalidTimeStep` if `dt` is negative or not finite
    /// * `NonFinite` if `input_velocity` contains NaN or infinity
    ///
    /// On error the sphere is left untouched.
    pub fn update(&mut self, input_velocity: Vec3, dt: f32) -> Result<(), PhysicsError> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(PhysicsError::InvalidTimeStep(dt));
        }
        if !input_velocity.is_finite() {
            return Err(PhysicsError::NonFinite("input velocity"));
        }

        self.was_standing = self.standing;

        if self.standing {
            self.velocity = self.velocity * self.friction + input_velocity;
        } else {
            self.velocity += self.acceleration * dt;
        }

        self.position += self.velocity * dt;
        Ok(())
    }

    /// Add an upward impulse if the sphere is grounded now or was last frame.
    ///
    /// Returns whether the impulse was applied.
    pub fn jump(&mut self, force: f32) -> bool {
        if !force.is_finite() {
            warn!("ignoring non-finite jump force {force}");
            return false;
        }
        if !self.can_jump() {
            return false;
        }
        self.velocity.y += force;
        debug!("jump: force {force}, velocity {}", self.velocity);
        true
    }

    /// Redirect the current velocity toward `direction`, keeping its speed.
    ///
    /// Only works while grounded now or one frame ago. The velocity is
    /// rotated with Rodrigues' formula about `v × d` by the angle between
    /// them. Zero velocity or zero direction leave the sphere untouched;
    /// an exactly opposite direction rotates by half a turn about an
    /// arbitrary perpendicular axis.
    ///
    /// Returns whether the velocity was redirected.
    pub fn swoosh(&mut self, direction: Vec3) -> bool {
        if !self.can_jump() {
            return false;
        }

        let speed = self.velocity.length();
        if !(speed > MIN_SWOOSH_SPEED) {
            return false;
        }
        let Some(target) = direction.try_normalize() else {
            return false;
        };
        let current = self.velocity / speed;

        let cos = current.dot(target).clamp(-1.0, 1.0);
        let mut axis = current.cross(target);
        if axis.length_squared() <= PARALLEL_EPSILON {
            if cos > 0.0 {
                self.velocity = target * speed;
                debug!("swoosh: already aligned, velocity {}", self.velocity);
                return true;
            }
            axis = current.any_orthonormal_vector();
        }

        let rotated = rotate_about_axis(current, axis, cos.acos());
        self.velocity = rotated.normalize_or_zero() * speed;
        debug!("swoosh: velocity {}", self.velocity);
        true
    }

    /// Clear the per-frame contact flags ahead of a contact pass.
    ///
    /// This is the only place `standing` and `colliding` are reset.
    pub fn begin_contact_pass(&mut self) {
        self.colliding = false;
        self.standing = false;
    }

    /// Resolve the sphere against one primitive of either kind.
    pub fn check_collision(&mut self, collider: &Collider) -> Option<Contact> {
        match collider {
            Collider::Triangle(tri) => self.check_triangle(tri),
            Collider::Box(aabb) => self.check_box(aabb),
        }
    }

    /// Resolve the sphere against a triangle.
    ///
    /// With the center exactly on the triangle, the push-out direction is
    /// the face normal, flipped to oppose the current velocity.
    pub fn check_triangle(&mut self, tri: &StaticTriangle) -> Option<Contact> {
        let closest = tri.closest_point(self.position);
        self.resolve_contact(closest, |sphere| {
            let normal = tri.normal();
            if normal.dot(sphere.velocity) > 0.0 {
                (closest, -normal)
            } else {
                (closest, normal)
            }
        })
    }

    /// Resolve the sphere against an axis-aligned box.
    ///
    /// With the center inside the box, the sphere leaves through the
    /// nearest face.
    pub fn check_box(&mut self, aabb: &StaticBox) -> Option<Contact> {
        let closest = aabb.closest_point(self.position);
        self.resolve_contact(closest, |sphere| aabb.exit_face(sphere.position))
    }

    /// Push the sphere out of `closest` to exactly `radius`.
    ///
    /// `zero_distance` supplies the surface point and unit normal when the
    /// center sits on the surface and `position - closest` has no direction.
    fn resolve_contact<F>(&mut self, closest: Vec3, zero_distance: F) -> Option<Contact>
    where
        F: FnOnce(&Self) -> (Vec3, Vec3),
    {
        let offset = self.position - closest;
        let distance = offset.length();
        if distance >= self.radius + CONTACT_SLOP {
            return None;
        }

        if distance >= self.radius {
            // Resting on the surface: keep the ground flag, leave the position
            let grounded = closest.y < self.position.y;
            if grounded {
                self.standing = true;
            }
            return Some(Contact {
                point: closest,
                normal: offset / distance,
                penetration: 0.0,
                grounded,
            });
        }

        let (point, normal, penetration) = match offset.try_normalize() {
            Some(normal) => (closest, normal, (self.radius - distance).max(0.0)),
            None => {
                let (point, normal) = zero_distance(self);
                (point, normal, self.radius + self.position.distance(point))
            }
        };

        self.colliding = true;
        self.position = point + normal * self.radius;

        let grounded = point.y < self.position.y;
        if grounded {
            self.standing = true;
        }

        trace!(
            "contact at {point}: normal {normal}, penetration {penetration:.5}, grounded {grounded}"
        );

        Some(Contact {
            point,
            normal,
            penetration,
            grounded,
        })
    }
}
