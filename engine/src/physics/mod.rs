//! Physics module
//!
//! Per-frame motion and collision resolution for the player sphere.
//! Built from scratch on glam; there is no external physics library.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, velocities in m/s, accelerations in m/s².
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types re-exported from glam, plus axis-angle rotation
//! - [`collision`] - Static primitives (triangle, box) and closest-point queries
//! - [`sphere`] - The dynamic collision sphere: integration, jump, swoosh, push-out
//! - [`error`] - Error taxonomy for invalid inputs and geometry

pub mod collision;
pub mod error;
pub mod sphere;
pub mod types;

// Re-export commonly used types at the physics module level
pub use collision::{
    Collider, Contact, StaticBox, StaticTriangle, closest_point_on_box,
    closest_point_on_segment, closest_point_on_triangle,
};
pub use error::PhysicsError;
pub use sphere::{CONTACT_SLOP, CollisionSphere, DebugColor, FRICTION, GRAVITY, SphereConfig};
pub use types::{Quat, Vec2, Vec3, rotate_about_axis};
