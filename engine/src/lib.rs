//! Rolling Sphere Engine Library
//!
//! Per-frame physics for a spherical player avatar moving through a static
//! scene of triangles and axis-aligned boxes, and the free-look follow
//! camera whose basis vectors drive player-relative movement.
//!
//! # Modules
//!
//! - [`physics`] - Collision sphere, static primitives, closest-point queries
//! - [`camera`] - Follow camera controller and view transform
//! - [`input`] - Explicit per-frame input and movement intent
//! - [`world`] - Scene ownership and the reference frame driver
//! - [`config`] - JSON tuning for a sandbox run
//!
//! # Example
//!
//! ```ignore
//! use rolling_sphere_engine::config::SandboxConfig;
//! use rolling_sphere_engine::input::FrameInput;
//! use rolling_sphere_engine::world::{Scene, Simulation};
//! use glam::{Vec2, Vec3};
//!
//! let mut scene = Scene::new();
//! scene.add_box(Vec3::new(-1.0, -100.0, -10.0), Vec3::new(1.0, 10.0, 1.0))?;
//!
//! let mut sim = Simulation::from_config(scene, &SandboxConfig::default(), Vec2::ZERO)?;
//!
//! // Each frame:
//! let report = sim.step(&FrameInput::idle(1.0 / 60.0, mouse_position))?;
//! draw_sphere(report.sphere_position, report.sphere_radius, report.debug_color);
//! ```

pub mod camera;
pub mod config;
pub mod input;
pub mod physics;
pub mod world;

// Re-export commonly used types at crate level
pub use camera::{Camera, CameraController};
pub use config::{ConfigError, SandboxConfig};
pub use input::{FrameInput, InputState, KeyCode};
pub use physics::{Collider, CollisionSphere, PhysicsError, StaticBox, StaticTriangle};
pub use world::{BodyHandle, FrameReport, Scene, Simulation};
