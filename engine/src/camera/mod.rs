//! Camera Module
//!
//! Provides the follow camera that rides the player sphere and the view
//! transform it exposes to the renderer.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod fps_controller;
pub mod view;

pub use fps_controller::{
    CameraConfig, CameraController, DEFAULT_EYE_HEIGHT, DEFAULT_ROTATION_SPEED,
};
pub use view::{Camera, DEFAULT_FOVY, Projection};
