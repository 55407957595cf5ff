//! Input Module
//!
//! Explicit per-frame input for the simulation. Nothing here polls a device:
//! the driver feeds key events and pointer positions in, and each frame
//! samples a [`FrameInput`] to hand to the simulation. This keeps frames
//! replayable in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use rolling_sphere_engine::input::{InputState, KeyCode};
//!
//! let mut input = InputState::new();
//! input.keyboard.handle_key(KeyCode::W, true);
//! input.set_mouse_position(glam::Vec2::new(640.0, 360.0));
//!
//! let frame = input.sample(1.0 / 60.0);
//! simulation.step(&frame)?;
//! ```

pub mod actions;
pub mod intent;
pub mod keyboard;

use glam::Vec2;

// Re-export commonly used types at module level
pub use actions::ActionLatch;
pub use intent::{GROUND_SPEED, JUMP_FORCE, MovementConfig, SWOOSH_SPEED, flatten, movement_intent};
pub use keyboard::{KeyCode, KeyboardState, MovementKeys};

/// Everything the simulation consumes for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame (must be finite and >= 0)
    pub dt: f32,
    /// Current pointer position; the camera keeps the previous one
    pub mouse_position: Vec2,
    /// Held movement keys
    pub movement: MovementKeys,
    /// Jump key held (the simulation fires on the press edge)
    pub jump_held: bool,
    /// Swoosh key went down this frame
    pub swoosh_pressed: bool,
}

impl FrameInput {
    /// A frame with no input at all.
    pub fn idle(dt: f32, mouse_position: Vec2) -> Self {
        Self {
            dt,
            mouse_position,
            ..Default::default()
        }
    }
}

/// Combined keyboard and pointer state fed by the driver's event loop.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    mouse_position: Vec2,
    swoosh: ActionLatch,
}

impl InputState {
    /// Create a new input state with all inputs in their default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an absolute pointer position.
    pub fn set_mouse_position(&mut self, position: Vec2) {
        self.mouse_position = position;
    }

    /// Accumulate relative pointer motion (captured cursor).
    pub fn add_mouse_motion(&mut self, delta: Vec2) {
        self.mouse_position += delta;
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Produce this frame's input.
    ///
    /// Swoosh is reported only on the frame its key goes down.
    pub fn sample(&mut self, dt: f32) -> FrameInput {
        FrameInput {
            dt,
            mouse_position: self.mouse_position,
            movement: self.keyboard.movement,
            jump_held: self.keyboard.jump,
            swoosh_pressed: self.swoosh.trigger(self.keyboard.swoosh),
        }
    }

    /// Reset all input state to defaults.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.swoosh.reset();
    }
}
