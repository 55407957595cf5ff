//! Keyboard Input Module
//!
//! Contains keyboard state tracking for movement keys and the two player
//! actions. Decoupled from any windowing system to use generic key codes.

/// Generic key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,

    // Action keys
    Space,
    ShiftLeft,
    ShiftRight,

    // Control keys
    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Tracks the current state of movement keys.
///
/// This struct maintains which movement keys are currently pressed,
/// allowing smooth continuous movement when keys are held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    /// W key - move toward the view direction
    pub forward: bool,
    /// S key - move away from the view direction
    pub backward: bool,
    /// A key - strafe left
    pub left: bool,
    /// D key - strafe right
    pub right: bool,
}

impl MovementKeys {
    /// Create a new movement keys state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update movement state based on key press/release.
    ///
    /// Returns `true` if the key was a movement key and was handled,
    /// `false` otherwise.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key {
            KeyCode::W => self.forward = pressed,
            KeyCode::S => self.backward = pressed,
            KeyCode::A => self.left = pressed,
            KeyCode::D => self.right = pressed,
            _ => return false,
        }
        true
    }

    /// Check if any movement key is currently pressed.
    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Reset all movement keys to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Complete keyboard state tracking.
///
/// Movement keys plus the held state of the jump (Space) and swoosh
/// (either Shift) keys.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Movement key states
    pub movement: MovementKeys,
    /// Space held
    pub jump: bool,
    /// Shift held
    pub swoosh: bool,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// Returns `true` if the key maps to movement or an action.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if self.movement.handle_key(key, pressed) {
            return true;
        }
        match key {
            KeyCode::Space => self.jump = pressed,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.swoosh = pressed,
            _ => return false,
        }
        true
    }

    /// Reset all keyboard state.
    pub fn reset(&mut self) {
        self.movement.reset();
        self.jump = false;
        self.swoosh = false;
    }
}
