//! Edge-triggered actions
//!
//! Jump and swoosh fire once per key press, not once per frame the key is
//! held. [`ActionLatch`] turns a held/released signal into that edge.

/// Rising-edge detector for a held key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionLatch {
    held: bool,
}

impl ActionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's held state; returns `true` only on the press frame.
    pub fn trigger(&mut self, held: bool) -> bool {
        let fired = held && !self.held;
        self.held = held;
        fired
    }

    pub fn reset(&mut self) {
        self.held = false;
    }
}
