//! Keyboard Input Module
//!
//! Contains keyboard state tracking for movement keys.
//! Decoupled from any windowing system to use generic key codes.

/// Generic key codes for movement input, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    C,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

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
    /// W / Up - move forward
    pub forward: bool,
    /// S / Down - move backward
    pub backward: bool,
    /// A / Left - strafe left
    pub left: bool,
    /// D / Right - strafe right
    pub right: bool,
    /// Space - jump
    pub jump: bool,
    /// Shift - sprint toggle
    pub sprint: bool,
    /// Ctrl / C - crouch and slide
    pub crouch: bool,
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
        let slot = match key {
            KeyCode::W | KeyCode::ArrowUp => &mut self.forward,
            KeyCode::S | KeyCode::ArrowDown => &mut self.backward,
            KeyCode::A | KeyCode::ArrowLeft => &mut self.left,
            KeyCode::D | KeyCode::ArrowRight => &mut self.right,
            KeyCode::Space => &mut self.jump,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => &mut self.sprint,
            KeyCode::ControlLeft | KeyCode::ControlRight | KeyCode::C => &mut self.crouch,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    /// Check if any directional key is currently pressed.
    pub fn any_direction(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Reset all movement keys to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Get the forward/backward movement direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Get the left/right movement direction (-1, 0, or 1).
    pub fn right_axis(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }
}

/// Keyboard state with the previous frame kept for edge detection.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Keys held this frame
    pub movement: MovementKeys,
    /// Keys held at the end of the previous frame
    previous: MovementKeys,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// Returns `true` if the key was handled as a movement key.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        self.movement.handle_key(key, pressed)
    }

    /// Keys that went down since the last [`end_frame`](Self::end_frame).
    pub fn pressed(&self) -> MovementKeys {
        edge(self.movement, self.previous)
    }

    /// Keys that came up since the last [`end_frame`](Self::end_frame).
    pub fn released(&self) -> MovementKeys {
        edge(self.previous, self.movement)
    }

    /// Latches the current keys as the previous frame.
    pub fn end_frame(&mut self) {
        self.previous = self.movement;
    }

    /// Reset all keyboard state.
    pub fn reset(&mut self) {
        self.movement.reset();
        self.previous.reset();
    }
}

/// Keys held in `now` but not in `before`.
fn edge(now: MovementKeys, before: MovementKeys) -> MovementKeys {
    MovementKeys {
        forward: now.forward && !before.forward,
        backward: now.backward && !before.backward,
        left: now.left && !before.left,
        right: now.right && !before.right,
        jump: now.jump && !before.jump,
        sprint: now.sprint && !before.sprint,
        crouch: now.crouch && !before.crouch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys_default() {
        let keys = MovementKeys::new();
        assert!(!keys.any_direction());
        assert_eq!(keys.forward_axis(), 0);
        assert_eq!(keys.right_axis(), 0);
    }

    #[test]
    fn test_movement_keys_forward() {
        let mut keys = MovementKeys::new();
        assert!(keys.handle_key(KeyCode::W, true));
        assert!(keys.forward);
        assert!(keys.any_direction());
        assert_eq!(keys.forward_axis(), 1);
    }

    #[test]
    fn test_movement_axes() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        keys.handle_key(KeyCode::S, true);
        // Both pressed cancels out
        assert_eq!(keys.forward_axis(), 0);

        keys.handle_key(KeyCode::D, true);
        assert_eq!(keys.right_axis(), 1);
    }

    #[test]
    fn test_crouch_aliases() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::C, true);
        assert!(keys.crouch);
        keys.handle_key(KeyCode::C, false);
        keys.handle_key(KeyCode::ControlLeft, true);
        assert!(keys.crouch);
    }

    #[test]
    fn test_non_movement_key() {
        let mut keys = MovementKeys::new();
        assert!(!keys.handle_key(KeyCode::Escape, true));
        assert!(!keys.any_direction());
    }

    #[test]
    fn test_press_and_release_edges() {
        let mut keyboard = KeyboardState::new();
        keyboard.handle_key(KeyCode::Space, true);
        assert!(keyboard.pressed().jump);
        keyboard.end_frame();

        // Held: no new edge
        assert!(!keyboard.pressed().jump);

        keyboard.handle_key(KeyCode::Space, false);
        assert!(keyboard.released().jump);
        keyboard.end_frame();
        assert!(!keyboard.released().jump);
    }
}
