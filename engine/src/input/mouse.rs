//! Mouse Input Module
//!
//! Button state for the grapple trigger, with edge detection.
//! Decoupled from any windowing system to use generic types.

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// State of the three main mouse buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl ButtonState {
    /// Create a new button state with all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update button state for a specific button.
    pub fn set(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Middle => self.middle = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Other(_) => {} // Ignore extra buttons for now
        }
    }

    /// Check if a specific button is pressed.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Other(_) => false,
        }
    }

    /// Reset all buttons to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Mouse button state with the previous frame kept for edge detection.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    pub buttons: ButtonState,
    previous: ButtonState,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        self.buttons.set(button, pressed);
    }

    /// True if `button` went down since the last [`end_frame`](Self::end_frame).
    pub fn just_pressed(&self, button: MouseButton) -> bool {
        self.buttons.is_pressed(button) && !self.previous.is_pressed(button)
    }

    pub fn end_frame(&mut self) {
        self.previous = self.buttons;
    }

    pub fn reset(&mut self) {
        self.buttons.reset();
        self.previous.reset();
    }
}
