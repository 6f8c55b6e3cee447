//! Input Module
//!
//! Platform-agnostic keyboard and mouse state, and the abstract per-frame
//! input record the movement controller consumes. The controller never sees
//! keys or buttons, only [`FrameInput`], so any input backend can drive it.
//!
//! # Example
//!
//! ```rust,ignore
//! use hookshot_engine::input::{InputState, KeyCode, MouseButton};
//!
//! let mut input = InputState::new();
//!
//! // Window events
//! input.keyboard.handle_key(KeyCode::W, true);
//! input.mouse.set_button(MouseButton::Right, true);
//!
//! // Once per rendered frame
//! let frame = input.frame_input();
//! controller.handle_input(&frame, body.position(), &world);
//! input.end_frame();
//! ```

pub mod keyboard;
pub mod mouse;

pub use keyboard::{KeyCode, KeyboardState, MovementKeys};
pub use mouse::{ButtonState, MouseButton, MouseState};

use glam::Vec2;

/// One frame of movement input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// (strafe right, forward), each in [-1, 1]
    pub move_axis: Vec2,
    /// Jump went down this frame
    pub jump_pressed: bool,
    /// Crouch is held
    pub crouch_held: bool,
    /// Crouch went down this frame
    pub crouch_pressed: bool,
    /// Sprint is held
    pub sprint_held: bool,
    /// Sprint went down this frame
    pub sprint_pressed: bool,
    /// Sprint came up this frame
    pub sprint_released: bool,
    /// Grapple fire went down this frame
    pub grapple_pressed: bool,
}

impl FrameInput {
    /// Input pushing the given axes and nothing else.
    pub fn moving(right: f32, forward: f32) -> Self {
        Self {
            move_axis: Vec2::new(right, forward),
            ..Default::default()
        }
    }
}

/// Combined input state for both keyboard and mouse.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
}

impl InputState {
    /// Create a new input state with all inputs in their default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds this frame's [`FrameInput`]. Grapple fires on the right button.
    pub fn frame_input(&self) -> FrameInput {
        let held = self.keyboard.movement;
        let pressed = self.keyboard.pressed();
        let released = self.keyboard.released();

        FrameInput {
            move_axis: Vec2::new(held.right_axis() as f32, held.forward_axis() as f32),
            jump_pressed: pressed.jump,
            crouch_held: held.crouch,
            crouch_pressed: pressed.crouch,
            sprint_held: held.sprint,
            sprint_pressed: pressed.sprint,
            sprint_released: released.sprint,
            grapple_pressed: self.mouse.just_pressed(MouseButton::Right),
        }
    }

    /// Latches this frame's state for next frame's edges.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
        self.mouse.end_frame();
    }

    /// Reset all input state to defaults.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.mouse.reset();
    }
}
