//! Hookshot Engine Library
//!
//! A physics-driven first-person traversal controller: walking, sprinting,
//! crouching, sliding, buffered jumps, ledge mantles and a grapple hookshot.
//!
//! # Modules
//!
//! - [`physics`] - Rigid body and collision-query seams, plus a small
//!   collision world and body for hosting the controller
//! - [`input`] - Platform-agnostic input handling for keyboard and mouse
//! - [`player`] - The traversal controller and its subsystems
//!
//! # Example
//!
//! ```ignore
//! use hookshot_engine::input::{InputState, KeyCode};
//! use hookshot_engine::physics::{CollisionWorld, SimBody, Vec3};
//! use hookshot_engine::player::{MovementConfig, PlayerMovementController, ViewPose};
//!
//! let mut world = CollisionWorld::new();
//! world.add_floor(0.0, 50.0);
//! world.add_anchor(Vec3::new(0.0, 8.0, -12.0), 0.25);
//!
//! let mut body = SimBody::new(Vec3::ZERO, 2.0);
//! let mut controller = PlayerMovementController::new(MovementConfig::default())?;
//! let mut input = InputState::new();
//!
//! input.keyboard.handle_key(KeyCode::W, true);
//!
//! controller.handle_input(&input.frame_input(), body.position, &world);
//! let view = ViewPose::new(controller.view_origin(body.position), Vec3::NEG_Z);
//! controller.late_update(&view, body.position, &world, 1.0 / 60.0);
//! controller.fixed_update(&mut body, &world, 0.02);
//! body.integrate(0.02, &world);
//! input.end_frame();
//! ```

pub mod input;
pub mod physics;
pub mod player;

// Re-export commonly used input types
pub use input::{FrameInput, InputState, KeyCode, KeyboardState, MouseButton, MouseState};
// Re-export physics seams
pub use physics::{CollisionWorld, PhysicsBody, SceneQuery, SimBody};
// Re-export player types
pub use player::{MovementConfig, MovementFlags, PlayerMovementController};
