//! Player Module
//!
//! First-person traversal for a single actor.
//!
//! # Components
//!
//! - [`PlayerMovementController`] - Orchestrates every subsystem below over the
//!   input, presentation and physics ticks
//!   - Walk and sprint acceleration with a stance-dependent speed cap
//!   - Buffered jumps with coyote time
//! - [`MovementConfig`] - Every tunable, loadable from JSON and validated
//! - [`GroundSampler`] - Ring of downward probes deciding grounded state
//! - [`StanceController`] - Crouch and stand transitions with a headroom lock
//! - [`SlideController`] - Slide entry boost and slope sliding
//! - [`MantleDetector`] - Three-probe ledge detection
//! - [`GrappleController`] - Anchor targeting, pull and the [`RopeEffect`]
//! - [`magnetism`] - Keeps fast actors glued to ramps

pub mod config;
pub mod crouch;
pub mod flags;
pub mod grapple;
pub mod ground;
pub mod jump_buffer;
pub mod magnetism;
pub mod mantle;
pub mod movement_controller;
pub mod rope;
pub mod slide;
pub mod velocity;

pub use config::{ConfigError, MovementConfig, DEFAULT_CROUCH_HEIGHT, DEFAULT_STANDING_HEIGHT};
pub use crouch::{Stance, StanceController};
pub use flags::{MovementFlags, Traversal};
pub use grapple::{GrappleController, GrappleStep, GrappleTarget, ViewPose};
pub use ground::{GroundSampler, GroundTransition};
pub use jump_buffer::{BoolRingBuffer, JumpAdmission, JumpBuffers};
pub use mantle::{LedgeProbe, MantleDetector, MantleStep};
pub use movement_controller::PlayerMovementController;
pub use rope::{EasingCurve, RopeEffect};
pub use slide::{SlideController, SlopeRange, SlopeSample};
pub use velocity::{VelocitySample, speed_cap};
