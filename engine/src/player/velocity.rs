//! Velocity Model
//!
//! Splits the body velocity into its horizontal "walk" part and computes the
//! current speed cap from the movement state. The cap is recomputed on
//! every refresh so stance and sprint changes apply within one step.

use glam::Vec3;

use super::config::MovementConfig;

/// Horizontal speed cap for a movement state.
///
/// `crouched` covers both a finished crouch and a crouch still in progress.
pub fn speed_cap(config: &MovementConfig, sprinting: bool, crouched: bool) -> f32 {
    let sprint = if sprinting { config.sprint_speed_multiplier } else { 1.0 };
    let crouch = if crouched { config.crouch_speed_multiplier } else { 1.0 };
    config.base_move_speed * sprint * crouch
}

/// One read of the body velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocitySample {
    /// Full body velocity
    pub full: Vec3,
    /// Horizontal part (y = 0)
    pub walk: Vec3,
    /// Current horizontal speed cap
    pub cap: f32,
    /// `walk` rescaled to the cap; zero when not moving
    pub capped: Vec3,
}

impl VelocitySample {
    pub fn new(velocity: Vec3, cap: f32) -> Self {
        let walk = Vec3::new(velocity.x, 0.0, velocity.z);
        Self {
            full: velocity,
            walk,
            cap,
            capped: walk.normalize_or_zero() * cap,
        }
    }

    pub fn walk_speed(&self) -> f32 {
        self.walk.length()
    }

    /// Walking faster than the current cap allows.
    pub fn over_cap(&self) -> bool {
        self.walk_speed() > self.cap
    }
}
