//! Physics type re-exports from glam
//!
//! This module provides the core mathematical types used throughout
//! the physics system, re-exported from the glam library, plus the
//! force application modes understood by [`PhysicsBody`](super::PhysicsBody).

pub use glam::{Quat, Vec2, Vec3};

/// How a force handed to a body changes its velocity.
///
/// Forces are accumulated during a tick and applied by the integrator after
/// the controller has committed its velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force in newtons: `dv = F * dt / mass`.
    Force,
    /// Instant impulse in newton-seconds: `dv = I / mass`.
    Impulse,
    /// Instant velocity change, ignores mass: `dv = v`.
    VelocityChange,
}
