//! Physics module
//!
//! The collaborators the movement core talks to: a rigid body it drives and a
//! scene it probes. Both are traits ([`PhysicsBody`], [`SceneQuery`]) so a host
//! engine can plug in its own; [`SimBody`] and [`CollisionWorld`] are small
//! built-in implementations for tests and the sandbox.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//! - Mass in kg
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types re-exported from glam, [`ForceMode`]
//! - [`collision`] - Ray intersection primitives
//! - [`world`] - Layers, scene queries and the built-in collision world
//! - [`body`] - The physics-body seam and a simple simulated body

pub mod body;
pub mod collision;
pub mod types;
pub mod world;

pub use body::{ForceAccumulator, PhysicsBody, SimBody};
pub use collision::{RayHit, aabb_surface_normal, ray_aabb_intersect};
pub use types::{ForceMode, Quat, Vec2, Vec3};
pub use world::{AnchorId, CollisionWorld, LayerMask, SceneQuery};
