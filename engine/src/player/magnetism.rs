//! Surface Magnetism
//!
//! Keeps a fast grounded actor glued to ramps and slope transitions. A
//! downward probe finds the surface normal and an impulse pushes into the
//! surface, growing with both speed and the gap to the surface.

use glam::Vec3;

use super::config::MovementConfig;
use crate::physics::{ForceMode, LayerMask, PhysicsBody, SceneQuery};

/// Magnetism runs when moving fast enough, or when there is no movement
/// input at all so the actor settles instead of creeping down slopes.
pub fn engages(speed: f32, has_input: bool, config: &MovementConfig) -> bool {
    speed > config.magnetism_min_velocity || !has_input
}

/// Impulse toward the surface under `position`, if one is within range.
pub fn surface_impulse<S: SceneQuery>(position: Vec3, speed: f32, config: &MovementConfig, scene: &S) -> Option<Vec3> {
    let hit = scene.raycast(position + Vec3::Y, Vec3::NEG_Y, config.magnetism_range, LayerMask::GROUND)?;
    Some(-hit.normal * config.magnetism_strength * hit.distance * (speed * config.magnetism_velocity_scaling))
}

/// Probes and applies the magnetism impulse to `body`. Returns the impulse.
pub fn apply<B, S>(body: &mut B, scene: &S, speed: f32, config: &MovementConfig) -> Option<Vec3>
where
    B: PhysicsBody,
    S: SceneQuery,
{
    let impulse = surface_impulse(body.position(), speed, config, scene)?;
    log::trace!("magnetism impulse {:?}", impulse);
    body.add_force(impulse, ForceMode::Impulse);
    Some(impulse)
}
