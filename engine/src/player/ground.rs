//! Ground Sampler
//!
//! A ring of downward rays around the actor's feet. The actor is grounded
//! when more than one ray hits, so a single ray grazing a corner does not
//! count as standing on it.
//!
//! After a jump or grapple launch the sampler is put on cooldown: it stops
//! sampling and keeps reporting airborne until the timer runs out, so the
//! launch frames do not immediately re-detect the ground they left.

use glam::{Quat, Vec3};

use super::config::MovementConfig;
use crate::physics::{LayerMask, SceneQuery};

/// Rays start this far above the feet.
const PROBE_LIFT: f32 = 0.5;

/// An edge in the grounded signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundTransition {
    Entered,
    Left,
}

/// Multi-ray ground probe with a launch cooldown.
#[derive(Debug, Clone, Default)]
pub struct GroundSampler {
    grounded: bool,
    cooldown: f32,
}

impl GroundSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Seconds left before sampling resumes.
    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown
    }

    /// Samples the ground (or ticks the cooldown) and reports any edge.
    pub fn update<S: SceneQuery>(
        &mut self,
        position: Vec3,
        rotation: Quat,
        dt: f32,
        config: &MovementConfig,
        scene: &S,
    ) -> Option<GroundTransition> {
        let was_grounded = self.grounded;

        if self.cooldown <= 0.0 {
            let contacts = count_contacts(position, rotation, config, scene);
            self.grounded = contacts > 1;
            log::trace!("ground probe: {} contacts", contacts);
        } else {
            self.cooldown = (self.cooldown - dt).max(0.0);
        }

        match (was_grounded, self.grounded) {
            (false, true) => Some(GroundTransition::Entered),
            (true, false) => Some(GroundTransition::Left),
            _ => None,
        }
    }

    /// Marks the actor airborne and suspends sampling for `cooldown` seconds.
    ///
    /// Returns true if the actor was grounded before the call.
    pub fn force_airborne(&mut self, cooldown: f32) -> bool {
        let was_grounded = self.grounded;
        self.grounded = false;
        self.cooldown = cooldown;
        was_grounded
    }
}

/// Casts the probe ring and counts hits on the ground layer.
pub fn count_contacts<S: SceneQuery>(position: Vec3, rotation: Quat, config: &MovementConfig, scene: &S) -> u32 {
    let resolution = config.ground_check_resolution.max(1);
    let step = std::f32::consts::TAU / resolution as f32;
    let reach = config.ground_check_distance + PROBE_LIFT;

    (0..resolution)
        .filter(|&i| {
            let angle = i as f32 * step;
            let offset = rotation * Vec3::new(angle.sin(), 0.0, angle.cos()) * config.ground_probe_radius;
            let origin = position + offset + Vec3::Y * PROBE_LIFT;
            scene.ray_test(origin, Vec3::NEG_Y, reach, LayerMask::GROUND)
        })
        .count() as u32
}
