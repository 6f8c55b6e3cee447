//! Slide and Slope Physics
//!
//! A slide starts when the actor crouches out of a forward sprint. It gets
//! one velocity boost on its first active step and then coasts under slide
//! drag for as long as the actor stays crouched and faster than the crouch
//! speed cap.
//!
//! While sliding, the surface under the actor is sampled. Slopes whose
//! steepness falls inside the configured angle range push the actor downhill
//! when it is already moving downhill ("slope sliding").
//!
//! # Slope gradient
//!
//! The surface normal is viewed side-on as a 2-D vector
//! `(rise, run) = (n.y, |n.xz|)`; its gradient is `run / rise`, which equals
//! `tan(angle)` for a surface tilted `angle` from horizontal. Angle limits
//! convert with `1 / tan(90° - angle)`.

use glam::{Vec2, Vec3};

use super::config::MovementConfig;
use super::velocity::VelocitySample;
use crate::physics::{ForceMode, LayerMask, PhysicsBody, SceneQuery};

/// Absorbs float error when a slope sits exactly on a range limit.
const GRADIENT_TOLERANCE: f32 = 1e-5;

/// Converts a slope angle in degrees to a rise/run gradient.
pub fn gradient_for_angle(angle_degrees: f32) -> f32 {
    1.0 / (90.0 - angle_degrees).to_radians().tan()
}

/// Gradient of the surface with the given normal. Vertical or overhanging
/// faces are infinitely steep.
pub fn gradient_of_normal(normal: Vec3) -> f32 {
    let side_on = Vec2::new(normal.y, Vec2::new(normal.x, normal.z).length()).normalize_or_zero();
    if side_on.x <= f32::EPSILON {
        f32::INFINITY
    } else {
        side_on.y / side_on.x
    }
}

/// Unit vector pointing down the slope, zero on flat ground.
pub fn downhill_direction(normal: Vec3) -> Vec3 {
    let slope_axis = normal.cross(Vec3::Y).normalize_or_zero();
    normal.cross(slope_axis).normalize_or_zero()
}

/// Inclusive gradient band of slidable slopes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeRange {
    pub min_gradient: f32,
    pub max_gradient: f32,
}

impl SlopeRange {
    pub fn from_config(config: &MovementConfig) -> Self {
        Self {
            min_gradient: gradient_for_angle(config.slide_slope_min_angle),
            max_gradient: gradient_for_angle(config.slide_slope_max_angle),
        }
    }

    pub fn contains(&self, gradient: f32) -> bool {
        gradient >= self.min_gradient - GRADIENT_TOLERANCE && gradient <= self.max_gradient + GRADIENT_TOLERANCE
    }
}

/// The surface directly under the actor, probed once per step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeSample {
    pub normal: Vec3,
    pub distance: f32,
    pub gradient: f32,
}

impl SlopeSample {
    /// Casts down from one meter above the feet over `magnetism_range`.
    pub fn probe<S: SceneQuery>(position: Vec3, config: &MovementConfig, scene: &S) -> Option<Self> {
        let hit = scene.raycast(position + Vec3::Y, Vec3::NEG_Y, config.magnetism_range, LayerMask::GROUND)?;
        Some(Self {
            normal: hit.normal,
            distance: hit.distance,
            gradient: gradient_of_normal(hit.normal),
        })
    }

    /// Slidable when inside `range` and the actor already moves downhill.
    pub fn slide_direction(&self, range: &SlopeRange, velocity: Vec3) -> Option<Vec3> {
        if !range.contains(self.gradient) {
            return None;
        }
        let downhill = downhill_direction(self.normal);
        (downhill.dot(velocity) > 0.0).then_some(downhill)
    }
}

/// Per-slide state: whether the entry boost is still owed.
#[derive(Debug, Clone, Default)]
pub struct SlideController {
    boost_pending: bool,
}

impl SlideController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the one-time entry boost.
    pub fn begin(&mut self) {
        self.boost_pending = true;
    }

    /// Drops an unpaid boost when the slide ends or is interrupted.
    pub fn cancel(&mut self) {
        self.boost_pending = false;
    }

    pub fn boost_pending(&self) -> bool {
        self.boost_pending
    }

    /// Runs one step of an active slide and reports whether it is slope sliding.
    pub fn step<B, S>(&mut self, body: &mut B, scene: &S, velocity: &VelocitySample, config: &MovementConfig) -> bool
    where
        B: PhysicsBody,
        S: SceneQuery,
    {
        if self.boost_pending {
            self.boost_pending = false;
            let boost = velocity.walk * config.slide_initial_velocity_coefficient;
            log::debug!("slide boost {:?}", boost);
            body.add_force(boost, ForceMode::VelocityChange);
        }

        let range = SlopeRange::from_config(config);
        let downhill = SlopeSample::probe(body.position(), config, scene)
            .and_then(|sample| sample.slide_direction(&range, velocity.full));

        match downhill {
            Some(direction) => {
                body.add_force(direction * config.slide_slope_force, ForceMode::Force);
                true
            }
            None => false,
        }
    }
}
