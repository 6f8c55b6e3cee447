//! Player Crouch System
//!
//! Drives the collider height and head anchor between standing and crouched.
//!
//! # Height Transitions
//!
//! Both heights move linearly by a fixed amount per physics step,
//! `(standing - crouch) / (transition_time / dt)`, so a full transition takes
//! `transition_time` seconds at any step rate. Heights snap exactly to the
//! target when they reach it.
//!
//! Standing up is blocked while a short upward ray from just below the top of
//! the collider hits the ground layer; the step is skipped and retried on the
//! next one.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hookshot_engine::player::StanceController;
//!
//! let mut stance = StanceController::new(&config);
//!
//! // Each physics step:
//! stance.update(&mut body, &scene, crouch_requested, dt, &config);
//! let camera_mount = body.position() + Vec3::Y * stance.head_height();
//! ```

use glam::Vec3;

use super::config::MovementConfig;
use crate::physics::{LayerMask, PhysicsBody, SceneQuery};

/// The headroom ray starts this far below the top of the collider.
const HEADROOM_PROBE_DROP: f32 = 0.5;

/// Headroom ray length before adding one step of growth.
const HEADROOM_PROBE_BASE: f32 = 0.49;

/// Where the stance is in its transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stance {
    /// Full height
    #[default]
    Standing,
    /// Shrinking toward crouch height
    TransitioningDown,
    /// Fully crouched
    Crouching,
    /// Growing back toward standing height
    TransitioningUp,
}

/// Collider and head-anchor height state.
#[derive(Debug, Clone)]
pub struct StanceController {
    stance: Stance,

    /// Current collider height in meters
    height: f32,

    /// Current head anchor height above the feet
    head_height: f32,

    /// Set on reaching full crouch, cleared on reaching full height
    crouched: bool,
}

impl StanceController {
    /// Starts standing at the configured heights.
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            stance: Stance::Standing,
            height: config.standing_height,
            head_height: config.head_height,
            crouched: false,
        }
    }

    pub fn stance(&self) -> Stance {
        self.stance
    }

    /// Current collider height in meters.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Head anchor height above the feet.
    pub fn head_height(&self) -> f32 {
        self.head_height
    }

    /// Fully crouched, or still standing back up from a full crouch.
    pub fn is_crouching(&self) -> bool {
        self.crouched
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.stance, Stance::TransitioningDown | Stance::TransitioningUp)
    }

    /// Height change applied per step of length `dt`.
    pub fn step_delta(dt: f32, config: &MovementConfig) -> f32 {
        let depth = config.crouch_depth();
        if config.crouch_transition_time <= 0.0 {
            depth
        } else {
            depth / (config.crouch_transition_time / dt)
        }
    }

    /// Advances the transition one physics step and resizes the body collider.
    ///
    /// Returns true if the height changed.
    pub fn update<B, S>(&mut self, body: &mut B, scene: &S, crouch_requested: bool, dt: f32, config: &MovementConfig) -> bool
    where
        B: PhysicsBody,
        S: SceneQuery,
    {
        let delta = Self::step_delta(dt, config);
        let before = self.height;

        if crouch_requested {
            self.crouch_step(delta, config);
        } else {
            self.stand_step(body.position(), delta, config, scene);
        }

        let changed = self.height != before;
        if changed {
            body.set_collider_height(self.height);
        }
        changed
    }

    fn crouch_step(&mut self, delta: f32, config: &MovementConfig) {
        let crouched_head = config.head_height - config.crouch_depth();

        if self.height > config.crouch_height {
            self.height -= delta;
            self.head_height -= delta;
            self.stance = Stance::TransitioningDown;
        }

        if self.height <= config.crouch_height {
            self.height = config.crouch_height;
            self.head_height = crouched_head;
            self.stance = Stance::Crouching;
            self.crouched = true;
        }
    }

    fn stand_step<S: SceneQuery>(&mut self, position: Vec3, delta: f32, config: &MovementConfig, scene: &S) {
        if self.height < config.standing_height {
            let origin = position + Vec3::Y * (self.height - HEADROOM_PROBE_DROP);
            let blocked = scene.ray_test(origin, Vec3::Y, HEADROOM_PROBE_BASE + delta, LayerMask::GROUND);

            if blocked {
                log::trace!("stand-up blocked at height {:.3}", self.height);
            } else {
                self.height += delta;
                self.head_height += delta;
                self.stance = Stance::TransitioningUp;
            }
        }

        if self.height >= config.standing_height {
            self.height = config.standing_height;
            self.head_height = config.head_height;
            self.stance = Stance::Standing;
            self.crouched = false;
        }
    }

    /// Snaps back to standing without a transition (respawn, teleport).
    pub fn reset<B: PhysicsBody>(&mut self, body: &mut B, config: &MovementConfig) {
        *self = Self::new(config);
        body.set_collider_height(self.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{CollisionWorld, SimBody};

    const DT: f32 = 0.02;
    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn open_floor() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_floor(0.0, 50.0);
        world
    }

    fn body(config: &MovementConfig) -> SimBody {
        SimBody::new(Vec3::ZERO, config.standing_height)
    }

    #[test]
    fn test_default_controller() {
        let config = MovementConfig::default();
        let stance = StanceController::new(&config);
        assert_eq!(stance.stance(), Stance::Standing);
        assert!(approx_eq(stance.height(), config.standing_height));
        assert!(approx_eq(stance.head_height(), config.head_height));
        assert!(!stance.is_crouching());
        assert!(!stance.is_transitioning());
    }

    #[test]
    fn test_step_delta_matches_transition_time() {
        let config = MovementConfig::default();
        // 1m over 0.1s at 50Hz is 0.2m per step
        assert!(approx_eq(StanceController::step_delta(DT, &config), 0.2));

        let instant = MovementConfig {
            crouch_transition_time: 0.0,
            ..Default::default()
        };
        assert!(approx_eq(StanceController::step_delta(DT, &instant), 1.0));
    }

    #[test]
    fn test_crouch_height_decreases_monotonically() {
        let config = MovementConfig::default();
        let world = open_floor();
        let mut body = body(&config);
        let mut stance = StanceController::new(&config);

        let mut previous = stance.height();
        for _ in 0..20 {
            stance.update(&mut body, &world, true, DT, &config);
            let height = stance.height();
            assert!(height >= config.crouch_height, "undershot to {}", height);
            if previous > config.crouch_height {
                assert!(height < previous, "height did not decrease: {} -> {}", previous, height);
            }
            previous = height;
        }

        assert_eq!(stance.height(), config.crouch_height);
        assert_eq!(body.height, config.crouch_height);
        assert_eq!(stance.stance(), Stance::Crouching);
        assert!(stance.is_crouching());
        assert!(approx_eq(stance.head_height(), config.head_height - config.crouch_depth()));
    }

    #[test]
    fn test_transition_takes_configured_time() {
        let config = MovementConfig::default();
        let world = open_floor();
        let mut body = body(&config);
        let mut stance = StanceController::new(&config);

        let mut steps = 0;
        while stance.stance() != Stance::Crouching {
            stance.update(&mut body, &world, true, DT, &config);
            steps += 1;
            assert!(steps < 100);
        }
        // 0.1s at 0.02s per step, plus one step of float slack
        assert!((5..=6).contains(&steps), "took {} steps", steps);
    }

    #[test]
    fn test_stands_back_up_in_open_space() {
        let config = MovementConfig::default();
        let world = open_floor();
        let mut body = body(&config);
        let mut stance = StanceController::new(&config);

        for _ in 0..10 {
            stance.update(&mut body, &world, true, DT, &config);
        }
        stance.update(&mut body, &world, false, DT, &config);
        assert_eq!(stance.stance(), Stance::TransitioningUp);
        // Still counts as crouching until fully upright
        assert!(stance.is_crouching());

        for _ in 0..10 {
            stance.update(&mut body, &world, false, DT, &config);
        }
        assert_eq!(stance.stance(), Stance::Standing);
        assert_eq!(stance.height(), config.standing_height);
        assert!(!stance.is_crouching());
    }

    #[test]
    fn test_cannot_stand_under_low_ceiling() {
        let config = MovementConfig::default();
        let mut world = open_floor();
        world.add_box(Vec3::new(-5.0, 1.1, -5.0), Vec3::new(5.0, 2.0, 5.0));
        let mut body = body(&config);
        let mut stance = StanceController::new(&config);

        for _ in 0..10 {
            stance.update(&mut body, &world, true, DT, &config);
        }
        let crouched = stance.height();

        for _ in 0..10 {
            let changed = stance.update(&mut body, &world, false, DT, &config);
            assert!(!changed);
            assert_eq!(stance.height(), crouched);
        }
        assert!(stance.is_crouching());
    }

    #[test]
    fn test_reset_restores_standing() {
        let config = MovementConfig::default();
        let world = open_floor();
        let mut body = body(&config);
        let mut stance = StanceController::new(&config);
        for _ in 0..3 {
            stance.update(&mut body, &world, true, DT, &config);
        }

        stance.reset(&mut body, &config);
        assert_eq!(stance.stance(), Stance::Standing);
        assert_eq!(body.height, config.standing_height);
    }
}
