//! Ledge Mantle
//!
//! Three horizontal rays are cast along the actor's facing at fixed heights
//! above the feet:
//!
//! | Probe    | Default height | Meaning                                   |
//! |----------|----------------|-------------------------------------------|
//! | head     | 2.5 m          | must be clear to start or keep mantling   |
//! | foothold | 1.5 m          | must hit a wall face to start             |
//! | cleared  | -0.1 m         | a miss while mantling means we are over   |
//!
//! A mantle is scripted: while it runs the controller overrides the velocity
//! with a fixed actor-relative vector instead of integrating forces.

use glam::Vec3;

use super::config::MovementConfig;
use crate::physics::{LayerMask, SceneQuery};

/// Results of the three mantle rays for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgeProbe {
    /// Nothing in front of the head probe
    pub head_clear: bool,
    /// Wall face in front of the foothold probe
    pub foothold: bool,
    /// Nothing in front of the lowest probe
    pub below_feet_clear: bool,
}

impl LedgeProbe {
    pub fn cast<S: SceneQuery>(position: Vec3, forward: Vec3, config: &MovementConfig, scene: &S) -> Self {
        let reach = config.mantle_probe_reach;
        let hits = |height: f32| scene.ray_test(position + Vec3::Y * height, forward, reach, LayerMask::GROUND);

        Self {
            head_clear: !hits(config.mantle_head_check_height),
            foothold: hits(config.mantle_foothold_height),
            below_feet_clear: !hits(config.mantle_cleared_height),
        }
    }
}

/// Outcome of one mantle evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MantleStep {
    /// Not mantling
    Idle,
    /// Mantling this step; the controller applies [`mantle_velocity`]
    Engaged,
    /// A running mantle ended this step
    Released,
}

/// Mantle eligibility gates.
#[derive(Debug, Clone)]
pub struct MantleDetector {
    can_mantle: bool,
    auto_mantle: bool,
}

impl Default for MantleDetector {
    fn default() -> Self {
        Self {
            can_mantle: true,
            auto_mantle: false,
        }
    }
}

impl MantleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_mantle(&self) -> bool {
        self.can_mantle
    }

    pub fn auto_mantle(&self) -> bool {
        self.auto_mantle
    }

    /// Ground contact reopens mantling and drops any auto-mantle.
    pub fn reopen(&mut self) {
        self.can_mantle = true;
        self.auto_mantle = false;
    }

    /// Lets the next ledge be mantled without forward input or an open gate.
    /// Set when a grapple finishes.
    pub fn arm_auto(&mut self) {
        self.auto_mantle = true;
    }

    /// Decides whether to start, continue or stop mantling.
    pub fn update(&mut self, probe: &LedgeProbe, mantling: bool, grounded: bool, pressing_forward: bool) -> MantleStep {
        let engage = probe.head_clear
            && probe.foothold
            && !grounded
            && (pressing_forward || self.auto_mantle)
            && (self.can_mantle || self.auto_mantle);

        if !(engage || mantling) {
            return MantleStep::Idle;
        }

        let surmounted = mantling && !probe.foothold && probe.below_feet_clear;
        if !probe.head_clear || surmounted || grounded {
            self.can_mantle = false;
            return MantleStep::Released;
        }

        MantleStep::Engaged
    }
}

/// World velocity of a mantle for an actor facing `forward`.
///
/// `mantle_velocity` in the config is (right, up, forward).
pub fn mantle_velocity(forward: Vec3, right: Vec3, config: &MovementConfig) -> Vec3 {
    let planar = forward * config.mantle_velocity.z + right * config.mantle_velocity.x;
    Vec3::new(planar.x, config.mantle_velocity.y, planar.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::CollisionWorld;

    /// A 2m ledge whose face is 1m in front of the origin (toward -Z).
    fn ledge() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(Vec3::new(-5.0, 0.0, -6.0), Vec3::new(5.0, 2.0, -1.0));
        world
    }

    #[test]
    fn test_probe_at_wall_base() {
        let config = MovementConfig::default();
        let world = ledge();

        let probe = LedgeProbe::cast(Vec3::new(0.0, 0.2, 0.0), Vec3::NEG_Z, &config, &world);
        assert!(probe.head_clear);
        assert!(probe.foothold);
        assert!(!probe.below_feet_clear);
    }

    #[test]
    fn test_probe_above_ledge() {
        let config = MovementConfig::default();
        let world = ledge();

        let probe = LedgeProbe::cast(Vec3::new(0.0, 2.3, 0.0), Vec3::NEG_Z, &config, &world);
        assert!(probe.head_clear);
        assert!(!probe.foothold);
        assert!(probe.below_feet_clear);
    }

    #[test]
    fn test_probe_blocked_head() {
        let config = MovementConfig::default();
        let mut world = ledge();
        world.add_box(Vec3::new(-5.0, 2.0, -6.0), Vec3::new(5.0, 6.0, -1.0));

        let probe = LedgeProbe::cast(Vec3::new(0.0, 0.2, 0.0), Vec3::NEG_Z, &config, &world);
        assert!(!probe.head_clear);
    }

    #[test]
    fn test_engages_only_with_forward_input_and_airborne() {
        let probe = LedgeProbe {
            head_clear: true,
            foothold: true,
            below_feet_clear: false,
        };
        let mut detector = MantleDetector::new();

        assert_eq!(detector.update(&probe, false, false, false), MantleStep::Idle);
        assert_eq!(detector.update(&probe, false, true, true), MantleStep::Idle);
        assert_eq!(detector.update(&probe, false, false, true), MantleStep::Engaged);
    }

    #[test]
    fn test_release_closes_gate_until_reopened() {
        let mut detector = MantleDetector::new();
        let over_ledge = LedgeProbe {
            head_clear: true,
            foothold: false,
            below_feet_clear: true,
        };
        assert_eq!(detector.update(&over_ledge, true, false, true), MantleStep::Released);
        assert!(!detector.can_mantle());

        let wall = LedgeProbe {
            head_clear: true,
            foothold: true,
            below_feet_clear: false,
        };
        assert_eq!(detector.update(&wall, false, false, true), MantleStep::Idle);

        detector.reopen();
        assert_eq!(detector.update(&wall, false, false, true), MantleStep::Engaged);
    }

    #[test]
    fn test_landing_releases() {
        let mut detector = MantleDetector::new();
        let wall = LedgeProbe {
            head_clear: true,
            foothold: true,
            below_feet_clear: false,
        };
        assert_eq!(detector.update(&wall, true, true, true), MantleStep::Released);
    }

    #[test]
    fn test_auto_mantle_ignores_input_and_gate() {
        let mut detector = MantleDetector::new();
        let wall = LedgeProbe {
            head_clear: true,
            foothold: true,
            below_feet_clear: false,
        };
        detector.update(&wall, true, true, true);
        assert!(!detector.can_mantle());

        detector.arm_auto();
        assert_eq!(detector.update(&wall, false, false, false), MantleStep::Engaged);
    }

    #[test]
    fn test_mantle_velocity_is_actor_relative() {
        let config = MovementConfig::default();
        let velocity = mantle_velocity(Vec3::X, Vec3::Z, &config);
        assert!(velocity.abs_diff_eq(Vec3::new(10.0, 8.0, 0.0), 1e-6));
    }
}
