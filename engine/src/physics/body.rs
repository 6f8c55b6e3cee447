//! Physics Body
//!
//! The seam between the movement core and whatever rigid-body engine owns the
//! actor. The core reads pose and velocity, queues forces, and writes exactly
//! one velocity per physics tick; the engine integrates afterwards.
//!
//! [`SimBody`] is a small self-contained implementation used by the sandbox
//! binary and the scenario tests.

use glam::{Quat, Vec3};

use super::collision::RayHit;
use super::types::ForceMode;
use super::world::{LayerMask, SceneQuery};

/// A simulated body the movement core can drive.
pub trait PhysicsBody {
    /// World position of the actor's base (feet).
    fn position(&self) -> Vec3;

    /// World orientation of the actor (yaw only for a first-person actor).
    fn rotation(&self) -> Quat;

    /// Current linear velocity.
    fn velocity(&self) -> Vec3;

    /// Overwrites the linear velocity.
    fn set_velocity(&mut self, velocity: Vec3);

    /// Queues a force; it is applied when the body is next integrated.
    fn add_force(&mut self, force: Vec3, mode: ForceMode);

    /// Resizes the capsule collider. The collider stays anchored at the feet.
    fn set_collider_height(&mut self, height: f32);

    /// Facing direction on the ground plane.
    fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Right-hand direction on the ground plane.
    fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }
}

/// Forces queued during a tick, split by how they apply.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForceAccumulator {
    pub force: Vec3,
    pub impulse: Vec3,
    pub velocity_change: Vec3,
}

impl ForceAccumulator {
    /// Adds a force to the matching bucket.
    pub fn add(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Force => self.force += force,
            ForceMode::Impulse => self.impulse += force,
            ForceMode::VelocityChange => self.velocity_change += force,
        }
    }

    /// Velocity change produced by the accumulated forces over `dt`.
    pub fn delta_velocity(&self, mass: f32, dt: f32) -> Vec3 {
        self.force * dt / mass + self.impulse / mass + self.velocity_change
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Minimal capsule body with ground resting and wall sliding.
#[derive(Debug, Clone)]
pub struct SimBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    /// Mass in kilograms
    pub mass: f32,
    /// Capsule radius in meters
    pub radius: f32,
    /// Capsule height in meters
    pub height: f32,
    pending: ForceAccumulator,
}

/// How far above the feet the ground-rest probe starts.
const REST_PROBE_LIFT: f32 = 0.5;

impl SimBody {
    /// Creates a body standing at `position` facing -Z.
    pub fn new(position: Vec3, height: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            mass: 1.0,
            radius: 0.5,
            height,
            pending: ForceAccumulator::default(),
        }
    }

    /// Sets yaw in radians. Yaw 0 faces -Z; positive yaw turns toward +X.
    pub fn set_yaw(&mut self, yaw: f32) {
        self.rotation = Quat::from_rotation_y(-yaw);
    }

    /// Forces queued since the last integration.
    pub fn pending_forces(&self) -> ForceAccumulator {
        self.pending
    }

    /// Applies queued forces, moves the body, and resolves contacts.
    pub fn integrate<S: SceneQuery>(&mut self, dt: f32, scene: &S) {
        self.velocity += self.pending.delta_velocity(self.mass, dt);
        self.pending.clear();

        self.move_horizontal(dt, scene);
        self.move_vertical(dt, scene);
    }

    fn move_horizontal<S: SceneQuery>(&mut self, dt: f32, scene: &S) {
        let horizontal = Vec3::new(self.velocity.x, 0.0, self.velocity.z);
        let distance = horizontal.length() * dt;
        if distance <= f32::EPSILON {
            return;
        }

        let direction = horizontal.normalize();
        let probe_origin = self.position + Vec3::Y * (self.height * 0.5);
        match scene.raycast(probe_origin, direction, distance + self.radius, LayerMask::GROUND) {
            Some(hit) if hit.normal.y.abs() < 0.5 => {
                // Wall: advance to contact, then drop the velocity into the wall.
                let travel = (hit.distance - self.radius).max(0.0);
                self.position += direction * travel;
                let into_wall = self.velocity.dot(hit.normal);
                if into_wall < 0.0 {
                    self.velocity -= hit.normal * into_wall;
                }
            }
            _ => self.position += direction * distance,
        }
    }

    fn move_vertical<S: SceneQuery>(&mut self, dt: f32, scene: &S) {
        let dy = self.velocity.y * dt;
        let probe_origin = self.position + Vec3::Y * REST_PROBE_LIFT;
        let probe_length = REST_PROBE_LIFT + (-dy).max(0.0);

        let support = scene.raycast(probe_origin, Vec3::NEG_Y, probe_length, LayerMask::GROUND);
        match support {
            Some(RayHit { position, .. }) if self.velocity.y <= 0.0 => {
                // Resting on (or falling into) the surface
                self.position.y = position.y.max(self.position.y + dy);
                self.velocity.y = 0.0;
            }
            _ => self.position.y += dy,
        }
    }
}

impl PhysicsBody for SimBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        self.pending.add(force, mode);
    }

    fn set_collider_height(&mut self, height: f32) {
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::world::CollisionWorld;

    fn flat_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_floor(0.0, 100.0);
        world
    }

    #[test]
    fn test_force_modes_scale_differently() {
        let mut acc = ForceAccumulator::default();
        acc.add(Vec3::X * 10.0, ForceMode::Force);
        acc.add(Vec3::Y * 4.0, ForceMode::Impulse);
        acc.add(Vec3::Z * 3.0, ForceMode::VelocityChange);

        let dv = acc.delta_velocity(2.0, 0.1);
        assert!((dv.x - 0.5).abs() < 1e-6);
        assert!((dv.y - 2.0).abs() < 1e-6);
        assert!((dv.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_body_rests_on_floor() {
        let world = flat_world();
        let mut body = SimBody::new(Vec3::new(0.0, 0.3, 0.0), 2.0);
        body.velocity = Vec3::new(0.0, -5.0, 0.0);

        for _ in 0..20 {
            body.integrate(0.01, &world);
        }

        assert!(body.position.y.abs() < 1e-4, "body should rest at y=0, got {}", body.position.y);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_body_leaves_floor_when_moving_up() {
        let world = flat_world();
        let mut body = SimBody::new(Vec3::ZERO, 2.0);
        body.velocity = Vec3::Y * 10.0;

        body.integrate(0.01, &world);
        assert!(body.position.y > 0.09);
    }

    #[test]
    fn test_body_stops_at_wall() {
        let mut world = flat_world();
        world.add_box(Vec3::new(-5.0, 0.0, -3.0), Vec3::new(5.0, 4.0, -2.0));
        let mut body = SimBody::new(Vec3::ZERO, 2.0);

        for _ in 0..200 {
            body.velocity.z = -5.0;
            body.integrate(0.01, &world);
        }

        assert!(body.position.z > -2.0 + 0.49 - 1e-3, "body went through the wall: {}", body.position.z);
    }

    #[test]
    fn test_forward_and_right_follow_yaw() {
        let mut body = SimBody::new(Vec3::ZERO, 2.0);
        assert!(body.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!(body.right().abs_diff_eq(Vec3::X, 1e-6));

        body.set_yaw(std::f32::consts::FRAC_PI_2);
        assert!(body.forward().abs_diff_eq(Vec3::X, 1e-5));
        assert!(body.right().abs_diff_eq(Vec3::Z, 1e-5));
    }
}
