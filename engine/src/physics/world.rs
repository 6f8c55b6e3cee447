//! Collision World
//!
//! Static scene geometry the movement controller probes against, plus the
//! grapple anchors it can hook onto.
//!
//! The controller never talks to [`CollisionWorld`] directly; it goes through
//! the [`SceneQuery`] trait so a host engine can answer the same queries from
//! its own broad phase.
//!
//! # Layers
//!
//! Every solid lives on a layer. Locomotion probes (ground, headroom, slope,
//! mantle, line of sight) only look at [`LayerMask::GROUND`]; grapple anchors
//! live on [`LayerMask::GRAPPLE_POINT`].

use std::collections::HashMap;
use std::ops::BitOr;

use glam::Vec3;

use super::collision::{
    RayHit, aabb_surface_normal, ray_aabb_intersect, ray_sphere_intersect, ray_triangle_intersect,
};

/// Bit set of collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    /// Walkable and blocking world geometry
    pub const GROUND: LayerMask = LayerMask(1 << 0);
    /// Grapple hookshot anchors
    pub const GRAPPLE_POINT: LayerMask = LayerMask(1 << 1);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// True if any layer in `other` is also in `self`.
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

/// Stable handle to a grapple anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u32);

/// Collision queries the movement core depends on.
///
/// Probe misses are `None`, never errors.
pub trait SceneQuery {
    /// Casts a ray and returns the closest hit on the given layers within `max_distance`.
    ///
    /// `direction` must be normalized. Solids containing `origin` are ignored.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: LayerMask) -> Option<RayHit>;

    /// All grapple anchors whose volume touches the sphere at `center` with `radius`.
    fn overlap_anchors(&self, center: Vec3, radius: f32) -> Vec<AnchorId>;

    /// Current position of an anchor, `None` once it has been destroyed.
    fn anchor_position(&self, id: AnchorId) -> Option<Vec3>;

    /// Convenience: does a ray hit anything on `layers`?
    fn ray_test(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: LayerMask) -> bool {
        self.raycast(origin, direction, max_distance, layers).is_some()
    }
}

/// A static solid in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Axis-aligned box
    Box { min: Vec3, max: Vec3 },
    /// Single triangle (used to build ramps)
    Triangle { a: Vec3, b: Vec3, c: Vec3 },
}

impl Collider {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        match *self {
            Collider::Box { min, max } => {
                let t = ray_aabb_intersect(origin, direction, min, max)?;
                let position = origin + direction * t;
                Some(RayHit::new(position, aabb_surface_normal(position, min, max), t))
            }
            Collider::Triangle { a, b, c } => {
                let t = ray_triangle_intersect(origin, direction, a, b, c)?;
                let mut normal = (b - a).cross(c - a).normalize_or_zero();
                if normal.dot(direction) > 0.0 {
                    normal = -normal;
                }
                Some(RayHit::new(origin + direction * t, normal, t))
            }
        }
    }
}

/// A spherical grapple anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub position: Vec3,
    pub radius: f32,
}

/// Brute-force collision world.
///
/// Fine for test courses and sandboxes; a host engine with real broad phase
/// should implement [`SceneQuery`] itself.
#[derive(Debug, Clone, Default)]
pub struct CollisionWorld {
    colliders: Vec<(Collider, LayerMask)>,
    anchors: HashMap<AnchorId, Anchor>,
    next_anchor: u32,
}

impl CollisionWorld {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an axis-aligned box on the ground layer.
    pub fn add_box(&mut self, min: Vec3, max: Vec3) {
        self.colliders.push((Collider::Box { min, max }, LayerMask::GROUND));
    }

    /// Adds a flat floor slab whose top surface sits at `top_y`.
    pub fn add_floor(&mut self, top_y: f32, half_extent: f32) {
        self.add_box(
            Vec3::new(-half_extent, top_y - 1.0, -half_extent),
            Vec3::new(half_extent, top_y, half_extent),
        );
    }

    /// Adds a triangle on the ground layer.
    pub fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        self.colliders.push((Collider::Triangle { a, b, c }, LayerMask::GROUND));
    }

    /// Adds a rectangular ramp descending toward +X.
    ///
    /// The ramp's top edge runs along Z at `top_edge`, and it drops at
    /// `angle_degrees` below horizontal over `length` meters of run.
    pub fn add_ramp(&mut self, top_edge: Vec3, length: f32, width: f32, angle_degrees: f32) {
        let drop = length * angle_degrees.to_radians().tan();
        let half_width = width * 0.5;

        let top_near = top_edge + Vec3::new(0.0, 0.0, -half_width);
        let top_far = top_edge + Vec3::new(0.0, 0.0, half_width);
        let bottom_near = top_near + Vec3::new(length, -drop, 0.0);
        let bottom_far = top_far + Vec3::new(length, -drop, 0.0);

        self.add_triangle(top_near, top_far, bottom_far);
        self.add_triangle(top_near, bottom_far, bottom_near);
    }

    /// Adds a grapple anchor and returns its handle.
    pub fn add_anchor(&mut self, position: Vec3, radius: f32) -> AnchorId {
        let id = AnchorId(self.next_anchor);
        self.next_anchor += 1;
        self.anchors.insert(id, Anchor { position, radius });
        id
    }

    /// Destroys an anchor. Any grapple in progress toward it is cut on the next step.
    pub fn remove_anchor(&mut self, id: AnchorId) -> Option<Anchor> {
        self.anchors.remove(&id)
    }

    /// Number of static colliders.
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Number of live anchors.
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }
}

impl SceneQuery for CollisionWorld {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: LayerMask) -> Option<RayHit> {
        let mut closest: Option<RayHit> = None;
        let mut closest_dist = max_distance;

        for (collider, layer) in &self.colliders {
            if !layers.intersects(*layer) {
                continue;
            }
            if let Some(hit) = collider.raycast(origin, direction) {
                if hit.distance <= closest_dist {
                    closest_dist = hit.distance;
                    closest = Some(hit);
                }
            }
        }

        if layers.intersects(LayerMask::GRAPPLE_POINT) {
            for anchor in self.anchors.values() {
                if let Some(t) = ray_sphere_intersect(origin, direction, anchor.position, anchor.radius) {
                    if t <= closest_dist {
                        let position = origin + direction * t;
                        let normal = (position - anchor.position).normalize_or_zero();
                        closest_dist = t;
                        closest = Some(RayHit::new(position, normal, t));
                    }
                }
            }
        }

        closest
    }

    fn overlap_anchors(&self, center: Vec3, radius: f32) -> Vec<AnchorId> {
        let mut found: Vec<AnchorId> = self
            .anchors
            .iter()
            .filter(|(_, anchor)| anchor.position.distance(center) <= radius + anchor.radius)
            .map(|(id, _)| *id)
            .collect();
        // HashMap order is unspecified; keep query results deterministic.
        found.sort();
        found
    }

    fn anchor_position(&self, id: AnchorId) -> Option<Vec3> {
        self.anchors.get(&id).map(|anchor| anchor.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_raycast_returns_up_normal() {
        let mut world = CollisionWorld::new();
        world.add_floor(0.0, 50.0);

        let hit = world
            .raycast(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Y, 1.0, LayerMask::GROUND)
            .expect("floor should be hit");
        assert!((hit.distance - 0.5).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_raycast_respects_max_distance_and_layers() {
        let mut world = CollisionWorld::new();
        world.add_floor(0.0, 50.0);

        assert!(world.raycast(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, 1.0, LayerMask::GROUND).is_none());
        assert!(
            world
                .raycast(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Y, 1.0, LayerMask::GRAPPLE_POINT)
                .is_none()
        );
    }

    #[test]
    fn test_raycast_returns_closest_hit() {
        let mut world = CollisionWorld::new();
        world.add_floor(0.0, 50.0);
        world.add_box(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        let hit = world
            .raycast(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, 10.0, LayerMask::GROUND)
            .expect("box top should be hit");
        assert!((hit.distance - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_ramp_normal_tilts_downhill() {
        let mut world = CollisionWorld::new();
        world.add_ramp(Vec3::new(0.0, 5.0, 0.0), 10.0, 4.0, 30.0);

        let hit = world
            .raycast(Vec3::new(5.0, 10.0, 0.0), Vec3::NEG_Y, 20.0, LayerMask::GROUND)
            .expect("ramp should be hit");
        let expected = Vec3::new(30f32.to_radians().sin(), 30f32.to_radians().cos(), 0.0);
        assert!(hit.normal.abs_diff_eq(expected, 1e-4), "normal was {:?}", hit.normal);
    }

    #[test]
    fn test_anchor_lifecycle() {
        let mut world = CollisionWorld::new();
        let id = world.add_anchor(Vec3::new(0.0, 5.0, -10.0), 0.25);

        assert_eq!(world.overlap_anchors(Vec3::ZERO, 15.0), vec![id]);
        assert!(world.overlap_anchors(Vec3::ZERO, 5.0).is_empty());
        assert_eq!(world.anchor_position(id), Some(Vec3::new(0.0, 5.0, -10.0)));

        world.remove_anchor(id);
        assert_eq!(world.anchor_position(id), None);
        assert!(world.overlap_anchors(Vec3::ZERO, 15.0).is_empty());
    }
}
