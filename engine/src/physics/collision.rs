//! Collision detection module
//!
//! Ray intersection primitives used by the scene queries: the slab method for
//! axis-aligned boxes, Möller–Trumbore for triangles and a closed-form test
//! for spheres.
//!
//! All tests follow scene-query conventions of rigid-body engines: a ray that
//! starts inside a solid does not report that solid.
//!
//! # Example
//!
//! ```ignore
//! use hookshot_engine::physics::collision::ray_aabb_intersect;
//! use glam::Vec3;
//!
//! let origin = Vec3::new(0.0, 0.0, -5.0);
//! let direction = Vec3::new(0.0, 0.0, 1.0);
//! let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
//! let aabb_max = Vec3::new(1.0, 1.0, 1.0);
//!
//! if let Some(t) = ray_aabb_intersect(origin, direction, aabb_min, aabb_max) {
//!     let hit_point = origin + direction * t;
//! }
//! ```

use glam::Vec3;

/// Information about a ray hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space position where the collision occurred
    pub position: Vec3,
    /// Surface normal at the hit point (normalized, facing the ray origin)
    pub normal: Vec3,
    /// Distance from ray origin to hit point
    pub distance: f32,
}

impl RayHit {
    /// Creates a new RayHit with the given parameters.
    pub fn new(position: Vec3, normal: Vec3, distance: f32) -> Self {
        Self {
            position,
            normal,
            distance,
        }
    }
}

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// The slab method works by finding the intersection of the ray with each pair of
/// axis-aligned planes that make up the AABB. If the ray enters the AABB in front
/// of its origin, the entry distance is returned.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the entry point (t >= 0)
/// * `None` - No intersection, intersection behind the origin, or origin inside the box
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Compute inverse direction for efficient division
    // Handle near-zero directions by using large values
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb_min.x - ray_origin.x) * inv_dir.x;
    let t2 = (aabb_max.x - ray_origin.x) * inv_dir.x;

    let mut t_min = t1.min(t2);
    let mut t_max = t1.max(t2);

    let t3 = (aabb_min.y - ray_origin.y) * inv_dir.y;
    let t4 = (aabb_max.y - ray_origin.y) * inv_dir.y;

    t_min = t_min.max(t3.min(t4));
    t_max = t_max.min(t3.max(t4));

    let t5 = (aabb_min.z - ray_origin.z) * inv_dir.z;
    let t6 = (aabb_max.z - ray_origin.z) * inv_dir.z;

    t_min = t_min.max(t5.min(t6));
    t_max = t_max.min(t5.max(t6));

    // Entry must be in front of the origin; a negative entry means we start inside.
    if t_max >= t_min && t_min >= 0.0 {
        Some(t_min)
    } else {
        None
    }
}

/// Computes the surface normal for a point on an AABB surface.
///
/// Determines which face of the AABB the point is on and returns the outward normal.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = (aabb_max - aabb_min) * 0.5;
    let local = point - center;

    // Normalize to unit cube space
    let normalized = local / half_extents;

    // Closest face has the highest absolute normalized coordinate
    let abs_normalized = normalized.abs();

    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.x && abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

/// Ray-triangle intersection (Möller–Trumbore), two-sided.
///
/// Returns the distance along the ray, or `None` when the ray misses, is
/// parallel to the triangle, or the hit lies behind the origin.
pub fn ray_triangle_intersect(ray_origin: Vec3, ray_dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray_dir.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray_origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray_dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

/// Ray-sphere intersection. Rays starting inside the sphere report nothing.
pub fn ray_sphere_intersect(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let offset = ray_origin - center;
    let c = offset.length_squared() - radius * radius;
    if c < 0.0 {
        return None;
    }

    let b = offset.dot(ray_dir);
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let t = -b - discriminant.sqrt();
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_aabb_from_front() {
        let origin = Vec3::new(0.0, 0.0, -5.0);
        let dir = Vec3::new(0.0, 0.0, 1.0);
        let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
        let aabb_max = Vec3::new(1.0, 1.0, 1.0);

        let t = ray_aabb_intersect(origin, dir, aabb_min, aabb_max).expect("ray should hit");
        assert!((t - 4.0).abs() < 0.001, "Expected t=4.0, got t={}", t);
    }

    #[test]
    fn test_ray_misses_aabb() {
        let origin = Vec3::new(0.0, 5.0, -5.0);
        let dir = Vec3::new(0.0, 0.0, 1.0);
        let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
        let aabb_max = Vec3::new(1.0, 1.0, 1.0);

        assert!(ray_aabb_intersect(origin, dir, aabb_min, aabb_max).is_none());
    }

    #[test]
    fn test_ray_starting_inside_aabb_reports_nothing() {
        let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
        let aabb_max = Vec3::new(1.0, 1.0, 1.0);

        assert!(ray_aabb_intersect(Vec3::ZERO, Vec3::Z, aabb_min, aabb_max).is_none());
    }

    #[test]
    fn test_ray_aabb_behind_origin() {
        let origin = Vec3::new(0.0, 0.0, 5.0);
        let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
        let aabb_max = Vec3::new(1.0, 1.0, 1.0);

        assert!(ray_aabb_intersect(origin, Vec3::Z, aabb_min, aabb_max).is_none());
    }

    #[test]
    fn test_surface_normal_faces() {
        let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
        let aabb_max = Vec3::new(1.0, 1.0, 1.0);

        assert_eq!(aabb_surface_normal(Vec3::new(1.0, 0.0, 0.0), aabb_min, aabb_max), Vec3::X);
        assert_eq!(aabb_surface_normal(Vec3::new(0.0, -1.0, 0.0), aabb_min, aabb_max), Vec3::NEG_Y);
        assert_eq!(aabb_surface_normal(Vec3::new(0.2, 0.1, 1.0), aabb_min, aabb_max), Vec3::Z);
    }

    #[test]
    fn test_ray_triangle_hit_and_miss() {
        let a = Vec3::new(-1.0, 0.0, -1.0);
        let b = Vec3::new(1.0, 0.0, -1.0);
        let c = Vec3::new(0.0, 0.0, 1.0);

        let t = ray_triangle_intersect(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, a, b, c)
            .expect("ray should hit the triangle");
        assert!((t - 2.0).abs() < 1e-5);

        assert!(ray_triangle_intersect(Vec3::new(3.0, 2.0, 0.0), Vec3::NEG_Y, a, b, c).is_none());
        assert!(ray_triangle_intersect(Vec3::new(0.0, 2.0, 0.0), Vec3::Y, a, b, c).is_none());
    }

    #[test]
    fn test_ray_sphere() {
        let t = ray_sphere_intersect(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Vec3::ZERO, 1.0)
            .expect("ray should hit the sphere");
        assert!((t - 4.0).abs() < 1e-5);

        assert!(ray_sphere_intersect(Vec3::ZERO, Vec3::Z, Vec3::ZERO, 1.0).is_none());
        assert!(ray_sphere_intersect(Vec3::new(0.0, 3.0, -5.0), Vec3::Z, Vec3::ZERO, 1.0).is_none());
    }
}
