//! Grapple rope effect.
//!
//! While a grapple is active the rope is drawn as a line of points from the
//! rope origin (the launcher muzzle) to a lead point that eases toward the
//! anchor. A perpendicular wave rides on the line; its amplitude decays over
//! the effect duration so the rope settles into a straight line.
//!
//! Curves are pure functions of `t ∈ [0, 1]`, see [`EasingCurve`].

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::config::MovementConfig;

// Rope points are handed to line renderers as raw `[f32; 3]` triples.
static_assertions::assert_eq_size!(Vec3, [f32; 3]);

/// A shaping curve over the unit interval. Inputs are clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EasingCurve {
    /// Always `c`
    Constant(f32),
    /// `t`
    Linear,
    /// `1 - t`
    InverseLinear,
    /// `3t² - 2t³`
    SmoothStep,
    /// `1 - (1 - t)²`
    EaseOutQuad,
    /// `sin(πt)`, zero at both ends
    Bell,
}

impl EasingCurve {
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingCurve::Constant(c) => c,
            EasingCurve::Linear => t,
            EasingCurve::InverseLinear => 1.0 - t,
            EasingCurve::SmoothStep => t * t * (3.0 - 2.0 * t),
            EasingCurve::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingCurve::Bell => (PI * t).sin(),
        }
    }
}

/// Rope line state for one grapple.
#[derive(Debug, Clone, Default)]
pub struct RopeEffect {
    points: Vec<Vec3>,
    lead: Vec3,
    timer: f32,
}

impl RopeEffect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rope points, empty when no grapple is active.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Rope points as raw bytes (`[f32; 3]` per point) for vertex upload.
    pub fn point_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    /// Position of the travelling rope tip.
    pub fn lead_point(&self) -> Vec3 {
        self.lead
    }

    /// Seconds since the rope fired, clamped to the effect duration.
    pub fn elapsed(&self) -> f32 {
        self.timer
    }

    /// Clears the rope and parks the lead at the origin.
    pub fn reset(&mut self, origin: Vec3) {
        self.points.clear();
        self.lead = origin;
        self.timer = 0.0;
    }

    /// Advances the effect by `dt` and rebuilds the rope points.
    pub fn update(&mut self, origin: Vec3, anchor: Vec3, dt: f32, config: &MovementConfig) {
        let direction = (anchor - origin).normalize_or_zero();
        let rope_up = perpendicular_up(direction);
        let rope_right = direction.cross(rope_up).normalize_or_zero();

        self.lead = self.lead.lerp(anchor, (dt * config.rope_fire_speed).clamp(0.0, 1.0));
        self.timer = (self.timer + dt).clamp(0.0, config.rope_effect_duration);

        let dropoff = config.rope_time_dropoff.evaluate(self.timer / config.rope_effect_duration);
        let resolution = config.rope_line_resolution.max(2);
        let last = (resolution - 1) as f32;

        self.points.clear();
        self.points.extend((0..resolution).map(|i| {
            let t = i as f32 / last;
            let effect = config.rope_effect_shape.evaluate(t);
            let phase = t * config.rope_wave_count * PI + dropoff * config.rope_scroll_speed;
            let amplitude = config.rope_wave_height * dropoff * effect;
            let offset = (rope_up * phase.sin() + rope_right * phase.cos()) * amplitude;
            origin.lerp(self.lead, t) + offset
        }));
    }
}

/// World up with the component along `direction` removed.
fn perpendicular_up(direction: Vec3) -> Vec3 {
    let up = (Vec3::Y - direction * direction.dot(Vec3::Y)).normalize_or_zero();
    if up == Vec3::ZERO {
        // Rope is vertical; any horizontal axis works.
        Vec3::Z
    } else {
        up
    }
}
