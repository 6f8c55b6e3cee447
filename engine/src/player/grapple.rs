//! Grapple Hookshot
//!
//! Targeting runs every presentation frame: anchors inside the grapple range
//! of the view origin are filtered by minimum range, minimum height above the
//! view and line of sight, and the one closest to the center of view wins if
//! it is centered enough.
//!
//! Once fired, each physics step overrides the actor velocity with a constant
//! speed pull toward a point just above the anchor. The grapple finishes
//! when the view rises above that point, or immediately if the anchor is
//! destroyed.

use glam::Vec3;

use super::config::MovementConfig;
use super::rope::RopeEffect;
use crate::physics::{AnchorId, LayerMask, SceneQuery};

/// Camera pose used for targeting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPose {
    /// View origin in world space
    pub origin: Vec3,
    /// Normalized look direction
    pub forward: Vec3,
}

impl ViewPose {
    pub fn new(origin: Vec3, forward: Vec3) -> Self {
        Self {
            origin,
            forward: forward.normalize_or_zero(),
        }
    }

    /// Pose from yaw and pitch in radians. Yaw 0 looks down -Z.
    pub fn from_yaw_pitch(origin: Vec3, yaw: f32, pitch: f32) -> Self {
        let forward = Vec3::new(yaw.sin() * pitch.cos(), pitch.sin(), -yaw.cos() * pitch.cos());
        Self::new(origin, forward)
    }
}

/// The best anchor for the current view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrappleTarget {
    pub anchor: AnchorId,
    pub position: Vec3,
    /// Dot product of view forward and direction to the anchor
    pub alignment: f32,
}

/// Picks the anchor best aligned with the view, if it is aligned enough.
pub fn find_target<S: SceneQuery>(view: &ViewPose, config: &MovementConfig, scene: &S) -> Option<GrappleTarget> {
    let mut best: Option<GrappleTarget> = None;

    for anchor in scene.overlap_anchors(view.origin, config.grapple_max_range) {
        let Some(position) = scene.anchor_position(anchor) else {
            continue;
        };

        let to_anchor = position - view.origin;
        let distance = to_anchor.length();
        if distance <= config.grapple_min_range {
            continue;
        }
        if position.y <= view.origin.y + config.grapple_min_height_offset {
            continue;
        }

        let direction = to_anchor / distance;
        if scene.ray_test(view.origin, direction, distance, LayerMask::GROUND) {
            continue;
        }

        let alignment = direction.dot(view.forward);
        if best.is_none_or(|current| alignment > current.alignment) {
            best = Some(GrappleTarget {
                anchor,
                position,
                alignment,
            });
        }
    }

    best.filter(|target| target.alignment >= config.grapple_min_alignment)
}

/// Outcome of one physics step of an active grapple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrappleStep {
    /// No grapple running
    Inactive,
    /// Still pulling; override velocity with this
    Pulling(Vec3),
    /// Reached the anchor
    Finished,
    /// The anchor no longer exists
    AnchorLost,
}

/// Grapple targeting, pull and rope state.
#[derive(Debug, Clone)]
pub struct GrappleController {
    can_grapple: bool,
    fire_pending: bool,
    target: Option<GrappleTarget>,
    anchor: Option<AnchorId>,
    rope: RopeEffect,
}

impl Default for GrappleController {
    fn default() -> Self {
        Self {
            can_grapple: true,
            fire_pending: false,
            target: None,
            anchor: None,
            rope: RopeEffect::new(),
        }
    }
}

impl GrappleController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_grapple(&self) -> bool {
        self.can_grapple
    }

    /// Anchor of the running grapple.
    pub fn anchor(&self) -> Option<AnchorId> {
        self.anchor
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Anchor currently under the crosshair, for highlighting.
    pub fn target(&self) -> Option<GrappleTarget> {
        self.target
    }

    pub fn rope(&self) -> &RopeEffect {
        &self.rope
    }

    /// Ground contact allows another grapple.
    pub fn reopen(&mut self) {
        self.can_grapple = true;
    }

    /// Records a fire request; ignored while grappling is locked out.
    pub fn request_fire(&mut self) {
        if self.can_grapple {
            self.fire_pending = true;
        }
    }

    pub fn fire_pending(&self) -> bool {
        self.fire_pending
    }

    /// Fire requests last until the end of the next physics step.
    pub fn consume_fire(&mut self) {
        self.fire_pending = false;
    }

    /// Retargets, starts a grapple on a pending fire, and advances the rope.
    ///
    /// Returns the target when a grapple started this frame.
    pub fn late_update<S: SceneQuery>(
        &mut self,
        view: &ViewPose,
        rope_origin: Vec3,
        dt: f32,
        config: &MovementConfig,
        scene: &S,
    ) -> Option<GrappleTarget> {
        let mut started = None;

        if self.can_grapple {
            self.target = find_target(view, config, scene);
            if let (Some(target), true) = (self.target, self.fire_pending) {
                self.anchor = Some(target.anchor);
                self.can_grapple = false;
                started = Some(target);
            }
        } else {
            self.target = None;
        }

        match self.anchor.and_then(|anchor| scene.anchor_position(anchor)) {
            Some(anchor_position) => self.rope.update(rope_origin, anchor_position, dt, config),
            None => self.rope.reset(rope_origin),
        }

        started
    }

    /// Pull velocity for this physics step, or why the grapple ended.
    pub fn fixed_step<S: SceneQuery>(&mut self, view_origin: Vec3, config: &MovementConfig, scene: &S) -> GrappleStep {
        let Some(anchor) = self.anchor else {
            return GrappleStep::Inactive;
        };

        let Some(anchor_position) = scene.anchor_position(anchor) else {
            self.anchor = None;
            return GrappleStep::AnchorLost;
        };

        let finish_point = anchor_position + Vec3::Y * config.grapple_vertical_offset;
        if view_origin.y > finish_point.y {
            self.anchor = None;
            return GrappleStep::Finished;
        }

        GrappleStep::Pulling((finish_point - view_origin).normalize_or_zero() * config.grapple_speed)
    }

    /// Drops the running grapple without the finish effects.
    pub fn release(&mut self) {
        self.anchor = None;
    }
}
