//! Player Movement Controller
//!
//! Turns abstract input and the state of a rigid body into forces, velocity
//! overrides and collider resizes for walking, sprinting, crouching, sliding,
//! buffered jumps, ledge mantles, and grapple pulls.
//!
//! # Ticks
//!
//! The controller is driven by three calls per frame:
//!
//! 1. [`handle_input`](PlayerMovementController::handle_input) - records
//!    jump and grapple requests, crouch and sprint state.
//! 2. [`late_update`](PlayerMovementController::late_update) - grapple
//!    targeting, grapple start, rope curve.
//! 3. [`fixed_update`](PlayerMovementController::fixed_update) - zero or more
//!    times per frame at the physics rate.
//!
//! # Physics Step Order
//!
//! - Ground sample, stance transition, velocity sample
//! - Slide and slope forces
//! - Gravity, unless grounded, mantling or grappling
//! - Jump admission from the input buffers
//! - Grapple pull, then mantle (each overrides velocity when engaged)
//! - Walk acceleration and drag, unless an override fired (ordinary drag
//!   is skipped while sliding)
//! - Surface magnetism, unless an override fired
//! - One velocity commit to the body
//!
//! Forces are queued on the body and take effect when it integrates, after
//! the commit.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hookshot_engine::player::{MovementConfig, PlayerMovementController, ViewPose};
//!
//! let mut controller = PlayerMovementController::new(MovementConfig::default())?;
//!
//! // Each frame:
//! controller.handle_input(&input.frame_input(), body.position(), &world);
//! let view = ViewPose::from_yaw_pitch(controller.view_origin(body.position()), yaw, pitch);
//! controller.late_update(&view, weapon_muzzle, &world, frame_dt);
//!
//! // Each physics step:
//! controller.fixed_update(&mut body, &world, FIXED_DT);
//! body.integrate(FIXED_DT, &world);
//! ```

use glam::{Vec2, Vec3};

use super::config::{ConfigError, MovementConfig};
use super::crouch::{Stance, StanceController};
use super::flags::{MovementFlags, Traversal};
use super::grapple::{GrappleController, GrappleStep, GrappleTarget, ViewPose};
use super::ground::{GroundSampler, GroundTransition};
use super::jump_buffer::JumpBuffers;
use super::magnetism;
use super::mantle::{self, LedgeProbe, MantleDetector, MantleStep};
use super::slide::SlideController;
use super::velocity::{VelocitySample, speed_cap};
use crate::input::FrameInput;
use crate::physics::{ForceMode, LayerMask, PhysicsBody, SceneQuery};

/// Headroom probe length before adding the crouch depth.
const HEADROOM_PROBE_BASE: f32 = 0.49;

/// First-person traversal controller for one actor.
#[derive(Debug, Clone)]
pub struct PlayerMovementController {
    config: MovementConfig,
    flags: MovementFlags,

    ground: GroundSampler,
    jump: JumpBuffers,
    stance: StanceController,
    slide: SlideController,
    mantle: MantleDetector,
    grapple: GrappleController,

    /// Normalized (right, forward) input from the last input tick
    move_axis: Vec2,
    /// Jump pressed since the last physics step
    jump_pending: bool,
    /// Closed by a jump, reopened on landing
    can_jump: bool,
    crouch_requested: bool,
    /// Sprint key press already consumed; waits for release
    sprint_acknowledged: bool,
}

impl PlayerMovementController {
    /// Builds a controller, rejecting invalid configurations.
    pub fn new(config: MovementConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            flags: MovementFlags::new(),
            ground: GroundSampler::new(),
            jump: JumpBuffers::new(config.jump_input_buffer_depth, config.ground_contact_buffer_depth),
            stance: StanceController::new(&config),
            slide: SlideController::new(),
            mantle: MantleDetector::new(),
            grapple: GrappleController::new(),
            move_axis: Vec2::ZERO,
            jump_pending: false,
            can_jump: true,
            crouch_requested: false,
            sprint_acknowledged: false,
            config,
        })
    }

    // ========================================================================
    // Published state
    // ========================================================================

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn flags(&self) -> &MovementFlags {
        &self.flags
    }

    /// Walking speed, used by camera bob to scale its amplitude.
    pub fn base_move_speed(&self) -> f32 {
        self.config.base_move_speed
    }

    /// Rope line for rendering; empty when no grapple is running.
    pub fn rope_points(&self) -> &[Vec3] {
        self.grapple.rope().points()
    }

    /// Rope line as raw vertex bytes.
    pub fn rope_bytes(&self) -> &[u8] {
        self.grapple.rope().point_bytes()
    }

    pub fn stance(&self) -> Stance {
        self.stance.stance()
    }

    pub fn collider_height(&self) -> f32 {
        self.stance.height()
    }

    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    pub fn can_grapple(&self) -> bool {
        self.grapple.can_grapple()
    }

    pub fn can_mantle(&self) -> bool {
        self.mantle.can_mantle()
    }

    /// Next ledge mantles without forward input (armed by a finished grapple).
    pub fn auto_mantle(&self) -> bool {
        self.mantle.auto_mantle()
    }

    pub fn crouch_requested(&self) -> bool {
        self.crouch_requested
    }

    /// Anchor under the crosshair, for highlighting.
    pub fn grapple_target(&self) -> Option<GrappleTarget> {
        self.grapple.target()
    }

    /// Camera mount for a body standing at `position`.
    pub fn view_origin(&self, position: Vec3) -> Vec3 {
        position + Vec3::Y * self.stance.head_height()
    }

    /// Stops sprinting, e.g. when a weapon fires.
    pub fn interrupt_sprint(&mut self) {
        self.flags.sprinting = false;
    }

    // ========================================================================
    // Input tick
    // ========================================================================

    /// Records one frame of input.
    pub fn handle_input<S: SceneQuery>(&mut self, input: &FrameInput, position: Vec3, scene: &S) {
        let was_crouch_requested = self.crouch_requested;
        self.move_axis = input.move_axis.normalize_or_zero();
        let forward_input = self.move_axis.y > 0.0;
        let headroom = self.has_headroom(position, scene);

        if input.jump_pressed && headroom {
            self.jump_pending = true;
        }

        if self.flags.grounded && self.can_jump {
            if self.config.toggle_crouch {
                if input.crouch_pressed {
                    self.crouch_requested = !self.crouch_requested;
                }
            } else {
                self.crouch_requested = input.crouch_held;
            }

            let crouch_started = self.crouch_requested && !was_crouch_requested;
            if crouch_started && self.flags.sprinting && forward_input && self.flags.traversal == Traversal::Free {
                self.flags.traversal = Traversal::Sliding;
                self.flags.sprinting = false;
                self.slide.begin();
                log::debug!("slide started");
            }
        }

        if input.grapple_pressed && self.grapple.can_grapple() && headroom {
            self.grapple.request_fire();
        }

        self.update_sprint(input, headroom);
    }

    fn update_sprint(&mut self, input: &FrameInput, headroom: bool) {
        if self.flags.grounded && self.can_jump && input.sprint_held && !self.sprint_acknowledged && headroom {
            self.flags.sprinting = !self.flags.sprinting;
            self.sprint_acknowledged = true;
            if self.stance.is_crouching() {
                self.crouch_requested = false;
                self.flags.sprinting = true;
            }
        } else if self.flags.sprinting && input.sprint_pressed && !self.flags.slide_jumping {
            self.flags.sprinting = false;
            self.sprint_acknowledged = true;
        }

        if input.sprint_released {
            self.sprint_acknowledged = false;
        }

        if self.move_axis.y <= 0.0 || self.flags.mantling() {
            self.flags.sprinting = false;
        }
    }

    /// Room to stand up from a crouch at `position`.
    fn has_headroom<S: SceneQuery>(&self, position: Vec3, scene: &S) -> bool {
        let origin = position + Vec3::Y * self.config.crouch_height;
        let length = HEADROOM_PROBE_BASE + self.config.crouch_depth();
        !scene.ray_test(origin, Vec3::Y, length, LayerMask::GROUND)
    }

    // ========================================================================
    // Presentation tick
    // ========================================================================

    /// Grapple targeting and start, and the rope curve.
    ///
    /// `rope_origin` is where the rope leaves the actor (hand or muzzle).
    /// Returns the anchor when a grapple started this frame.
    pub fn late_update<S: SceneQuery>(
        &mut self,
        view: &ViewPose,
        rope_origin: Vec3,
        scene: &S,
        dt: f32,
    ) -> Option<GrappleTarget> {
        let started = self.grapple.late_update(view, rope_origin, dt, &self.config, scene)?;

        self.slide.cancel();
        self.flags.traversal = Traversal::Grappling;
        self.flags.slope_sliding = false;
        self.flags.slide_jumping = false;
        self.flags.sprinting = false;
        self.crouch_requested = false;
        self.ground.force_airborne(self.config.ground_check_cooldown);
        self.flags.grounded = false;
        log::debug!("grapple started toward {:?} at {:?}", started.anchor, started.position);

        Some(started)
    }

    // ========================================================================
    // Physics tick
    // ========================================================================

    /// Runs one physics step and commits the resulting velocity to `body`.
    pub fn fixed_update<B, S>(&mut self, body: &mut B, scene: &S, dt: f32)
    where
        B: PhysicsBody,
        S: SceneQuery,
    {
        // Clamp delta time to prevent physics explosions
        let dt = dt.clamp(0.0001, 0.1);
        let config = &self.config;

        match self.ground.update(body.position(), body.rotation(), dt, config, scene) {
            Some(GroundTransition::Entered) => {
                if self.flags.slide_jumping {
                    self.flags.sprinting = false;
                }
                self.can_jump = true;
                self.mantle.reopen();
                self.grapple.reopen();
                self.flags.slide_jumping = false;
                log::debug!("landed");
            }
            Some(GroundTransition::Left) => log::debug!("left ground"),
            None => {}
        }
        self.flags.grounded = self.ground.grounded();

        self.stance.update(body, scene, self.crouch_requested, dt, config);
        self.flags.crouching = self.stance.is_crouching();

        let crouched = self.flags.crouching || self.crouch_requested;
        let velocity = VelocitySample::new(body.velocity(), speed_cap(config, self.flags.sprinting, crouched));
        let mut new_velocity = velocity.full;

        // Slide
        self.flags.slope_sliding = false;
        if self.flags.sliding() {
            if crouched && velocity.over_cap() {
                self.flags.slope_sliding = self.slide.step(body, scene, &velocity, config);
            } else {
                self.flags.traversal = Traversal::Free;
                self.slide.cancel();
                log::debug!("slide ended at {:.2} m/s", velocity.walk_speed());
            }
        }

        // Gravity
        let applying_gravity = !self.flags.grounded && !self.flags.velocity_overridden();
        if applying_gravity {
            new_velocity.y -= config.gravity_acceleration * dt;
        }

        // Jump
        let jump_pending = std::mem::take(&mut self.jump_pending);
        if let Some(admission) = self.jump.step(self.flags.grounded, jump_pending, self.can_jump) {
            self.can_jump = false;
            new_velocity.y = config.jump_speed();
            self.crouch_requested = false;
            self.ground.force_airborne(config.ground_check_cooldown);
            self.flags.grounded = false;
            if self.flags.sliding() {
                self.flags.sprinting = true;
                self.flags.slide_jumping = true;
            }
            log::debug!("jump admitted ({:?})", admission);
        }

        // Velocity overrides
        let mut overridden = false;
        let was_grappling = self.flags.grappling();

        if was_grappling {
            let view_origin = self.view_origin(body.position());
            let step = self.grapple.fixed_step(view_origin, config, scene);
            match step {
                GrappleStep::Pulling(pull) => {
                    new_velocity = pull;
                    overridden = true;
                }
                GrappleStep::Finished | GrappleStep::AnchorLost => {
                    if step == GrappleStep::AnchorLost {
                        log::warn!("grapple anchor destroyed mid-pull");
                    } else {
                        log::debug!("grapple finished");
                    }
                    self.flags.traversal = Traversal::Free;
                    self.mantle.arm_auto();
                    new_velocity = Vec3::ZERO;
                    overridden = true;
                }
                GrappleStep::Inactive => self.flags.traversal = Traversal::Free,
            }
        }
        self.grapple.consume_fire();

        if !was_grappling {
            let probe = LedgeProbe::cast(body.position(), body.forward(), config, scene);
            let mantling = self.flags.mantling();
            match self.mantle.update(&probe, mantling, self.flags.grounded, self.move_axis.y > 0.0) {
                MantleStep::Engaged => {
                    if !mantling {
                        self.slide.cancel();
                        self.flags.traversal = Traversal::Mantling;
                        log::debug!("mantle engaged");
                    }
                    new_velocity = mantle::mantle_velocity(body.forward(), body.right(), config);
                    overridden = true;
                }
                MantleStep::Released => {
                    self.flags.traversal = Traversal::Free;
                    log::debug!("mantle released");
                }
                MantleStep::Idle => {}
            }
        }

        if !overridden {
            self.apply_locomotion(body, &velocity);
        }

        // Magnetism
        let has_input = self.move_axis != Vec2::ZERO;
        if !overridden
            && self.flags.grounded
            && self.can_jump
            && magnetism::engages(velocity.full.length(), has_input, config)
        {
            magnetism::apply(body, scene, velocity.full.length(), config);
        }

        if !overridden {
            let current = body.velocity();
            new_velocity.x = current.x;
            new_velocity.z = current.z;
        }

        self.flags.applying_gravity = applying_gravity;
        body.set_velocity(new_velocity);
    }

    /// Walk acceleration and the drag chain, as forces on `body`.
    fn apply_locomotion<B: PhysicsBody>(&self, body: &mut B, velocity: &VelocitySample) {
        let config = &self.config;
        let grounded = self.flags.grounded;
        let sliding = self.flags.sliding();
        let slide_jumping = self.flags.slide_jumping;

        let target = (body.forward() * self.move_axis.y + body.right() * self.move_axis.x).normalize_or_zero();
        if !sliding && target != Vec3::ZERO {
            let alignment = target.dot(velocity.walk.normalize_or_zero());
            let direction_change = ((1.0 - alignment / 2.0) * config.direction_change_coefficient) + 1.0;
            let acceleration = if grounded { config.ground_acceleration } else { config.air_acceleration };
            body.add_force(target * direction_change * acceleration, ForceMode::Force);
        }

        if velocity.over_cap() && !sliding && !slide_jumping {
            body.add_force(velocity.capped - velocity.walk, ForceMode::Impulse);
        } else if target == Vec3::ZERO && !sliding && !slide_jumping {
            let drag = if grounded { config.ground_drag } else { config.air_drag };
            body.add_force(-velocity.walk * drag, ForceMode::Force);
        } else if sliding || slide_jumping || self.flags.slope_sliding {
            let drag = if grounded { config.slide_ground_drag } else { config.slide_air_drag };
            let slope = if self.flags.slope_sliding { config.slide_slope_drag } else { 1.0 };
            body.add_force(-velocity.walk * drag * slope, ForceMode::Force);
        }
    }
}
