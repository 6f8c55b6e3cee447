//! Traversal Sandbox - Headless Movement Run
//!
//! Run with: `RUST_LOG=debug cargo run --bin traversal_sandbox [config.json]`
//!
//! Drives the movement controller through a scripted run over a small
//! course and logs the movement flags as it goes:
//! - Walk, then sprint toward a ramp
//! - Slide down the ramp
//! - Jump, then walk up to a wall and mantle onto it
//! - Grapple to an anchor above the far end of the course
//!
//! An optional JSON file overrides any tunables (missing fields keep their
//! defaults).

use std::error::Error;
use std::fs;

use hookshot_engine::input::{InputState, KeyCode, MouseButton};
use hookshot_engine::physics::{CollisionWorld, SimBody, Vec3};
use hookshot_engine::player::{MovementConfig, PlayerMovementController, ViewPose};

/// Physics step in seconds
const FIXED_DT: f32 = 0.02;

/// Steps in the scripted run
const RUN_STEPS: u32 = 400;

/// Builds the course: floor, ramp, mantle wall, grapple anchor.
fn build_course() -> CollisionWorld {
    let mut world = CollisionWorld::new();
    world.add_floor(0.0, 200.0);

    // Ramp running down toward +X, ending flush with the floor
    let ramp_length = 12.0;
    let ramp_angle: f32 = 20.0;
    let ramp_drop = ramp_length * ramp_angle.to_radians().tan();
    world.add_ramp(Vec3::new(-6.0, ramp_drop, -30.0), ramp_length, 8.0, ramp_angle);

    // Ledge to mantle onto
    world.add_box(Vec3::new(-4.0, 0.0, -24.0), Vec3::new(4.0, 2.0, -20.0));

    // Anchor above the far side of the ledge
    world.add_anchor(Vec3::new(0.0, 9.0, -34.0), 0.3);

    world
}

/// Presses and releases keys according to the script.
fn script(input: &mut InputState, step: u32) {
    let keyboard = &mut input.keyboard;
    match step {
        0 => {
            keyboard.handle_key(KeyCode::W, true);
        }
        25 => {
            keyboard.handle_key(KeyCode::ShiftLeft, true);
        }
        27 => {
            keyboard.handle_key(KeyCode::ShiftLeft, false);
        }
        60 => {
            keyboard.handle_key(KeyCode::ControlLeft, true);
        }
        90 => {
            keyboard.handle_key(KeyCode::ControlLeft, false);
            keyboard.handle_key(KeyCode::Space, true);
        }
        92 => {
            keyboard.handle_key(KeyCode::Space, false);
        }
        200 => {
            input.mouse.set_button(MouseButton::Right, true);
        }
        202 => {
            input.mouse.set_button(MouseButton::Right, false);
        }
        _ => {}
    }
}

fn load_config() -> Result<MovementConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = fs::read_to_string(&path)?;
            let config = MovementConfig::from_json_str(&json)?;
            log::info!("Loaded movement config from {}", path);
            Ok(config)
        }
        None => Ok(MovementConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = load_config()?;
    let world = build_course();
    let mut body = SimBody::new(Vec3::new(0.0, 0.0, 0.0), config.standing_height);
    let mut controller = PlayerMovementController::new(config)?;
    let mut input = InputState::new();

    log::info!(
        "Course ready: {} colliders, {} anchors",
        world.collider_count(),
        world.anchor_count()
    );

    for step in 0..RUN_STEPS {
        script(&mut input, step);

        // Look up toward the anchor once past the ledge
        let pitch = if step >= 150 { 0.45 } else { 0.0 };

        controller.handle_input(&input.frame_input(), body.position, &world);
        let view = ViewPose::from_yaw_pitch(controller.view_origin(body.position), 0.0, pitch);
        if let Some(target) = controller.late_update(&view, body.position, &world, FIXED_DT) {
            log::info!("step {}: grapple fired at {:?}", step, target.position);
        }
        input.end_frame();

        controller.fixed_update(&mut body, &world, FIXED_DT);
        body.integrate(FIXED_DT, &world);

        if step % 10 == 0 {
            let flags = controller.flags();
            log::info!(
                "step {:3}: pos ({:6.2}, {:5.2}, {:6.2}) speed {:5.2} | {:?} grounded={} sprint={} crouch={} slope={}",
                step,
                body.position.x,
                body.position.y,
                body.position.z,
                body.velocity.length(),
                flags.traversal(),
                flags.grounded(),
                flags.sprinting(),
                flags.crouching(),
                flags.slope_sliding(),
            );
        }
    }

    log::info!("Run finished at {:?}", body.position);
    Ok(())
}
