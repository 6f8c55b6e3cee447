//! Movement configuration.
//!
//! Every tunable of the traversal controller, grouped by subsystem. Values are
//! metric (meters, seconds) unless noted. Each field documents its valid
//! range; [`MovementConfig::validate`] enforces them, and a controller can
//! only be built from a validated config.
//!
//! Configs load from JSON with [`MovementConfig::from_json_str`]. Missing
//! fields take their default value.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default standing collider height (meters).
pub const DEFAULT_STANDING_HEIGHT: f32 = 2.0;

/// Default crouched collider height (meters).
pub const DEFAULT_CROUCH_HEIGHT: f32 = 1.0;

static_assertions::const_assert!(DEFAULT_CROUCH_HEIGHT < DEFAULT_STANDING_HEIGHT);

/// Reasons a configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("crouch height {crouch} must be lower than standing height {standing}")]
    StanceHeights { crouch: f32, standing: f32 },

    #[error("{field} = {value} is outside its valid range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{low_field} ({low}) must not exceed {high_field} ({high})")]
    InvertedRange {
        low_field: &'static str,
        low: f32,
        high_field: &'static str,
        high: f32,
    },

    #[error("jump height {jump_height} must exceed half the ground check distance ({half_probe})")]
    UnreachableJump { jump_height: f32, half_probe: f32 },

    #[error("malformed movement config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for the traversal controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // ========================================================================
    // Walk / Sprint / Crouch Movement
    // ========================================================================
    /// Maximum base walking speed (m/s). Range [0, 20].
    pub base_move_speed: f32,

    /// Acceleration toward top speed while grounded. Range [1, 100].
    pub ground_acceleration: f32,

    /// Acceleration while airborne (gravity unaffected). Range [1, 100].
    pub air_acceleration: f32,

    /// Extra acceleration when reversing direction; scales with how sharply
    /// the direction changes. Range [1, 3].
    pub direction_change_coefficient: f32,

    /// Sprint speed relative to walking. Range [1, 3].
    pub sprint_speed_multiplier: f32,

    /// Crouch speed relative to walking. Range [0, 1].
    pub crouch_speed_multiplier: f32,

    /// Drag when coming to rest on the ground. Range [0, 25].
    pub ground_drag: f32,

    /// Drag when coming to rest in the air. Range [0, 5].
    pub air_drag: f32,

    // ========================================================================
    // Ground Detection
    // ========================================================================
    /// Number of rays in the ground probe ring. Range [4, 10].
    pub ground_check_resolution: u32,

    /// Radius of the ground probe ring (meters). Range [0.05, 2].
    pub ground_probe_radius: f32,

    /// How far below the feet ground is detected. Values under 0.1 risk
    /// missing the ground. Range [0, 1].
    pub ground_check_distance: f32,

    /// Seconds ground checks stay disabled after a jump or grapple launch.
    /// Range [0, 0.2].
    pub ground_check_cooldown: f32,

    // ========================================================================
    // Gravity and Jump
    // ========================================================================
    /// Custom gravity (m/s²). Lower values give floatier jumps of the same height. Range [0, 50].
    pub gravity_acceleration: f32,

    /// Jump apex height (meters), independent of gravity. Range [0, 5].
    pub jump_height: f32,

    /// Pre-ground jump buffer depth in physics steps. Range [0, 100].
    pub jump_input_buffer_depth: usize,

    /// Coyote-time buffer depth in physics steps. Range [0, 100].
    pub ground_contact_buffer_depth: usize,

    // ========================================================================
    // Surface Magnetism
    // ========================================================================
    /// Pull toward the surface underfoot. Too strong misbehaves at ramp
    /// edges. Range [0, 10].
    pub magnetism_strength: f32,

    /// Speed above which magnetism engages (m/s). Range [0, 10].
    pub magnetism_min_velocity: f32,

    /// Probe length for magnetism and slope sampling (meters). Range [0, 5].
    pub magnetism_range: f32,

    /// How much speed scales the magnetism impulse. Range [0, 1].
    pub magnetism_velocity_scaling: f32,

    // ========================================================================
    // Ledge Mantle
    // ========================================================================
    /// Actor-relative mantle velocity as (right, up, forward).
    pub mantle_velocity: Vec3,

    /// Height of the probe that must be clear to mantle. Range [2, 5].
    pub mantle_head_check_height: f32,

    /// Height of the probe that must hit a wall to mantle. Range [1, 2].
    pub mantle_foothold_height: f32,

    /// Height of the probe whose miss ends the mantle. Range [-1, 1].
    pub mantle_cleared_height: f32,

    /// Reach of the three mantle probes (meters). Range [0.1, 5].
    pub mantle_probe_reach: f32,

    // ========================================================================
    // Crouch
    // ========================================================================
    /// Seconds from standing to fully crouched and back. Range [0, 0.5].
    pub crouch_transition_time: f32,

    /// Standing collider height (meters). Range [1, 3].
    pub standing_height: f32,

    /// Crouched collider height; must be below `standing_height`. Range [0.5, 2].
    pub crouch_height: f32,

    /// Head anchor (camera mount) height while standing. Range [0.5, 3].
    pub head_height: f32,

    /// Crouch key toggles instead of being held.
    pub toggle_crouch: bool,

    // ========================================================================
    // Sliding
    // ========================================================================
    /// Velocity boost applied once on slide entry. Range [1, 5].
    pub slide_initial_velocity_coefficient: f32,

    /// Drag while sliding on the ground. Range [0, 25].
    pub slide_ground_drag: f32,

    /// Drag while airborne out of a slide jump. Range [0, 10].
    pub slide_air_drag: f32,

    /// Downhill force while slope-sliding. Range [0, 100].
    pub slide_slope_force: f32,

    /// Drag multiplier while slope-sliding. Range [0, 5].
    pub slide_slope_drag: f32,

    /// Shallowest slidable slope in degrees (0 flat, 90 vertical). Range [0, 89].
    pub slide_slope_min_angle: f32,

    /// Steepest slidable slope in degrees. Range [0, 89].
    pub slide_slope_max_angle: f32,

    // ========================================================================
    // Grapple Hookshot
    // ========================================================================
    /// Closest grapple distance (meters). Range [0, 10].
    pub grapple_min_range: f32,

    /// Farthest grapple distance (meters). Range [0, 50].
    pub grapple_max_range: f32,

    /// How far above the view origin an anchor must be. Range [-3, 3].
    pub grapple_min_height_offset: f32,

    /// Minimum dot product between view forward and anchor direction
    /// (1 = dead center). Range [0, 1].
    pub grapple_min_alignment: f32,

    /// Pull speed toward the anchor (m/s). Range [1, 100].
    pub grapple_speed: f32,

    /// Height above the anchor where the view should finish. Range [0, 3].
    pub grapple_vertical_offset: f32,

    // ========================================================================
    // Rope Effect
    // ========================================================================
    /// Points in the rope line. Range [2, 1000].
    pub rope_line_resolution: usize,

    /// Amplitude of the rope wave. Range [0, 2].
    pub rope_wave_height: f32,

    /// Half-waves along the rope. Range [0, 5].
    pub rope_wave_count: f32,

    /// How fast the rope lead point travels to the anchor. Range [0, 50].
    pub rope_fire_speed: f32,

    /// Seconds for the wave to die down. Range (0, 1].
    pub rope_effect_duration: f32,

    /// Phase scroll of the wave during the effect. Range [0, 10].
    pub rope_scroll_speed: f32,

    /// Wave amplitude over normalized effect time.
    pub rope_time_dropoff: super::rope::EasingCurve,

    /// Wave amplitude along the rope.
    pub rope_effect_shape: super::rope::EasingCurve,
}

impl Default for MovementConfig {
    fn default() -> Self {
        use super::rope::EasingCurve;

        Self {
            base_move_speed: 6.0,
            ground_acceleration: 50.0,
            air_acceleration: 10.0,
            direction_change_coefficient: 2.0,
            sprint_speed_multiplier: 2.0,
            crouch_speed_multiplier: 0.5,
            ground_drag: 10.0,
            air_drag: 1.0,

            ground_check_resolution: 8,
            ground_probe_radius: 0.5,
            ground_check_distance: 0.1,
            ground_check_cooldown: 0.1,

            gravity_acceleration: 40.0,
            jump_height: 3.0,
            jump_input_buffer_depth: 20,
            ground_contact_buffer_depth: 30,

            magnetism_strength: 3.0,
            magnetism_min_velocity: 2.0,
            magnetism_range: 2.0,
            magnetism_velocity_scaling: 0.1,

            mantle_velocity: Vec3::new(0.0, 8.0, 10.0),
            mantle_head_check_height: 2.5,
            mantle_foothold_height: 1.5,
            mantle_cleared_height: -0.1,
            mantle_probe_reach: 2.0,

            crouch_transition_time: 0.1,
            standing_height: DEFAULT_STANDING_HEIGHT,
            crouch_height: DEFAULT_CROUCH_HEIGHT,
            head_height: 1.75,
            toggle_crouch: false,

            slide_initial_velocity_coefficient: 1.2,
            slide_ground_drag: 2.5,
            slide_air_drag: 2.0,
            slide_slope_force: 25.0,
            slide_slope_drag: 0.5,
            slide_slope_min_angle: 10.0,
            slide_slope_max_angle: 40.0,

            grapple_min_range: 3.0,
            grapple_max_range: 15.0,
            grapple_min_height_offset: 1.0,
            grapple_min_alignment: 0.9,
            grapple_speed: 40.0,
            grapple_vertical_offset: 1.0,

            rope_line_resolution: 500,
            rope_wave_height: 1.0,
            rope_wave_count: 2.0,
            rope_fire_speed: 20.0,
            rope_effect_duration: 0.3,
            rope_scroll_speed: 5.0,
            rope_time_dropoff: EasingCurve::InverseLinear,
            rope_effect_shape: EasingCurve::Bell,
        }
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    // NaN fails the contains check too.
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

fn check_order(low_field: &'static str, low: f32, high_field: &'static str, high: f32) -> Result<(), ConfigError> {
    if low <= high {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { low_field, low, high_field, high })
    }
}

impl MovementConfig {
    /// Snappier preset: faster ground speed, stronger air control, shorter buffers.
    pub fn arcade() -> Self {
        Self {
            base_move_speed: 8.0,
            air_acceleration: 25.0,
            gravity_acceleration: 30.0,
            jump_input_buffer_depth: 12,
            ground_contact_buffer_depth: 15,
            grapple_speed: 55.0,
            ..Default::default()
        }
    }

    /// Parses a JSON config and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MovementConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects configurations the controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.crouch_height < self.standing_height) {
            return Err(ConfigError::StanceHeights {
                crouch: self.crouch_height,
                standing: self.standing_height,
            });
        }

        check_range("base_move_speed", self.base_move_speed, 0.0, 20.0)?;
        check_range("ground_acceleration", self.ground_acceleration, 1.0, 100.0)?;
        check_range("air_acceleration", self.air_acceleration, 1.0, 100.0)?;
        check_range("direction_change_coefficient", self.direction_change_coefficient, 1.0, 3.0)?;
        check_range("sprint_speed_multiplier", self.sprint_speed_multiplier, 1.0, 3.0)?;
        check_range("crouch_speed_multiplier", self.crouch_speed_multiplier, 0.0, 1.0)?;
        check_range("ground_drag", self.ground_drag, 0.0, 25.0)?;
        check_range("air_drag", self.air_drag, 0.0, 5.0)?;

        check_range("ground_check_resolution", self.ground_check_resolution as f32, 4.0, 10.0)?;
        check_range("ground_probe_radius", self.ground_probe_radius, 0.05, 2.0)?;
        check_range("ground_check_distance", self.ground_check_distance, 0.0, 1.0)?;
        check_range("ground_check_cooldown", self.ground_check_cooldown, 0.0, 0.2)?;

        check_range("gravity_acceleration", self.gravity_acceleration, 0.0, 50.0)?;
        check_range("jump_height", self.jump_height, 0.0, 5.0)?;
        check_range("jump_input_buffer_depth", self.jump_input_buffer_depth as f32, 0.0, 100.0)?;
        check_range("ground_contact_buffer_depth", self.ground_contact_buffer_depth as f32, 0.0, 100.0)?;
        let half_probe = self.ground_check_distance / 2.0;
        if self.jump_height <= half_probe {
            return Err(ConfigError::UnreachableJump {
                jump_height: self.jump_height,
                half_probe,
            });
        }

        check_range("magnetism_strength", self.magnetism_strength, 0.0, 10.0)?;
        check_range("magnetism_min_velocity", self.magnetism_min_velocity, 0.0, 10.0)?;
        check_range("magnetism_range", self.magnetism_range, 0.0, 5.0)?;
        check_range("magnetism_velocity_scaling", self.magnetism_velocity_scaling, 0.0, 1.0)?;

        check_range("mantle_head_check_height", self.mantle_head_check_height, 2.0, 5.0)?;
        check_range("mantle_foothold_height", self.mantle_foothold_height, 1.0, 2.0)?;
        check_range("mantle_cleared_height", self.mantle_cleared_height, -1.0, 1.0)?;
        check_range("mantle_probe_reach", self.mantle_probe_reach, 0.1, 5.0)?;

        check_range("crouch_transition_time", self.crouch_transition_time, 0.0, 0.5)?;
        check_range("standing_height", self.standing_height, 1.0, 3.0)?;
        check_range("crouch_height", self.crouch_height, 0.5, 2.0)?;
        check_range("head_height", self.head_height, 0.5, 3.0)?;

        check_range("slide_initial_velocity_coefficient", self.slide_initial_velocity_coefficient, 1.0, 5.0)?;
        check_range("slide_ground_drag", self.slide_ground_drag, 0.0, 25.0)?;
        check_range("slide_air_drag", self.slide_air_drag, 0.0, 10.0)?;
        check_range("slide_slope_force", self.slide_slope_force, 0.0, 100.0)?;
        check_range("slide_slope_drag", self.slide_slope_drag, 0.0, 5.0)?;
        check_range("slide_slope_min_angle", self.slide_slope_min_angle, 0.0, 89.0)?;
        check_range("slide_slope_max_angle", self.slide_slope_max_angle, 0.0, 89.0)?;
        check_order(
            "slide_slope_min_angle",
            self.slide_slope_min_angle,
            "slide_slope_max_angle",
            self.slide_slope_max_angle,
        )?;

        check_range("grapple_min_range", self.grapple_min_range, 0.0, 10.0)?;
        check_range("grapple_max_range", self.grapple_max_range, 0.0, 50.0)?;
        check_order(
            "grapple_min_range",
            self.grapple_min_range,
            "grapple_max_range",
            self.grapple_max_range,
        )?;
        check_range("grapple_min_height_offset", self.grapple_min_height_offset, -3.0, 3.0)?;
        check_range("grapple_min_alignment", self.grapple_min_alignment, 0.0, 1.0)?;
        check_range("grapple_speed", self.grapple_speed, 1.0, 100.0)?;
        check_range("grapple_vertical_offset", self.grapple_vertical_offset, 0.0, 3.0)?;

        check_range("rope_line_resolution", self.rope_line_resolution as f32, 2.0, 1000.0)?;
        check_range("rope_wave_height", self.rope_wave_height, 0.0, 2.0)?;
        check_range("rope_wave_count", self.rope_wave_count, 0.0, 5.0)?;
        check_range("rope_fire_speed", self.rope_fire_speed, 0.0, 50.0)?;
        check_range("rope_scroll_speed", self.rope_scroll_speed, 0.0, 10.0)?;
        if !(self.rope_effect_duration > 0.0 && self.rope_effect_duration <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "rope_effect_duration",
                value: self.rope_effect_duration,
                min: f32::EPSILON,
                max: 1.0,
            });
        }

        Ok(())
    }

    /// Initial jump speed that reaches `jump_height`, compensating for the
    /// ground probe reach: `sqrt(2 g (h - d/2))`.
    pub fn jump_speed(&self) -> f32 {
        (2.0 * self.gravity_acceleration * (self.jump_height - (self.ground_check_distance / 2.0))).sqrt()
    }

    /// Collider height lost when fully crouched.
    pub fn crouch_depth(&self) -> f32 {
        self.standing_height - self.crouch_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MovementConfig::default();
        assert!(config.validate().is_ok());
        assert!(MovementConfig::arcade().validate().is_ok());
    }

    #[test]
    fn test_crouch_height_must_be_below_standing() {
        let config = MovementConfig {
            crouch_height: 2.0,
            standing_height: 2.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::StanceHeights { .. })));
    }

    #[test]
    fn test_out_of_range_field_is_named() {
        let config = MovementConfig {
            grapple_min_alignment: 1.5,
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::OutOfRange { field, .. }) => assert_eq!(field, "grapple_min_alignment"),
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_slope_range_rejected() {
        let config = MovementConfig {
            slide_slope_min_angle: 45.0,
            slide_slope_max_angle: 20.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvertedRange { .. })));
    }

    #[test]
    fn test_nan_rejected() {
        let config = MovementConfig {
            grapple_speed: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_and_partial_fields() {
        let config = MovementConfig::from_json_str(r#"{ "jump_height": 2.0, "toggle_crouch": true }"#)
            .expect("partial config should load");
        assert_eq!(config.jump_height, 2.0);
        assert!(config.toggle_crouch);
        assert_eq!(config.base_move_speed, MovementConfig::default().base_move_speed);

        let json = config.to_json_string().expect("serializes");
        assert_eq!(MovementConfig::from_json_str(&json).expect("reloads"), config);
    }

    #[test]
    fn test_json_load_rejects_invalid_values() {
        let result = MovementConfig::from_json_str(r#"{ "crouch_height": 2.5 }"#);
        assert!(matches!(result, Err(ConfigError::StanceHeights { .. })));

        assert!(matches!(MovementConfig::from_json_str("{ not json"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_jump_speed_formula() {
        let config = MovementConfig::default();
        let expected = (2.0_f32 * 40.0 * (3.0 - 0.05)).sqrt();
        assert!((config.jump_speed() - expected).abs() < 1e-5);
    }
}
