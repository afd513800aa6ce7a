//! Movement configuration and constants

use glam::Vec2;
use serde::{Deserialize, Serialize};
use vantage_core::LayerMask;

use crate::error::ConfigError;

/// Movement configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed in meters per second
    pub walk_speed: f32,
    /// Sprinting speed in meters per second
    pub run_speed: f32,
    /// How fast the speed moves between walk and run (m/s per second)
    pub sprint_acceleration: f32,
    /// Multiplier applied to the speed while crouching
    pub crouch_speed_multiplier: f32,
    /// Capsule height while crouching
    pub crouch_height: f32,
    /// Rate for direction, height and FOV smoothing (per second)
    pub movement_smoothness: f32,
    /// Jump strength; the launch velocity is sqrt(jump_force * 2 * gravity)
    pub jump_force: f32,
    /// Gravity magnitude in m/s^2
    pub gravity: f32,
    /// Radius of the sphere tested at the feet for ground contact
    pub ground_check_radius: f32,
    /// Layers counted as ground
    pub ground_mask: LayerMask,
    /// Look sensitivity in degrees per unit of look delta per second
    pub look_sensitivity: f32,
    /// Pitch limits in degrees (x = min, y = max)
    pub pitch_range: Vec2,
    /// Field of view in degrees (x = walking, y = sprinting)
    pub fov_range: Vec2,
    /// Seconds after a jump during which the ground probe is skipped
    pub jump_lockout: f32,
    /// Vertical velocity held while grounded to keep the capsule seated
    pub grounded_bias: f32,
    /// Slope limit in degrees while grounded
    pub grounded_slope_limit: f32,
    /// Slope limit in degrees while airborne
    pub airborne_slope_limit: f32,
    /// Eye height as a fraction of the capsule height
    pub eye_height_ratio: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 4.0,
            run_speed: 7.0,
            sprint_acceleration: 10.0,
            crouch_speed_multiplier: 0.5,
            crouch_height: 1.0,
            movement_smoothness: 10.0,
            jump_force: 1.2,
            gravity: 19.6,
            ground_check_radius: 0.3,
            ground_mask: LayerMask::ALL,
            look_sensitivity: 10.0,
            pitch_range: Vec2::new(-85.0, 85.0),
            fov_range: Vec2::new(70.0, 80.0),
            jump_lockout: 0.3,
            grounded_bias: -3.5,
            grounded_slope_limit: 45.0,
            airborne_slope_limit: 90.0,
            eye_height_ratio: 0.875,
        }
    }
}

impl MovementConfig {
    /// Launch velocity of a jump
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_force * 2.0 * self.gravity).sqrt()
    }

    /// Target speed for the current sprint state
    pub fn target_speed(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.run_speed
        } else {
            self.walk_speed
        }
    }

    /// Target field of view for the current sprint state
    pub fn target_fov(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.fov_range.y
        } else {
            self.fov_range.x
        }
    }

    /// Check the configuration once before it is used
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("walk_speed", self.walk_speed)?;
        positive("run_speed", self.run_speed)?;
        positive("crouch_height", self.crouch_height)?;
        positive("gravity", self.gravity)?;
        positive("ground_check_radius", self.ground_check_radius)?;
        positive("eye_height_ratio", self.eye_height_ratio)?;

        non_negative("sprint_acceleration", self.sprint_acceleration)?;
        non_negative("crouch_speed_multiplier", self.crouch_speed_multiplier)?;
        non_negative("movement_smoothness", self.movement_smoothness)?;
        non_negative("jump_force", self.jump_force)?;
        non_negative("look_sensitivity", self.look_sensitivity)?;
        non_negative("jump_lockout", self.jump_lockout)?;

        if self.walk_speed > self.run_speed {
            return Err(ConfigError::SpeedRange {
                walk: self.walk_speed,
                run: self.run_speed,
            });
        }
        ordered("pitch_range", self.pitch_range)?;
        ordered("fov_range", self.fov_range)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn ordered(field: &'static str, range: Vec2) -> Result<(), ConfigError> {
    if range.x <= range.y {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange {
            field,
            min: range.x,
            max: range.y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(MovementConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_jump_velocity() {
        let config = MovementConfig {
            jump_force: 2.0,
            gravity: 9.8,
            ..Default::default()
        };
        assert!((config.jump_velocity() - (2.0_f32 * 2.0 * 9.8).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_walk_faster_than_run_rejected() {
        let config = MovementConfig {
            walk_speed: 12.0,
            run_speed: 10.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpeedRange { walk: 12.0, run: 10.0 })
        );
    }

    #[test]
    fn test_inverted_ranges_rejected() {
        let config = MovementConfig {
            pitch_range: Vec2::new(80.0, -80.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { field: "pitch_range", .. })
        ));

        let config = MovementConfig {
            fov_range: Vec2::new(90.0, 60.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { field: "fov_range", .. })
        ));
    }

    #[test]
    fn test_non_positive_gravity_rejected() {
        let config = MovementConfig {
            gravity: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "gravity", .. })
        ));
    }

    #[test]
    fn test_targets() {
        let config = MovementConfig::default();
        assert_eq!(config.target_speed(true), config.run_speed);
        assert_eq!(config.target_speed(false), config.walk_speed);
        assert_eq!(config.target_fov(true), config.fov_range.y);
        assert_eq!(config.target_fov(false), config.fov_range.x);
    }
}
