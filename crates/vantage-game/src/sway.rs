//! Held-object sway
//!
//! Offsets a held object's local position against the look delta so it trails
//! the view, then eases it back to rest.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use vantage_core::InputSampler;

use crate::error::ConfigError;
use crate::player::MovementController;

/// Sway tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwayConfig {
    /// Offset per unit of look delta
    pub amount: f32,
    /// Largest offset on either axis
    pub max_amount: f32,
    /// Rate the offset follows its target (per second)
    pub smooth: f32,
}

impl Default for SwayConfig {
    fn default() -> Self {
        Self {
            amount: 0.02,
            max_amount: 0.06,
            smooth: 6.0,
        }
    }
}

impl SwayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("amount", self.amount),
            ("max_amount", self.max_amount),
            ("smooth", self.smooth),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

/// Smoothed follow of a held object's local position
#[derive(Debug, Clone)]
pub struct SwayController {
    config: SwayConfig,
    /// Local position captured at construction
    rest_offset: Vec3,
    current_offset: Vec3,
}

impl SwayController {
    pub fn new(config: SwayConfig, rest_offset: Vec3) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rest_offset,
            current_offset: rest_offset,
        })
    }

    /// Step the follow with a raw look delta (+x right, +y down)
    ///
    /// While `suppressed` the target is the rest offset, so the object eases
    /// back instead of snapping.
    pub fn advance(&mut self, dt: f32, look_delta: Vec2, suppressed: bool) -> Vec3 {
        let target = if suppressed {
            self.rest_offset
        } else {
            // Trail opposite to the view: look right shifts left, look up shifts down
            let max = Vec2::splat(self.config.max_amount);
            let trail = Vec2::new(-look_delta.x, look_delta.y) * self.config.amount;
            let trail = trail.clamp(-max, max);
            self.rest_offset + trail.extend(0.0)
        };

        let t = (self.config.smooth * dt.max(0.0)).min(1.0);
        self.current_offset = self.current_offset.lerp(target, t);
        self.current_offset
    }

    /// Step using the look axis, suppressed while the controller is paused
    pub fn follow<I: InputSampler + ?Sized>(
        &mut self,
        dt: f32,
        input: &I,
        controller: &MovementController,
    ) -> Vec3 {
        self.advance(dt, input.look_axis(), controller.is_paused())
    }

    /// Local position to give the held object
    pub fn offset(&self) -> Vec3 {
        self.current_offset
    }

    pub fn rest_offset(&self) -> Vec3 {
        self.rest_offset
    }

    pub fn config(&self) -> &SwayConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::MovementConfig;
    use crate::testing::{MockPhysics, ScriptedInput};

    const REST: Vec3 = Vec3::new(0.3, -0.25, 0.5);

    fn sway() -> SwayController {
        SwayController::new(SwayConfig::default(), REST).unwrap()
    }

    #[test]
    fn test_sway_starts_at_rest() {
        let mut sway = sway();
        assert_eq!(sway.offset(), REST);
        assert_eq!(sway.advance(0.016, Vec2::ZERO, false), REST);
    }

    #[test]
    fn test_sway_trails_look() {
        let mut sway = sway();
        // Look right and up
        let offset = sway.advance(0.016, Vec2::new(1.0, -1.0), false);
        assert!(offset.x < REST.x);
        assert!(offset.y < REST.y);
        assert_eq!(offset.z, REST.z);
    }

    #[test]
    fn test_sway_clamped() {
        let mut sway = sway();
        let max = sway.config().max_amount;
        for _ in 0..200 {
            sway.advance(0.016, Vec2::new(500.0, -500.0), false);
        }
        let delta = sway.offset() - REST;
        assert!((delta.x + max).abs() < 1e-4);
        assert!((delta.y + max).abs() < 1e-4);
        assert!(delta.x >= -max - 1e-6);
    }

    #[test]
    fn test_suppressed_eases_back() {
        let mut sway = sway();
        for _ in 0..20 {
            sway.advance(0.016, Vec2::new(5.0, 0.0), false);
        }
        let displaced = (sway.offset() - REST).length();
        assert!(displaced > 0.0);

        // Look input ignored while suppressed, offset shrinks without snapping
        let eased = (sway.advance(0.016, Vec2::new(5.0, 0.0), true) - REST).length();
        assert!(eased < displaced);
        assert!(eased > 0.0);
    }

    #[test]
    fn test_large_step_does_not_overshoot() {
        let mut sway = sway();
        let offset = sway.advance(10.0, Vec2::new(1.0, 0.0), false);
        let target_x = REST.x - sway.config().amount;
        assert!((offset.x - target_x).abs() < 1e-6);
    }

    #[test]
    fn test_negative_config_rejected() {
        let config = SwayConfig {
            smooth: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            SwayController::new(config, REST),
            Err(ConfigError::Negative { field: "smooth", .. })
        ));
    }

    #[test]
    fn test_follow_reads_pause_flag() {
        let physics = MockPhysics::new(2.0);
        let mut controller = MovementController::new(MovementConfig::default(), &physics).unwrap();
        let input = ScriptedInput::looking(Vec2::new(3.0, 0.0));

        let mut sway = sway();
        sway.follow(0.016, &input, &controller);
        assert!(sway.offset().x < REST.x);

        controller.set_paused(true);
        let before = (sway.offset() - REST).length();
        sway.follow(0.016, &input, &controller);
        assert!((sway.offset() - REST).length() < before);
    }
}
