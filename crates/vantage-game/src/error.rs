//! Error types for controller configuration

use thiserror::Error;

/// Configuration rejected when a controller is built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A value that must be strictly positive was not
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    /// A rate or multiplier was negative
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    /// Walk speed exceeds run speed
    #[error("walk_speed ({walk}) exceeds run_speed ({run})")]
    SpeedRange { walk: f32, run: f32 },

    /// A (min, max) pair is inverted
    #[error("{field} range is inverted: min {min} > max {max}")]
    InvertedRange { field: &'static str, min: f32, max: f32 },

    /// Crouch height does not fit under the standing capsule
    #[error("crouch_height ({crouch}) must be below the standing height ({standing})")]
    CrouchHeight { crouch: f32, standing: f32 },

    /// Crouch height is shorter than the capsule is wide
    #[error("crouch_height ({crouch}) is below the capsule diameter ({diameter})")]
    CrouchBelowDiameter { crouch: f32, diameter: f32 },
}
