//! Per-frame movement state owned by the controller

use glam::Vec3;

/// Whether the capsule is standing on something
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundState {
    Grounded,
    Airborne,
}

/// Locomotion level fed to a head-bob animator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gait {
    #[default]
    Idle,
    Walk,
    Run,
}

impl Gait {
    /// Animator speed parameter (0 idle, 1 walk, 2 run)
    pub fn level(&self) -> u8 {
        match self {
            Gait::Idle => 0,
            Gait::Walk => 1,
            Gait::Run => 2,
        }
    }
}

/// Snapshot of everything the controller integrates frame to frame
#[derive(Debug, Clone, PartialEq)]
pub struct MovementState {
    /// Feet position after the last capsule move
    pub position: Vec3,
    /// Body yaw in radians (positive turns right)
    pub facing_yaw: f32,
    /// Camera pitch in radians (positive looks up)
    pub pitch: f32,
    /// Vertical velocity in m/s (positive is up)
    pub vertical_velocity: f32,
    /// Smoothed horizontal move direction, length at most 1
    pub move_direction: Vec3,
    /// Blended speed, always within [walk_speed, run_speed]
    pub current_speed: f32,
    pub is_grounded: bool,
    pub is_crouching: bool,
    /// Seconds since the last jump
    pub time_since_jump: f32,
    /// Interpolated capsule height
    pub current_height: f32,
    /// Interpolated field of view in degrees
    pub current_fov: f32,
    pub gait: Gait,
}

impl MovementState {
    /// State at construction: airborne at rest until the first ground probe
    pub fn new(position: Vec3, walk_speed: f32, height: f32, fov: f32) -> Self {
        Self {
            position,
            facing_yaw: 0.0,
            pitch: 0.0,
            vertical_velocity: 0.0,
            move_direction: Vec3::ZERO,
            current_speed: walk_speed,
            is_grounded: false,
            is_crouching: false,
            time_since_jump: 0.0,
            current_height: height,
            current_fov: fov,
            gait: Gait::Idle,
        }
    }

    /// Grounded/airborne view of `is_grounded`
    pub fn ground_state(&self) -> GroundState {
        if self.is_grounded {
            GroundState::Grounded
        } else {
            GroundState::Airborne
        }
    }
}
