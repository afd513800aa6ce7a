//! First-person movement controller
//!
//! Integrates gravity, jumping, crouching, sprint blending, mouse look and
//! smoothed horizontal motion once per frame. Collision resolution is left to
//! the [`PhysicsQuery`] handed to [`MovementController::advance`].

use glam::{Quat, Vec2, Vec3};
use tracing::{debug, info};
use vantage_core::{InputAction, InputSampler, PhysicsQuery, Transform};

use crate::camera::CameraRig;
use crate::error::ConfigError;

use super::{Gait, GroundState, MovementConfig, MovementState};

/// Displacements the physics backend actually applied this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameMotion {
    /// Result of the gravity/jump move
    pub vertical: Vec3,
    /// Result of the horizontal move (zero while paused)
    pub horizontal: Vec3,
}

/// Player controller handling input, movement, and the camera rig
pub struct MovementController {
    /// Movement configuration
    config: MovementConfig,
    /// Integrated state
    state: MovementState,
    /// Eye pivot and field of view
    camera: CameraRig,
    /// Capsule height captured at construction
    standing_height: f32,
    /// Input suppressed (gravity keeps running)
    paused: bool,
}

impl MovementController {
    /// Create a controller for the capsule `physics` currently holds
    ///
    /// The standing height is taken from the capsule as it is now.
    pub fn new<P: PhysicsQuery + ?Sized>(
        config: MovementConfig,
        physics: &P,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let standing_height = physics.capsule_height();
        if config.crouch_height >= standing_height {
            return Err(ConfigError::CrouchHeight {
                crouch: config.crouch_height,
                standing: standing_height,
            });
        }
        let diameter = 2.0 * physics.capsule_radius();
        if config.crouch_height < diameter {
            return Err(ConfigError::CrouchBelowDiameter {
                crouch: config.crouch_height,
                diameter,
            });
        }

        let base_fov = config.fov_range.x;
        let eye_offset = Vec3::new(0.0, standing_height * config.eye_height_ratio, 0.0);
        let state = MovementState::new(
            physics.position(),
            config.walk_speed,
            standing_height,
            base_fov,
        );

        info!(
            standing_height,
            crouch_height = config.crouch_height,
            walk_speed = config.walk_speed,
            run_speed = config.run_speed,
            "Movement controller created"
        );

        Ok(Self {
            camera: CameraRig::new(base_fov, eye_offset),
            config,
            state,
            standing_height,
            paused: false,
        })
    }

    /// Run one frame of movement
    pub fn advance<I, P>(&mut self, dt: f32, input: &I, physics: &mut P) -> FrameMotion
    where
        I: InputSampler + ?Sized,
        P: PhysicsQuery + ?Sized,
    {
        let dt = dt.max(0.0);

        let vertical = self.apply_gravity(dt, input, physics);

        if self.paused {
            self.state.gait = Gait::Idle;
            self.state.position = physics.position();
            return FrameMotion {
                vertical,
                horizontal: Vec3::ZERO,
            };
        }

        let move_axis = input.move_axis();
        self.update_stance(dt, input, move_axis, physics);
        self.look_around(dt, input.look_axis());
        let horizontal = self.move_around(dt, move_axis, physics);

        self.state.position = physics.position();
        FrameMotion {
            vertical,
            horizontal,
        }
    }

    /// Gravity, ground probe and jump, then the vertical capsule move
    fn apply_gravity<I, P>(&mut self, dt: f32, input: &I, physics: &mut P) -> Vec3
    where
        I: InputSampler + ?Sized,
        P: PhysicsQuery + ?Sized,
    {
        self.state.time_since_jump += dt;

        if self.state.is_grounded {
            self.state.vertical_velocity = self.config.grounded_bias;
            physics.set_slope_limit(self.config.grounded_slope_limit);
        } else {
            self.state.vertical_velocity -= self.config.gravity * dt;
            // Relaxed so a jump beside a wall does not snag on it
            physics.set_slope_limit(self.config.airborne_slope_limit);
        }

        // Still rising from a jump: a probe here would re-ground us immediately
        if self.state.time_since_jump > self.config.jump_lockout {
            let grounded = physics.probe_ground(
                physics.position(),
                self.config.ground_check_radius,
                self.config.ground_mask,
            );
            self.set_grounded(grounded);
        }

        if input.is_just_pressed(InputAction::Jump) && self.state.is_grounded {
            self.jump();
        }

        physics.move_capsule(Vec3::new(0.0, self.state.vertical_velocity, 0.0) * dt)
    }

    fn jump(&mut self) {
        self.state.vertical_velocity = self.config.jump_velocity();
        self.state.time_since_jump = 0.0;
        self.set_grounded(false);
        debug!(velocity = self.state.vertical_velocity, "Jump");
    }

    fn set_grounded(&mut self, grounded: bool) {
        if grounded != self.state.is_grounded {
            debug!(
                vertical_velocity = self.state.vertical_velocity,
                "{}",
                if grounded { "Landed" } else { "Left ground" }
            );
        }
        self.state.is_grounded = grounded;
    }

    /// Crouch, speed blend, FOV punch and capsule height
    fn update_stance<I, P>(&mut self, dt: f32, input: &I, move_axis: Vec2, physics: &mut P)
    where
        I: InputSampler + ?Sized,
        P: PhysicsQuery + ?Sized,
    {
        let was_crouching = self.state.is_crouching;
        let wants_crouch = input.is_held(InputAction::Crouch) && self.state.is_grounded;
        // A low ceiling keeps us down after the key is released
        let crouching = wants_crouch || (was_crouching && self.headroom_blocked(physics));
        if crouching != was_crouching {
            debug!(crouching, "Stance changed");
        }
        self.state.is_crouching = crouching;

        let sprinting = input.is_held(InputAction::Sprint) && move_axis.y > 0.0 && !crouching;
        let step = self.config.sprint_acceleration * dt;
        let gap = self.config.target_speed(sprinting) - self.state.current_speed;
        let speed = self.state.current_speed + gap.clamp(-step, step);
        self.state.current_speed = speed.clamp(self.config.walk_speed, self.config.run_speed);

        let t = self.smoothing(dt);
        let target_fov = self.config.target_fov(sprinting);
        self.state.current_fov += (target_fov - self.state.current_fov) * t;
        self.camera.set_fov(self.state.current_fov);

        let target_height = if crouching {
            self.config.crouch_height
        } else {
            self.standing_height
        };
        self.state.current_height += (target_height - self.state.current_height) * t;

        let height = self.state.current_height;
        physics.set_capsule_height(height);
        physics.set_capsule_center(Vec3::new(0.0, height / 2.0, 0.0));
        self.camera
            .set_eye_offset(Vec3::new(0.0, height * self.config.eye_height_ratio, 0.0));

        self.state.gait = if !self.state.is_grounded || move_axis == Vec2::ZERO {
            Gait::Idle
        } else if !crouching && self.state.current_speed >= self.config.run_speed {
            Gait::Run
        } else {
            Gait::Walk
        };
    }

    /// Four upward rays from the top of the capsule at its lateral extremes
    fn headroom_blocked<P: PhysicsQuery + ?Sized>(&self, physics: &P) -> bool {
        let clearance = self.standing_height - self.state.current_height;
        if clearance <= 0.0 {
            return false;
        }

        let radius = physics.capsule_radius();
        let top = physics.position() + Vec3::Y * self.state.current_height;
        [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z]
            .into_iter()
            .any(|side| physics.raycast(top + side * radius, Vec3::Y, clearance))
    }

    fn look_around(&mut self, dt: f32, look: Vec2) {
        let scale = self.config.look_sensitivity * dt;

        let yaw = self.state.facing_yaw + (look.x * scale).to_radians();
        self.state.facing_yaw = yaw.rem_euclid(std::f32::consts::TAU);

        let pitch_min = self.config.pitch_range.x.to_radians();
        let pitch_max = self.config.pitch_range.y.to_radians();
        let pitch = self.state.pitch - (look.y * scale).to_radians();
        self.state.pitch = pitch.clamp(pitch_min, pitch_max);
        self.camera.set_pitch(self.state.pitch);
    }

    fn move_around<P: PhysicsQuery + ?Sized>(
        &mut self,
        dt: f32,
        move_axis: Vec2,
        physics: &mut P,
    ) -> Vec3 {
        let wish = self.right() * move_axis.x + self.forward() * move_axis.y;
        let direction = wish.normalize_or_zero();

        let t = self.smoothing(dt);
        self.state.move_direction = self.state.move_direction.lerp(direction, t);

        let displacement = self.state.move_direction * self.effective_speed() * dt;
        physics.move_capsule(displacement)
    }

    /// Interpolation factor for this frame, never past the target
    fn smoothing(&self, dt: f32) -> f32 {
        (self.config.movement_smoothness * dt).clamp(0.0, 1.0)
    }

    /// Suppress input; gravity keeps integrating
    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.paused {
            info!(paused, "Movement input suppression changed");
        }
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Move the capsule without sweeping and drop all motion
    pub fn teleport<P: PhysicsQuery + ?Sized>(&mut self, physics: &mut P, position: Vec3) {
        physics.set_position(position);
        self.state.position = position;
        self.state.vertical_velocity = 0.0;
        self.state.move_direction = Vec3::ZERO;
        self.set_grounded(false);
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn ground_state(&self) -> GroundState {
        self.state.ground_state()
    }

    pub fn gait(&self) -> Gait {
        self.state.gait
    }

    /// Capsule height captured at construction
    pub fn standing_height(&self) -> f32 {
        self.standing_height
    }

    /// Current speed with the crouch multiplier applied
    pub fn effective_speed(&self) -> f32 {
        if self.state.is_crouching {
            self.state.current_speed * self.config.crouch_speed_multiplier
        } else {
            self.state.current_speed
        }
    }

    /// Smoothed horizontal velocity in m/s
    pub fn horizontal_velocity(&self) -> Vec3 {
        self.state.move_direction * self.effective_speed()
    }

    /// Yaw-only body orientation (the body never tilts)
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.state.facing_yaw)
    }

    /// Body transform at the feet
    pub fn transform(&self) -> Transform {
        Transform::from_position_rotation(self.state.position, self.body_rotation())
    }

    /// Horizontal facing direction
    pub fn forward(&self) -> Vec3 {
        self.transform().forward()
    }

    /// Horizontal right direction
    pub fn right(&self) -> Vec3 {
        self.transform().right()
    }

    /// World-space eye position
    pub fn eye_position(&self) -> Vec3 {
        self.transform().transform_point(self.camera.eye_offset())
    }

    /// World-space view direction including pitch
    pub fn view_direction(&self) -> Vec3 {
        self.camera.forward(self.state.facing_yaw)
    }
}
