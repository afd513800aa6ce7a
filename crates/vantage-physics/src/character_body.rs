//! Kinematic capsule using rapier3d's kinematic character controller

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use tracing::debug;

use crate::PhysicsWorld;

/// Capsule body configuration
#[derive(Debug, Clone)]
pub struct CharacterBodyConfig {
    /// Initial capsule height (default: 2.0m)
    pub height: f32,
    /// Capsule radius (default: 0.4m)
    pub radius: f32,
    /// Maximum slope angle in degrees (default: 45)
    pub max_slope_angle: f32,
    /// Step height for climbing stairs (default: 0.3m)
    pub step_height: f32,
    /// Skin width for collision detection (default: 0.02m)
    pub skin_width: f32,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 0.4,
            max_slope_angle: 45.0,
            step_height: 0.3,
            skin_width: 0.02,
        }
    }
}

/// Capsule swept through the world by the movement controller
pub struct CharacterBody {
    /// Configuration
    pub config: CharacterBodyConfig,
    /// Feet position
    pub position: Vec3,
    /// Current capsule height
    height: f32,
    /// Capsule center relative to the feet
    center: Vec3,
    /// The collider handle for this body
    collider_handle: Option<ColliderHandle>,
    /// Rapier's kinematic character controller
    controller: KinematicCharacterController,
}

impl CharacterBody {
    /// Create a new body with default config
    pub fn new() -> Self {
        Self::with_config(CharacterBodyConfig::default())
    }

    /// Create a new body with custom config
    pub fn with_config(config: CharacterBodyConfig) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: true,
        });
        // Vertical motion is driven explicitly every frame
        controller.snap_to_ground = None;
        controller.offset = CharacterLength::Absolute(config.skin_width);

        let height = config.height;
        Self {
            config,
            position: Vec3::ZERO,
            height,
            center: Vec3::new(0.0, height / 2.0, 0.0),
            collider_handle: None,
            controller,
        }
    }

    /// Spawn the body in the physics world
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) -> ColliderHandle {
        self.position = position;

        let collider = ColliderBuilder::new(self.shape())
            .translation(vector![
                position.x + self.center.x,
                position.y + self.center.y,
                position.z + self.center.z
            ])
            .friction(0.0) // Smooth sliding against walls
            .restitution(0.0)
            .build();

        let handle = physics.add_static_collider(collider);
        self.collider_handle = Some(handle);
        physics.update_queries();
        handle
    }

    /// Collider handle, once spawned
    pub fn collider_handle(&self) -> Option<ColliderHandle> {
        self.collider_handle
    }

    /// Sweep the body with collision detection, returning the applied translation
    pub fn move_character(
        &mut self,
        physics: &mut PhysicsWorld,
        desired_translation: Vec3,
        dt: f32,
    ) -> Vec3 {
        let Some(collider_handle) = self.collider_handle else {
            return Vec3::ZERO;
        };

        let Some(collider) = physics.collider_set.get(collider_handle) else {
            return Vec3::ZERO;
        };

        let shape = collider.shape();
        let current_pos = Isometry::translation(
            self.position.x + self.center.x,
            self.position.y + self.center.y,
            self.position.z + self.center.z,
        );

        let movement = self.controller.move_shape(
            dt,
            &physics.rigid_body_set,
            &physics.collider_set,
            &physics.query_pipeline,
            shape,
            &current_pos,
            vector![desired_translation.x, desired_translation.y, desired_translation.z],
            QueryFilter::default().exclude_collider(collider_handle),
            |_| {},
        );

        let applied = Vec3::new(
            movement.translation.x,
            movement.translation.y,
            movement.translation.z,
        );
        self.position += applied;
        self.sync_collider(physics);
        applied
    }

    /// Set the body's position directly (teleport)
    pub fn set_position(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.position = position;
        self.sync_collider(physics);
    }

    /// Resize the capsule, keeping the radius
    pub fn set_height(&mut self, physics: &mut PhysicsWorld, height: f32) {
        self.height = height.max(self.config.radius * 2.0);

        if let Some(handle) = self.collider_handle {
            if let Some(collider) = physics.collider_set.get_mut(handle) {
                collider.set_shape(self.shape());
            }
        }
    }

    /// Move the capsule center relative to the feet
    pub fn set_center(&mut self, physics: &mut PhysicsWorld, center: Vec3) {
        self.center = center;
        self.sync_collider(physics);
    }

    /// Steepest slope the sweep will climb, in degrees
    pub fn set_slope_limit(&mut self, degrees: f32) {
        let radians = degrees.clamp(0.0, 90.0).to_radians();
        if (self.controller.max_slope_climb_angle - radians).abs() > f32::EPSILON {
            debug!(degrees, "Slope limit changed");
        }
        self.controller.max_slope_climb_angle = radians;
        self.controller.min_slope_slide_angle = radians;
    }

    /// Steepest climbable slope in degrees
    pub fn slope_limit(&self) -> f32 {
        self.controller.max_slope_climb_angle.to_degrees()
    }

    /// Current capsule height
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Capsule radius
    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    /// Capsule center relative to the feet
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Get the center position in world space
    pub fn center_position(&self) -> Vec3 {
        self.position + self.center
    }

    fn shape(&self) -> SharedShape {
        let half_height = (self.height - 2.0 * self.config.radius) / 2.0;
        SharedShape::capsule_y(half_height.max(0.01), self.config.radius)
    }

    fn sync_collider(&self, physics: &mut PhysicsWorld) {
        let Some(handle) = self.collider_handle else {
            return;
        };
        if let Some(collider) = physics.collider_set.get_mut(handle) {
            let center = self.center_position();
            collider.set_translation(vector![center.x, center.y, center.z]);
        }
    }
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::LayerMask;

    #[test]
    fn test_character_body_config() {
        let config = CharacterBodyConfig::default();
        assert_eq!(config.height, 2.0);
        assert_eq!(config.radius, 0.4);
        assert_eq!(config.max_slope_angle, 45.0);
    }

    #[test]
    fn test_center_follows_height() {
        let body = CharacterBody::new();
        assert_eq!(body.center(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(body.center_position(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_height_never_below_diameter() {
        let mut world = PhysicsWorld::new();
        let mut body = CharacterBody::new();
        body.spawn(&mut world, Vec3::ZERO);

        body.set_height(&mut world, 0.1);
        assert_eq!(body.height(), 0.8);
    }

    #[test]
    fn test_slope_limit_round_trip() {
        let mut body = CharacterBody::new();
        body.set_slope_limit(90.0);
        assert!((body.slope_limit() - 90.0).abs() < 1e-3);
        body.set_slope_limit(45.0);
        assert!((body.slope_limit() - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_move_blocked_by_ground() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0, LayerMask::ALL);
        let mut body = CharacterBody::new();
        body.spawn(&mut world, Vec3::new(0.0, 0.05, 0.0));

        let applied = body.move_character(&mut world, Vec3::new(0.0, -1.0, 0.0), 1.0 / 60.0);
        assert!(applied.y > -1.0);
        assert!(body.position.y > -0.01);
    }

    #[test]
    fn test_unspawned_body_does_not_move() {
        let mut world = PhysicsWorld::new();
        let mut body = CharacterBody::new();
        let applied = body.move_character(&mut world, Vec3::X, 1.0 / 60.0);
        assert_eq!(applied, Vec3::ZERO);
    }
}
