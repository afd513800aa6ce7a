//! Vantage Physics - rapier3d backend for the controller
//!
//! Provides the collision world, a kinematic capsule body, and
//! [`RapierBackend`], which answers the controller's [`PhysicsQuery`] calls.
//!
//! [`PhysicsQuery`]: vantage_core::PhysicsQuery

mod backend;
mod character_body;

pub use backend::RapierBackend;
pub use character_body::{CharacterBody, CharacterBodyConfig};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;
use vantage_core::{LayerMask, SurfaceTag};

/// Physics world configuration
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector applied to dynamic bodies (default: -9.81 on Y axis)
    pub gravity: Vec3,
    /// Physics timestep (default: 1/60)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            timestep: 1.0 / 60.0,
        }
    }
}

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Impulse joint storage
    pub impulse_joint_set: ImpulseJointSet,
    /// Multi-body joint storage
    pub multibody_joint_set: MultibodyJointSet,

    /// Integration parameters
    integration_parameters: IntegrationParameters,
    /// Physics pipeline
    physics_pipeline: PhysicsPipeline,
    /// Island manager
    island_manager: IslandManager,
    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,
    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,
    /// Continuous collision detection solver
    ccd_solver: CCDSolver,
    /// Query pipeline for raycasts and shape tests
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Timestep handed to the character mover
    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Step the physics simulation
    pub fn step(&mut self) {
        let gravity = vector![self.config.gravity.x, self.config.gravity.y, self.config.gravity.z];

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        self.update_queries();
    }

    /// Refresh the query pipeline after colliders were added or moved
    pub fn update_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, f32)> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_distance,
            true,
            filter,
        )
    }

    /// Find any collider overlapping a sphere
    pub fn overlap_sphere(
        &self,
        center: Vec3,
        radius: f32,
        filter: QueryFilter,
    ) -> Option<ColliderHandle> {
        let shape_pos = Isometry::translation(center.x, center.y, center.z);
        let ball = Ball::new(radius);

        self.query_pipeline.intersection_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &shape_pos,
            &ball,
            filter,
        )
    }

    /// Tag a collider was created with
    pub fn surface_tag(&self, handle: ColliderHandle) -> SurfaceTag {
        self.collider_set
            .get(handle)
            .map(|collider| SurfaceTag::from_bits(collider.user_data))
            .unwrap_or_default()
    }

    /// Create a ground plane collider on the given layers
    pub fn create_ground(&mut self, y: f32, layers: LayerMask) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .collision_groups(layer_groups(layers))
            .friction(0.7)
            .restitution(0.0)
            .build();
        self.add_static_collider(ground)
    }

    /// Create an untagged static box collider on every layer
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        self.create_tagged_box(half_extents, position, SurfaceTag::Untagged, LayerMask::ALL)
    }

    /// Create a static box collider with a surface tag and layer membership
    pub fn create_tagged_box(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        tag: SurfaceTag,
        layers: LayerMask,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .collision_groups(layer_groups(layers))
            .user_data(tag.to_bits())
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Collision groups for a collider living on `layers`
pub fn layer_groups(layers: LayerMask) -> InteractionGroups {
    InteractionGroups::new(Group::from_bits_truncate(layers.bits()), Group::ALL)
}

/// Query groups that only accept colliders on `mask`
pub fn mask_filter_groups(mask: LayerMask) -> InteractionGroups {
    InteractionGroups::new(Group::ALL, Group::from_bits_truncate(mask.bits()))
}
