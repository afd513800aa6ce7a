//! [`PhysicsQuery`] implementation over a rapier world and one capsule body

use glam::Vec3;
use rapier3d::prelude::QueryFilter;
use vantage_core::{LayerMask, PhysicsQuery, SurfaceTag};

use crate::{mask_filter_groups, CharacterBody, CharacterBodyConfig, PhysicsWorld};

/// Owns the world and the player capsule so the controller can query and move it
pub struct RapierBackend {
    /// Collision world
    pub world: PhysicsWorld,
    /// Player capsule
    pub body: CharacterBody,
}

impl RapierBackend {
    /// Spawn a capsule at `position` inside `world`
    pub fn new(mut world: PhysicsWorld, config: CharacterBodyConfig, position: Vec3) -> Self {
        let mut body = CharacterBody::with_config(config);
        body.spawn(&mut world, position);
        Self { world, body }
    }

    /// Step the world
    pub fn step(&mut self) {
        self.world.step();
    }

    /// Filter that ignores the player's own capsule
    fn filter(&self) -> QueryFilter<'static> {
        match self.body.collider_handle() {
            Some(handle) => QueryFilter::default().exclude_collider(handle),
            None => QueryFilter::default(),
        }
    }
}

impl PhysicsQuery for RapierBackend {
    fn probe_ground(&self, origin: Vec3, radius: f32, mask: LayerMask) -> bool {
        let filter = self.filter().groups(mask_filter_groups(mask));
        self.world.overlap_sphere(origin, radius, filter).is_some()
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        self.world
            .raycast(origin, direction, max_distance, self.filter())
            .is_some()
    }

    fn pick(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<SurfaceTag> {
        self.world
            .raycast(origin, direction, max_distance, self.filter())
            .map(|(handle, _)| self.world.surface_tag(handle))
    }

    fn move_capsule(&mut self, displacement: Vec3) -> Vec3 {
        let dt = self.world.timestep();
        self.body.move_character(&mut self.world, displacement, dt)
    }

    fn set_slope_limit(&mut self, degrees: f32) {
        self.body.set_slope_limit(degrees);
    }

    fn set_capsule_height(&mut self, height: f32) {
        self.body.set_height(&mut self.world, height);
    }

    fn set_capsule_center(&mut self, center: Vec3) {
        self.body.set_center(&mut self.world, center);
    }

    fn capsule_height(&self) -> f32 {
        self.body.height()
    }

    fn capsule_radius(&self) -> f32 {
        self.body.radius()
    }

    fn position(&self) -> Vec3 {
        self.body.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.body.set_position(&mut self.world, position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_on_ground() -> RapierBackend {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0, LayerMask::layer(0));
        RapierBackend::new(world, CharacterBodyConfig::default(), Vec3::new(0.0, 0.05, 0.0))
    }

    #[test]
    fn test_probe_ground_ignores_own_capsule() {
        let backend = backend_on_ground();

        // Inside the capsule but well above the floor
        assert!(!backend.probe_ground(Vec3::new(0.0, 1.0, 0.0), 0.2, LayerMask::ALL));
        assert!(backend.probe_ground(Vec3::new(0.0, 0.1, 0.0), 0.2, LayerMask::layer(0)));
        assert!(!backend.probe_ground(Vec3::new(0.0, 0.1, 0.0), 0.2, LayerMask::layer(4)));
    }

    #[test]
    fn test_raycast_and_pick() {
        let mut backend = backend_on_ground();
        backend.world.create_tagged_box(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(0.0, 1.0, -3.0),
            SurfaceTag::Item,
            LayerMask::ALL,
        );
        backend.world.update_queries();

        let eye = Vec3::new(0.0, 1.0, 0.0);
        assert!(backend.raycast(eye, Vec3::NEG_Z, 5.0));
        assert!(!backend.raycast(eye, Vec3::NEG_Z, 1.0));
        assert_eq!(backend.pick(eye, Vec3::NEG_Z, 5.0), Some(SurfaceTag::Item));
        assert_eq!(backend.pick(eye, Vec3::Z, 5.0), None);
    }

    #[test]
    fn test_capsule_reshaping() {
        let mut backend = backend_on_ground();
        backend.set_capsule_height(1.2);
        backend.set_capsule_center(Vec3::new(0.0, 0.6, 0.0));

        assert_eq!(backend.capsule_height(), 1.2);
        assert_eq!(backend.capsule_radius(), 0.4);
        assert_eq!(backend.body.center_position().y, backend.position().y + 0.6);
    }

    #[test]
    fn test_move_capsule_horizontal() {
        let mut backend = backend_on_ground();
        let applied = backend.move_capsule(Vec3::new(0.5, 0.0, 0.0));
        assert!((applied.x - 0.5).abs() < 1e-3);
        assert!((backend.position().x - 0.5).abs() < 1e-3);
    }
}
