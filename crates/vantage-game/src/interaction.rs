//! Forward-ray focus detection
//!
//! Casts one ray from the eye along the view each frame and classifies what it
//! hits by surface tag. Acting on the result is up to the caller.

use glam::Vec3;
use tracing::debug;
use vantage_core::{PhysicsQuery, SurfaceTag};

/// What the view ray is resting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionTarget {
    /// Something that can be picked up
    Item,
    /// A door
    Door,
    /// Any other surface within range
    Other,
}

impl From<SurfaceTag> for InteractionTarget {
    fn from(tag: SurfaceTag) -> Self {
        match tag {
            SurfaceTag::Item => InteractionTarget::Item,
            SurfaceTag::Door => InteractionTarget::Door,
            SurfaceTag::Untagged => InteractionTarget::Other,
        }
    }
}

/// Focus detection along the view direction
#[derive(Debug, Clone)]
pub struct Interactor {
    /// Ray length in meters
    range: f32,
    /// Result of the last update
    focused: Option<InteractionTarget>,
}

impl Interactor {
    pub fn new(range: f32) -> Self {
        Self {
            range: range.max(0.0),
            focused: None,
        }
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    /// Classify whatever the ray from `origin` along `forward` hits first
    pub fn probe<P: PhysicsQuery + ?Sized>(
        &self,
        origin: Vec3,
        forward: Vec3,
        physics: &P,
    ) -> Option<InteractionTarget> {
        let direction = forward.normalize_or_zero();
        if direction == Vec3::ZERO || self.range <= 0.0 {
            return None;
        }
        physics
            .pick(origin, direction, self.range)
            .map(InteractionTarget::from)
    }

    /// Probe and remember the result as the current focus
    pub fn update<P: PhysicsQuery + ?Sized>(
        &mut self,
        origin: Vec3,
        forward: Vec3,
        physics: &P,
    ) -> Option<InteractionTarget> {
        let target = self.probe(origin, forward, physics);
        if target != self.focused {
            debug!(from = ?self.focused, to = ?target, "Focus changed");
        }
        self.focused = target;
        target
    }

    /// Target found by the last update, if any
    pub fn focused(&self) -> Option<InteractionTarget> {
        self.focused
    }
}

impl Default for Interactor {
    fn default() -> Self {
        Self::new(3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockPhysics;

    #[test]
    fn test_classifies_tags() {
        let interactor = Interactor::new(3.0);
        let mut physics = MockPhysics::new(2.0);

        for (tag, expected) in [
            (SurfaceTag::Item, InteractionTarget::Item),
            (SurfaceTag::Door, InteractionTarget::Door),
            (SurfaceTag::Untagged, InteractionTarget::Other),
        ] {
            physics.target = Some((tag, 2.0));
            assert_eq!(
                interactor.probe(Vec3::Y, Vec3::NEG_Z, &physics),
                Some(expected)
            );
        }
    }

    #[test]
    fn test_out_of_range_misses() {
        let interactor = Interactor::new(3.0);
        let mut physics = MockPhysics::new(2.0);
        physics.target = Some((SurfaceTag::Door, 5.0));
        assert_eq!(interactor.probe(Vec3::Y, Vec3::NEG_Z, &physics), None);
    }

    #[test]
    fn test_zero_direction_misses() {
        let interactor = Interactor::new(3.0);
        let mut physics = MockPhysics::new(2.0);
        physics.target = Some((SurfaceTag::Item, 1.0));
        assert_eq!(interactor.probe(Vec3::Y, Vec3::ZERO, &physics), None);
    }

    #[test]
    fn test_update_tracks_focus() {
        let mut interactor = Interactor::default();
        let mut physics = MockPhysics::new(2.0);
        assert_eq!(interactor.focused(), None);

        physics.target = Some((SurfaceTag::Item, 1.0));
        interactor.update(Vec3::Y, Vec3::NEG_Z, &physics);
        assert_eq!(interactor.focused(), Some(InteractionTarget::Item));

        physics.target = None;
        interactor.update(Vec3::Y, Vec3::NEG_Z, &physics);
        assert_eq!(interactor.focused(), None);
    }
}
