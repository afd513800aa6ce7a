//! Physics capability consumed by the controller
//!
//! Collision resolution, capsule sweeping and ray intersection belong to
//! whichever physics backend the game runs on. The controller only sees this
//! narrow surface.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Bit mask selecting which collision layers a query considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches every layer
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    /// Matches nothing
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask containing a single layer (0-31)
    pub const fn layer(index: u32) -> Self {
        Self(1 << (index & 31))
    }

    /// Add a layer to the mask
    pub const fn with(self, index: u32) -> Self {
        Self(self.0 | (1 << (index & 31)))
    }

    /// Whether any layer of `other` is in this mask
    pub fn intersects(&self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Raw bits
    pub fn bits(&self) -> u32 {
        self.0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// What a collider was tagged as when it was placed in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SurfaceTag {
    /// Plain geometry
    #[default]
    Untagged,
    /// Something that can be picked up
    Item,
    /// A door
    Door,
}

impl SurfaceTag {
    /// Encode into collider user data
    pub fn to_bits(self) -> u128 {
        match self {
            SurfaceTag::Untagged => 0,
            SurfaceTag::Item => 1,
            SurfaceTag::Door => 2,
        }
    }

    /// Decode from collider user data, unknown values are untagged
    pub fn from_bits(bits: u128) -> Self {
        match bits {
            1 => SurfaceTag::Item,
            2 => SurfaceTag::Door,
            _ => SurfaceTag::Untagged,
        }
    }
}

/// World queries and the capsule mover the controller drives
///
/// Positions are the bottom of the capsule (the feet). The capsule center is
/// an offset from that point.
pub trait PhysicsQuery {
    /// Whether a sphere at `origin` overlaps any collider on `mask`
    fn probe_ground(&self, origin: Vec3, radius: f32, mask: LayerMask) -> bool;

    /// Whether a ray hits anything within `max_distance`
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool;

    /// Tag of the first collider a ray hits within `max_distance`
    fn pick(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<SurfaceTag>;

    /// Sweep the capsule by `displacement`, returning the displacement actually applied
    fn move_capsule(&mut self, displacement: Vec3) -> Vec3;

    /// Steepest walkable slope in degrees
    fn set_slope_limit(&mut self, degrees: f32);

    /// Resize the capsule
    fn set_capsule_height(&mut self, height: f32);

    /// Offset of the capsule center from the feet
    fn set_capsule_center(&mut self, center: Vec3);

    /// Current capsule height
    fn capsule_height(&self) -> f32;

    /// Capsule radius
    fn capsule_radius(&self) -> f32;

    /// Current feet position
    fn position(&self) -> Vec3;

    /// Move the capsule without sweeping
    fn set_position(&mut self, position: Vec3);
}
