//! Test doubles for the physics and input capabilities

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use glam::{Vec2, Vec3};
use vantage_core::{InputAction, InputSampler, LayerMask, PhysicsQuery, SurfaceTag};

/// Physics stand-in: moves are applied verbatim, probes answer from flags
pub(crate) struct MockPhysics {
    pub position: Vec3,
    pub height: f32,
    pub radius: f32,
    pub center: Vec3,
    pub slope_limit: f32,
    /// Answer for ground probes
    pub ground: bool,
    /// Answer for upward ray casts
    pub ceiling: bool,
    /// Tag and distance of whatever a horizontal ray would hit
    pub target: Option<(SurfaceTag, f32)>,
    pub moves: Vec<Vec3>,
    pub ground_probes: Cell<usize>,
    /// Origin and length of every upward ray cast
    pub ceiling_rays: RefCell<Vec<(Vec3, f32)>>,
}

impl MockPhysics {
    pub fn new(height: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            height,
            radius: 0.4,
            center: Vec3::new(0.0, height / 2.0, 0.0),
            slope_limit: 45.0,
            ground: false,
            ceiling: false,
            target: None,
            moves: Vec::new(),
            ground_probes: Cell::new(0),
            ceiling_rays: RefCell::new(Vec::new()),
        }
    }

    pub fn grounded(height: f32) -> Self {
        Self {
            ground: true,
            ..Self::new(height)
        }
    }
}

impl PhysicsQuery for MockPhysics {
    fn probe_ground(&self, _origin: Vec3, _radius: f32, _mask: LayerMask) -> bool {
        self.ground_probes.set(self.ground_probes.get() + 1);
        self.ground
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        if direction.y > 0.0 {
            self.ceiling_rays.borrow_mut().push((origin, max_distance));
            self.ceiling && max_distance > 0.0
        } else {
            matches!(self.target, Some((_, distance)) if distance <= max_distance)
        }
    }

    fn pick(&self, _origin: Vec3, _direction: Vec3, max_distance: f32) -> Option<SurfaceTag> {
        match self.target {
            Some((tag, distance)) if distance <= max_distance => Some(tag),
            _ => None,
        }
    }

    fn move_capsule(&mut self, displacement: Vec3) -> Vec3 {
        self.moves.push(displacement);
        self.position += displacement;
        displacement
    }

    fn set_slope_limit(&mut self, degrees: f32) {
        self.slope_limit = degrees;
    }

    fn set_capsule_height(&mut self, height: f32) {
        self.height = height;
    }

    fn set_capsule_center(&mut self, center: Vec3) {
        self.center = center;
    }

    fn capsule_height(&self) -> f32 {
        self.height
    }

    fn capsule_radius(&self) -> f32 {
        self.radius
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

/// Input stand-in with analog axes
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedInput {
    pub look: Vec2,
    pub movement: Vec2,
    pub held: HashSet<InputAction>,
    pub pressed: HashSet<InputAction>,
}

impl ScriptedInput {
    pub fn moving(movement: Vec2) -> Self {
        Self {
            movement,
            ..Default::default()
        }
    }

    pub fn looking(look: Vec2) -> Self {
        Self {
            look,
            ..Default::default()
        }
    }

    pub fn hold(mut self, action: InputAction) -> Self {
        self.held.insert(action);
        self
    }

    pub fn press(mut self, action: InputAction) -> Self {
        self.pressed.insert(action);
        self.held.insert(action);
        self
    }
}

impl InputSampler for ScriptedInput {
    fn look_axis(&self) -> Vec2 {
        self.look
    }

    fn move_axis(&self) -> Vec2 {
        self.movement
    }

    fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    fn is_just_pressed(&self, action: InputAction) -> bool {
        self.pressed.contains(&action)
    }
}
