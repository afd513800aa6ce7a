//! Input capability consumed by the controller
//!
//! The controller never talks to a device. Whatever owns the frame loop
//! supplies an [`InputSampler`] that answers axis and action queries for the
//! current frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Jump (Space by default)
    Jump,
    /// Sprint modifier (Shift by default)
    Sprint,
    /// Crouch while held (Left Ctrl by default)
    Crouch,
    /// Interact with the focused object (E by default)
    Interact,
    /// Pause/unpause (Escape by default)
    Pause,
}

/// Per-frame view of the player's input devices
pub trait InputSampler {
    /// Raw look delta for this frame in screen space (+x right, +y down)
    fn look_axis(&self) -> Vec2;

    /// Strafe (x) and forward (y) axis, each in [-1, 1]
    fn move_axis(&self) -> Vec2;

    /// Whether an action is currently held
    fn is_held(&self, action: InputAction) -> bool;

    /// Whether an action went down this frame
    fn is_just_pressed(&self, action: InputAction) -> bool;
}
