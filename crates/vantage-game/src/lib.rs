//! Vantage Game - First-person controller logic
//!
//! Provides the movement controller, camera rig, held-object sway, focus
//! detection, and input handling.

pub mod camera;
pub mod error;
pub mod input;
pub mod interaction;
pub mod player;
pub mod sway;

#[cfg(test)]
mod testing;

pub use camera::CameraRig;
pub use error::ConfigError;
pub use input::{InputBinding, InputBindings, InputHandler, InputState};
pub use interaction::{InteractionTarget, Interactor};
pub use player::{FrameMotion, Gait, GroundState, MovementConfig, MovementController, MovementState};
pub use sway::{SwayConfig, SwayController};
pub use vantage_core::InputAction;
