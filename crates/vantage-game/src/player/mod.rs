//! Player controller module
//!
//! Provides first-person movement with injected physics and input.

mod config;
mod controller;
mod state;

pub use config::MovementConfig;
pub use controller::{FrameMotion, MovementController};
pub use state::{Gait, GroundState, MovementState};
