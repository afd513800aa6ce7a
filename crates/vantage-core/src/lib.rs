//! Vantage Core - Core types and capability traits
//!
//! This crate provides the foundational pieces shared by the controller and
//! its backends:
//! - Mathematical primitives (re-exported from glam)
//! - Transform for body positioning
//! - Frame clock supplying the per-frame delta time
//! - The physics and input capability traits the controller consumes

pub mod input;
pub mod query;
pub mod time;
pub mod types;

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use input::{InputAction, InputSampler};
pub use query::{LayerMask, PhysicsQuery, SurfaceTag};
pub use time::{GameTime, TimeConfig};
pub use types::Transform;
