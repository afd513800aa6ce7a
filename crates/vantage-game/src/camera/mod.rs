//! Camera rig module
//!
//! The first-person eye point: pitch, field of view and its offset from the feet.

mod rig;

pub use rig::CameraRig;
