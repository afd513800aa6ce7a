//! Pitch pivot and field of view driven by the movement controller

use glam::{Mat4, Quat, Vec3};

/// First-person camera state
///
/// Holds no logic of its own. The movement controller writes pitch, FOV and
/// eye offset every frame; renderers only read.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    /// Field of view in degrees
    fov: f32,
    /// Pitch in radians (positive looks up)
    pitch: f32,
    /// Eye position relative to the feet
    eye_offset: Vec3,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl CameraRig {
    /// Create a rig with the given FOV and eye offset
    pub fn new(fov: f32, eye_offset: Vec3) -> Self {
        Self {
            fov,
            pitch: 0.0,
            eye_offset,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Field of view in degrees
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Pitch in radians
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Eye offset from the feet
    pub fn eye_offset(&self) -> Vec3 {
        self.eye_offset
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    pub fn set_eye_offset(&mut self, offset: Vec3) {
        self.eye_offset = offset;
    }

    /// Rotation of the pitch pivot relative to the body
    pub fn local_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch)
    }

    /// World rotation for a body facing `yaw`
    pub fn rotation(&self, yaw: f32) -> Quat {
        Quat::from_rotation_y(-yaw) * self.local_rotation()
    }

    /// View direction for a body facing `yaw`
    pub fn forward(&self, yaw: f32) -> Vec3 {
        self.rotation(yaw) * -Vec3::Z
    }

    /// View matrix for an eye at `eye` on a body facing `yaw`
    pub fn view_matrix(&self, eye: Vec3, yaw: f32) -> Mat4 {
        Mat4::look_to_rh(eye, self.forward(yaw), Vec3::Y)
    }

    /// Projection matrix at the current field of view
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect_ratio, self.near, self.far)
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(70.0, Vec3::new(0.0, 1.75, 0.0))
    }
}
