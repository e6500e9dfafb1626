/// Camera descriptor and the frame matrices derived from it.
/// The camera pose uses the same YXZ Euler convention as every other
/// transform in the engine.
use glam::{Mat4, Vec3, Vec4};

use crate::math::transform_matrix;

/// Near and far plane distances of the reverse-Z projection.
pub const Z_NEAR: f32 = 0.01;
pub const Z_FAR: f32 = 1000.0;

/// Vertical field-of-view limits in degrees.
pub const MIN_VFOV: f32 = 1.0;
pub const MAX_VFOV: f32 = 90.0;

#[derive(Copy, Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    /// Euler angles in radians: x = pitch, y = yaw, z = roll.
    pub rotation: Vec3,
    /// Vertical field of view in degrees, kept within [MIN_VFOV, MAX_VFOV].
    vfov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            vfov: 30.0,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3, rotation: Vec3, vfov: f32) -> Self {
        Self {
            position,
            rotation,
            vfov: vfov.clamp(MIN_VFOV, MAX_VFOV),
        }
    }

    pub fn vfov(&self) -> f32 {
        self.vfov
    }

    pub fn set_vfov(&mut self, vfov: f32) {
        self.vfov = vfov.clamp(MIN_VFOV, MAX_VFOV);
    }

    /// Scene to camera space: the inverse of the camera's pose transform.
    /// In camera space the camera sits at the origin looking down +Z.
    pub fn scene_to_camera_matrix(&self) -> Mat4 {
        transform_matrix(self.position, self.rotation, Vec3::ONE).inverse()
    }

    /// Camera to clip space, reverse-Z: near maps to z/w = 1, far to 0,
    /// and a point's clip w equals its camera-space z.
    pub fn camera_to_clip_matrix(&self, aspect_ratio: f32) -> Mat4 {
        let half_tan = (self.vfov.to_radians() * 0.5).tan();

        Mat4::from_cols(
            Vec4::new(1.0 / (half_tan * aspect_ratio), 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0 / half_tan, 0.0, 0.0),
            Vec4::new(0.0, 0.0, Z_NEAR / (Z_NEAR - Z_FAR), 1.0),
            Vec4::new(0.0, 0.0, (Z_NEAR * Z_FAR) / (Z_FAR - Z_NEAR), 0.0),
        )
    }
}

/// Clip space to pixel coordinates: x scaled to [0, w], y flipped so the
/// screen grows downward, z passed through untouched.
pub fn clip_to_viewport_matrix(width: usize, height: usize) -> Mat4 {
    let w = width as f32;
    let h = height as f32;

    Mat4::from_cols(
        Vec4::new(w / 2.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, -h / 2.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(w / 2.0, h / 2.0, 0.0, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vfov_is_clamped_at_construction_and_update() {
        let mut camera = Camera::new(Vec3::ZERO, Vec3::ZERO, 120.0);
        assert_eq!(camera.vfov(), MAX_VFOV);

        camera.set_vfov(0.25);
        assert_eq!(camera.vfov(), MIN_VFOV);
    }

    #[test]
    fn projection_maps_near_to_one_and_far_to_zero() {
        let camera = Camera::new(Vec3::ZERO, Vec3::ZERO, 60.0);
        let clip = camera.camera_to_clip_matrix(1.0);

        let near = clip * Vec4::new(0.0, 0.0, Z_NEAR, 1.0);
        let far = clip * Vec4::new(0.0, 0.0, Z_FAR, 1.0);

        assert!((near.z / near.w - 1.0).abs() < 1e-4);
        assert!((far.z / far.w).abs() < 1e-4);
    }

    #[test]
    fn clip_w_equals_camera_space_z() {
        let camera = Camera::new(Vec3::ZERO, Vec3::ZERO, 45.0);
        let clip = camera.camera_to_clip_matrix(16.0 / 9.0);

        let p = clip * Vec4::new(0.3, -0.2, 7.5, 1.0);
        assert!((p.w - 7.5).abs() < 1e-5);
    }

    #[test]
    fn viewport_centers_ndc_origin() {
        let viewport = clip_to_viewport_matrix(640, 480);
        let center = viewport * Vec4::new(0.0, 0.0, 0.5, 1.0);

        assert!((center.x - 320.0).abs() < 1e-5);
        assert!((center.y - 240.0).abs() < 1e-5);
        assert!((center.z - 0.5).abs() < 1e-5);
    }
}
