/// Phong illumination and output encoding.
/// Kept separate from the rasterizer so the lighting model can evolve
/// independently of the scan loop.
use glam::{Mat4, Vec3};

use super::framebuffer::rgb_to_u32;
use crate::mesh::Material;

/// A point light with per-channel intensity triples.
///
/// The position is in scene space when the light is handed to the render
/// system; `render_frame` shades with a camera-space copy and never
/// writes the transformed position back.
#[derive(Copy, Clone, Debug)]
pub struct Light {
    pub position: Vec3,
    pub ambient_intensity: Vec3,
    pub specular_intensity: Vec3,
    pub diffuse_intensity: Vec3,
}

impl Light {
    pub fn new(
        position: Vec3,
        ambient_intensity: Vec3,
        specular_intensity: Vec3,
        diffuse_intensity: Vec3,
    ) -> Self {
        Self {
            position,
            ambient_intensity,
            specular_intensity,
            diffuse_intensity,
        }
    }

    /// The same light with its position carried through `transform`.
    /// Returns a copy so a light can be re-used across frames.
    pub fn transformed(&self, transform: &Mat4) -> Self {
        Self {
            position: transform.transform_point3(self.position),
            ..*self
        }
    }
}

/// Phong illumination at a camera-space fragment.
///
/// `position` and `normal` are in camera space, so the viewer sits at
/// the origin. The light must already be in camera space as well.
/// Returns the per-channel illumination factor; callers multiply by the
/// material color.
pub fn phong_illumination(
    position: Vec3,
    normal: Vec3,
    material: &Material,
    light: &Light,
) -> Vec3 {
    let l = (light.position - position).normalize();
    let r = (2.0 * l.dot(normal) * normal - l).normalize();
    let v = (-position).normalize();

    let ambient = material.ambient_reflection * light.ambient_intensity;
    let diffuse = material.diffuse_reflection * l.dot(normal).max(0.0) * light.diffuse_intensity;
    let specular = material.specular_reflection
        * r.dot(v).max(0.0).powf(material.shininess)
        * light.specular_intensity;

    ambient + diffuse + specular
}

/// Gamma-encode a linear color and pack it for the color surface.
/// Channels are clamped to [0, 1] before the 1/2.2 power.
#[inline]
pub fn encode_srgb(linear: Vec3) -> u32 {
    let encoded = linear.clamp(Vec3::ZERO, Vec3::ONE).powf(1.0 / 2.2);

    rgb_to_u32(
        (encoded.x * 255.0).round() as u8,
        (encoded.y * 255.0).round() as u8,
        (encoded.z * 255.0).round() as u8,
    )
}
