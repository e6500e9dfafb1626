/// Mesh, material and model data types consumed by the render pipeline.
/// All of these are immutable once constructed; the pipeline works on
/// per-frame scratch copies instead.
use glam::Vec3;

pub mod primitives;

/// An indexed triangle mesh with per-corner normals.
///
/// `triangle_normals` runs parallel to `triangles`: entry `i` holds the
/// three corner normals of triangle `i`. Normals are unit length in
/// model space.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[usize; 3]>,
    pub triangle_normals: Vec<[Vec3; 3]>,
}

impl Mesh {
    pub fn new(
        vertices: Vec<Vec3>,
        triangles: Vec<[usize; 3]>,
        triangle_normals: Vec<[Vec3; 3]>,
    ) -> Self {
        debug_assert_eq!(triangles.len(), triangle_normals.len());
        debug_assert!(triangles
            .iter()
            .all(|t| t.iter().all(|&i| i < vertices.len())));

        Self {
            vertices,
            triangles,
            triangle_normals,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Phong material parameters. Reflection coefficients are per-channel
/// factors in [0, 1]; `shininess` is the specular exponent.
#[derive(Copy, Clone, Debug)]
pub struct Material {
    pub color: Vec3,
    pub shininess: f32,
    pub specular_reflection: Vec3,
    pub diffuse_reflection: Vec3,
    pub ambient_reflection: Vec3,
}

impl Material {
    pub fn new(
        color: Vec3,
        shininess: f32,
        specular_reflection: Vec3,
        diffuse_reflection: Vec3,
        ambient_reflection: Vec3,
    ) -> Self {
        Self {
            color,
            shininess,
            specular_reflection,
            diffuse_reflection,
            ambient_reflection,
        }
    }
}

/// A renderable model: one mesh paired with one material.
#[derive(Clone, Debug)]
pub struct Model {
    pub mesh: Mesh,
    pub material: Material,
}

impl Model {
    pub fn new(mesh: Mesh, material: Material) -> Self {
        Self { mesh, material }
    }
}
