/// Per-instance working copy of a model's geometry.
///
/// The pipeline stages mutate this buffer in place, one instance at a
/// time: vertices become homogeneous clip positions, then NDC with 1/w
/// stashed in the w slot, then pixel coordinates. The vertex list only
/// grows within a frame (clipping appends); the triangle list is
/// replaced wholesale by clipping and stays parallel to the normal list
/// after every stage.
use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::mesh::Mesh;

pub struct ScratchModel {
    pub vertices: Vec<Vec4>,
    pub triangles: Vec<[usize; 3]>,
    pub triangle_normals: Vec<[Vec3; 3]>,
}

impl ScratchModel {
    /// Copy a mesh into working form. Headroom for clip-inserted vertices
    /// is reserved up front so the append loop does not reallocate.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut vertices = Vec::with_capacity(mesh.vertices.len() + mesh.triangles.len() * 6);
        vertices.extend(mesh.vertices.iter().map(|v| v.extend(1.0)));

        Self {
            vertices,
            triangles: mesh.triangles.clone(),
            triangle_normals: mesh.triangle_normals.clone(),
        }
    }

    /// Model space to camera space. Normals use the inverse-transpose of
    /// the upper 3x3 so non-uniform instance scales keep them perpendicular.
    pub fn transform(&mut self, model_to_camera: &Mat4) {
        for vertex in &mut self.vertices {
            *vertex = *model_to_camera * *vertex;
        }

        let normal_matrix = Mat3::from_mat4(*model_to_camera).inverse().transpose();
        for normals in &mut self.triangle_normals {
            for normal in normals {
                *normal = normal_matrix * *normal;
            }
        }
    }

    /// Camera space to homogeneous clip space. No divide here: clipping
    /// has to run before w is consumed.
    pub fn project(&mut self, camera_to_clip: &Mat4) {
        for vertex in &mut self.vertices {
            *vertex = *camera_to_clip * *vertex;
        }
    }

    /// Perspective divide. Afterwards xyz hold NDC and the w slot holds
    /// 1/w (1 over camera-space z). Corner normals are pre-scaled by
    /// their vertex's 1/w so that plain barycentric sums over them are
    /// already perspective-correct.
    pub fn normalize(&mut self) {
        for vertex in &mut self.vertices {
            let inv_w = 1.0 / vertex.w;
            *vertex *= inv_w;
            vertex.w = inv_w;
        }

        for (triangle, normals) in self.triangles.iter().zip(&mut self.triangle_normals) {
            for (corner, normal) in triangle.iter().zip(normals.iter_mut()) {
                *normal *= self.vertices[*corner].w;
            }
        }
    }

    /// NDC to pixel coordinates. The multiply runs with w forced to 1 and
    /// the stored 1/w is restored afterwards; z passes through as the
    /// reverse-Z depth.
    pub fn viewport(&mut self, clip_to_viewport: &Mat4) {
        for vertex in &mut self.vertices {
            let inv_w = vertex.w;
            *vertex = *clip_to_viewport * vertex.truncate().extend(1.0);
            vertex.w = inv_w;
        }
    }
}
