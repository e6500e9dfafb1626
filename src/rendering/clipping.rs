/// Sutherland-Hodgman polygon clipping in homogeneous clip space.
///
/// Each triangle is treated as a polygon and clipped against the six
/// frustum planes in turn. Crossing edges append a freshly interpolated
/// vertex to the scratch vertex list; surviving polygons are re-expressed
/// as a triangle fan. Runs before the perspective divide, where the
/// plane tests are linear in the homogeneous coordinates.
use glam::{Vec3, Vec4};

use super::scratch::ScratchModel;
use crate::count_call;
use crate::perf::PIPELINE_COUNTERS;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClipPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

pub const CLIP_PLANES: [ClipPlane; 6] = [
    ClipPlane::Left,
    ClipPlane::Right,
    ClipPlane::Bottom,
    ClipPlane::Top,
    ClipPlane::Near,
    ClipPlane::Far,
];

impl ClipPlane {
    /// Signed distance of a homogeneous point to this plane. Non-negative
    /// means inside the frustum half-space.
    #[inline]
    pub fn distance(self, v: Vec4) -> f32 {
        match self {
            ClipPlane::Left => v.x + v.w,
            ClipPlane::Right => v.w - v.x,
            ClipPlane::Bottom => v.y + v.w,
            ClipPlane::Top => v.w - v.y,
            ClipPlane::Near => v.z + v.w,
            ClipPlane::Far => v.w - v.z,
        }
    }
}

impl ScratchModel {
    /// Clip every triangle against all six planes, replacing the triangle
    /// and normal lists with the clipped fan triangulation.
    pub fn clip(&mut self) {
        let mut clipped_triangles = Vec::with_capacity(self.triangles.len() * 2);
        let mut clipped_normals = Vec::with_capacity(self.triangles.len() * 2);

        // Reused across triangles to keep the per-triangle allocations out
        // of the inner loop.
        let mut polygon: Vec<usize> = Vec::with_capacity(8);
        let mut polygon_normals: Vec<Vec3> = Vec::with_capacity(8);
        let mut next_polygon: Vec<usize> = Vec::with_capacity(8);
        let mut next_normals: Vec<Vec3> = Vec::with_capacity(8);

        for (triangle, normals) in self.triangles.iter().zip(&self.triangle_normals) {
            polygon.clear();
            polygon.extend_from_slice(triangle);
            polygon_normals.clear();
            polygon_normals.extend_from_slice(normals);

            for plane in CLIP_PLANES {
                if polygon.is_empty() {
                    break;
                }

                next_polygon.clear();
                next_normals.clear();

                for i in 0..polygon.len() {
                    let i0 = polygon[i];
                    let i1 = polygon[(i + 1) % polygon.len()];

                    let n0 = polygon_normals[i];
                    let n1 = polygon_normals[(i + 1) % polygon.len()];

                    let d0 = plane.distance(self.vertices[i0]);
                    let d1 = plane.distance(self.vertices[i1]);

                    // A vertex exactly on the plane counts as inside, so it
                    // is emitted once and no intersection is synthesized.
                    let in0 = d0 >= 0.0;
                    let in1 = d1 >= 0.0;

                    if in0 {
                        next_polygon.push(i0);
                        next_normals.push(n0);
                    }

                    if in0 != in1 {
                        let t = d0 / (d0 - d1);

                        let mixed_vertex = self.vertices[i0].lerp(self.vertices[i1], t);
                        let mixed_normal = n0.lerp(n1, t);

                        self.vertices.push(mixed_vertex);
                        next_polygon.push(self.vertices.len() - 1);
                        next_normals.push(mixed_normal);
                    }
                }

                std::mem::swap(&mut polygon, &mut next_polygon);
                std::mem::swap(&mut polygon_normals, &mut next_normals);
            }

            if polygon.len() < 3 {
                count_call!(PIPELINE_COUNTERS.triangles_clipped_away);
                continue;
            }

            for i in 1..polygon.len() - 1 {
                clipped_triangles.push([polygon[0], polygon[i], polygon[i + 1]]);
                clipped_normals.push([polygon_normals[0], polygon_normals[i], polygon_normals[i + 1]]);
            }
        }

        self.triangles = clipped_triangles;
        self.triangle_normals = clipped_normals;
    }
}
