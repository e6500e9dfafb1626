/// Bounding-box triangle rasterization with pixel-center barycentrics,
/// back-face culling and a reverse-Z depth test. Fragments are shaded in
/// camera space by un-projecting through the viewport and clip inverses.
use glam::{Mat4, Vec2, Vec3, Vec4};

use super::framebuffer::Framebuffer;
use super::scratch::ScratchModel;
use super::shading::{encode_srgb, phong_illumination, Light};
use crate::count_call;
use crate::mesh::Material;
use crate::perf::PIPELINE_COUNTERS;

/// Screen-space bounds of a triangle, clamped to the render target.
#[derive(Copy, Clone, Debug)]
struct BoundingBox {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

fn bounding_box(v0: Vec4, v1: Vec4, v2: Vec4, width: usize, height: usize) -> BoundingBox {
    let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
    let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
    let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
    let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

    BoundingBox {
        min_x: min_x.clamp(0, width as i32),
        min_y: min_y.clamp(0, height as i32),
        max_x: max_x.clamp(0, width as i32),
        max_y: max_y.clamp(0, height as i32),
    }
}

#[inline]
fn edge_function(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// 2D barycentric coordinates of `point` in triangle (a, b, c).
/// Any point outside the triangle comes back as NaN; a degenerate
/// triangle divides by zero area and poisons the result the same way.
/// The depth test downstream rejects NaN, which is what actually drops
/// these fragments.
fn barycentric(a: Vec2, b: Vec2, c: Vec2, point: Vec2) -> Vec3 {
    let area = edge_function(a, b, c);

    let alpha = edge_function(point, b, c) / area;
    let beta = edge_function(a, point, c) / area;
    let gamma = edge_function(a, b, point) / area;

    if alpha < 0.0 || beta < 0.0 || gamma < 0.0 {
        return Vec3::NAN;
    }

    Vec3::new(alpha, beta, gamma)
}

#[inline]
fn interpolate(a: f32, b: f32, c: f32, lambda: Vec3) -> f32 {
    a * lambda.x + b * lambda.y + c * lambda.z
}

/// Reverse-Z depth at a covered pixel: the barycentric z sum divided by
/// the barycentric 1/w sum (vertices carry 1/w in their w slot).
fn fragment_depth(v0: Vec4, v1: Vec4, v2: Vec4, lambda: Vec3) -> f32 {
    let inv_w = interpolate(v0.w, v1.w, v2.w, lambda);
    interpolate(v0.z, v1.z, v2.z, lambda) / inv_w
}

/// Screen-space winding test. After the viewport y-flip a clockwise
/// triangle faces away from the camera.
fn is_back_face(v0: Vec4, v1: Vec4, v2: Vec4) -> bool {
    let e01 = v1.truncate().truncate() - v0.truncate().truncate();
    let e02 = v2.truncate().truncate() - v0.truncate().truncate();
    e01.x * e02.y - e01.y * e02.x > 0.0
}

/// Camera-space position of a fragment, recovered by interpolating the
/// viewport-space vertices and running the result backwards through the
/// viewport and projection matrices.
fn fragment_position(
    v0: Vec4,
    v1: Vec4,
    v2: Vec4,
    lambda: Vec3,
    viewport_to_clip: &Mat4,
    clip_to_camera: &Mat4,
) -> Vec3 {
    let viewport_position = v0 * lambda.x + v1 * lambda.y + v2 * lambda.z;

    let normalized = *viewport_to_clip * viewport_position.truncate().extend(1.0);
    let clip_position = normalized / viewport_position.w;

    (*clip_to_camera * clip_position).truncate()
}

/// Rasterize every triangle of a post-viewport scratch model into the
/// framebuffer. `light` must already be in camera space.
pub fn rasterize_model(
    scratch: &ScratchModel,
    material: &Material,
    light: &Light,
    clip_to_camera: &Mat4,
    viewport_to_clip: &Mat4,
    framebuffer: &mut Framebuffer,
) {
    let vertices = &scratch.vertices;
    let width = framebuffer.width;
    let height = framebuffer.height;

    for (triangle, normals) in scratch.triangles.iter().zip(&scratch.triangle_normals) {
        count_call!(PIPELINE_COUNTERS.triangles_processed);

        let v0 = vertices[triangle[0]];
        let v1 = vertices[triangle[1]];
        let v2 = vertices[triangle[2]];

        if is_back_face(v0, v1, v2) {
            count_call!(PIPELINE_COUNTERS.triangles_culled);
            continue;
        }

        let bbox = bounding_box(v0, v1, v2, width, height);

        for y in bbox.min_y..=bbox.max_y {
            if y < 0 || y >= height as i32 {
                continue;
            }

            for x in bbox.min_x..=bbox.max_x {
                if x < 0 || x >= width as i32 {
                    continue;
                }

                count_call!(PIPELINE_COUNTERS.pixels_tested);

                let lambda = barycentric(
                    v0.truncate().truncate(),
                    v1.truncate().truncate(),
                    v2.truncate().truncate(),
                    Vec2::new(x as f32 + 0.5, y as f32 + 0.5),
                );

                let depth = fragment_depth(v0, v1, v2, lambda);

                // The NaN check also drops pixels outside the triangle and
                // fragments of degenerate triangles, not just depth losers.
                let index = y as usize * width + x as usize;
                if depth.is_nan() || depth <= framebuffer.depth_buffer[index] {
                    count_call!(PIPELINE_COUNTERS.depth_test_failed);
                    continue;
                }

                let inv_w = interpolate(v0.w, v1.w, v2.w, lambda);
                let normal = ((normals[0] * lambda.x + normals[1] * lambda.y + normals[2] * lambda.z)
                    / inv_w)
                    .normalize();

                let position =
                    fragment_position(v0, v1, v2, lambda, viewport_to_clip, clip_to_camera);

                let illumination = phong_illumination(position, normal, material, light);
                let pixel = encode_srgb(material.color * illumination);

                framebuffer.color_buffer[index] = pixel;
                framebuffer.depth_buffer[index] = depth;
                count_call!(PIPELINE_COUNTERS.depth_test_passed);
            }
        }
    }
}
