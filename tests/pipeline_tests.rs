/// Integration tests that exercise the full rendering pipeline through
/// the public RenderSystem API: submit instances, render one frame,
/// inspect the resulting color surface and depth buffer.
use std::sync::Arc;

use glam::{Mat4, Vec3, Vec4};
use mesh_engine::camera::{Z_FAR, Z_NEAR};
use mesh_engine::rendering::rasterizer::rasterize_model;
use mesh_engine::rendering::BACKGROUND_COLOR;
use mesh_engine::*;

const WIDTH: usize = 640;
const HEIGHT: usize = 480;

/// A one-triangle model with all corner normals facing the camera
/// (camera space looks down +Z, so -Z faces the viewer).
fn triangle_model(v0: Vec3, v1: Vec3, v2: Vec3, color: Vec3) -> Arc<Model> {
    let mesh = Mesh::new(
        vec![v0, v1, v2],
        vec![[0, 1, 2]],
        vec![[Vec3::NEG_Z; 3]],
    );
    let material = Material::new(color, 10.0, Vec3::ONE, Vec3::ONE, Vec3::ONE);
    Arc::new(Model::new(mesh, material))
}

fn white_light_at_origin() -> Light {
    Light::new(Vec3::ZERO, Vec3::splat(0.2), Vec3::ONE, Vec3::splat(0.8))
}

fn origin_camera(vfov: f32) -> Camera {
    Camera::new(Vec3::ZERO, Vec3::ZERO, vfov)
}

fn red_channel(pixel: u32) -> u32 {
    (pixel >> 16) & 0xFF
}

fn green_channel(pixel: u32) -> u32 {
    (pixel >> 8) & 0xFF
}

fn drawn_pixels(framebuffer: &Framebuffer) -> usize {
    framebuffer
        .color_buffer
        .iter()
        .filter(|&&c| c != BACKGROUND_COLOR)
        .count()
}

#[test]
fn empty_scene_clears_surface_and_depth() {
    let mut system = RenderSystem::new();
    system.set_camera(origin_camera(30.0));

    let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);
    system.render_frame(&mut framebuffer);

    assert!(
        framebuffer
            .color_buffer
            .iter()
            .all(|&c| c == BACKGROUND_COLOR),
        "an empty frame must be a cleared surface"
    );
    assert!(framebuffer
        .depth_buffer
        .iter()
        .all(|&d| d == f32::NEG_INFINITY));
}

#[test]
fn single_triangle_renders_red_with_expected_depth() {
    let mut system = RenderSystem::new();
    system.set_camera(origin_camera(60.0));
    system.set_light(white_light_at_origin());

    system.submit_instance(
        triangle_model(
            Vec3::new(-1.0, -1.0, 2.0),
            Vec3::new(1.0, -1.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
            Vec3::new(1.0, 0.0, 0.0),
        ),
        Mat4::IDENTITY,
    );

    let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);
    system.render_frame(&mut framebuffer);

    // The triangle straddles the screen center; the corner stays empty.
    let center = framebuffer.color_at(WIDTH / 2, HEIGHT / 2);
    assert_ne!(center, BACKGROUND_COLOR, "center pixel must be covered");
    assert!(red_channel(center) > 0, "material color is pure red");
    assert_eq!(green_channel(center), 0);

    assert_eq!(framebuffer.color_at(0, 0), BACKGROUND_COLOR);
    assert_eq!(framebuffer.depth_at(0, 0), f32::NEG_INFINITY);

    // Every vertex sits at camera-space z = 2, so the stored reverse-Z
    // value is the perspective-correct clip z at that distance.
    let expected_depth = 2.0 * Z_NEAR / (Z_NEAR - Z_FAR) + (Z_NEAR * Z_FAR) / (Z_FAR - Z_NEAR);
    let center_depth = framebuffer.depth_at(WIDTH / 2, HEIGHT / 2);
    assert!(
        (center_depth - expected_depth).abs() < 1e-5,
        "expected depth {expected_depth}, stored {center_depth}"
    );
}

#[test]
fn closer_triangle_wins_regardless_of_submission_order() {
    // Same screen coverage: the nearer triangle is half the size, the
    // perspective divide brings them to identical NDC extents.
    let red_far = (
        Vec3::new(-1.0, -1.0, 2.0),
        Vec3::new(1.0, -1.0, 2.0),
        Vec3::new(0.0, 1.0, 2.0),
    );
    let green_near = (
        Vec3::new(-0.5, -0.5, 1.0),
        Vec3::new(0.5, -0.5, 1.0),
        Vec3::new(0.0, 0.5, 1.0),
    );

    for far_first in [true, false] {
        let mut system = RenderSystem::new();
        system.set_camera(origin_camera(60.0));
        system.set_light(white_light_at_origin());

        let red = triangle_model(red_far.0, red_far.1, red_far.2, Vec3::new(1.0, 0.0, 0.0));
        let green = triangle_model(
            green_near.0,
            green_near.1,
            green_near.2,
            Vec3::new(0.0, 1.0, 0.0),
        );

        if far_first {
            system.submit_instance(red, Mat4::IDENTITY);
            system.submit_instance(green, Mat4::IDENTITY);
        } else {
            system.submit_instance(green, Mat4::IDENTITY);
            system.submit_instance(red, Mat4::IDENTITY);
        }

        let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);
        system.render_frame(&mut framebuffer);

        let center = framebuffer.color_at(WIDTH / 2, HEIGHT / 2);
        assert!(
            green_channel(center) > 0 && red_channel(center) == 0,
            "covered pixels must come from the nearer green triangle (far_first={far_first})"
        );
    }
}

#[test]
fn clockwise_triangle_is_culled() {
    let mut system = RenderSystem::new();
    system.set_camera(origin_camera(60.0));
    system.set_light(white_light_at_origin());

    // Same triangle as the red scenario with two corners swapped, which
    // reverses the screen-space winding.
    system.submit_instance(
        triangle_model(
            Vec3::new(-1.0, -1.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
            Vec3::new(1.0, -1.0, 2.0),
            Vec3::new(1.0, 0.0, 0.0),
        ),
        Mat4::IDENTITY,
    );

    let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);
    system.render_frame(&mut framebuffer);

    assert_eq!(drawn_pixels(&framebuffer), 0, "back face must write nothing");
}

#[test]
fn near_plane_crossing_triangle_still_renders() {
    let mut system = RenderSystem::new();
    system.set_camera(origin_camera(60.0));
    system.set_light(white_light_at_origin());

    // One corner behind the near plane; the clipped remainder is in front.
    system.submit_instance(
        triangle_model(
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, -0.5),
            Vec3::new(1.0, 0.0, 0.0),
        ),
        Mat4::IDENTITY,
    );

    let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);
    system.render_frame(&mut framebuffer);

    assert!(
        drawn_pixels(&framebuffer) > 0,
        "the in-front part of the triangle must rasterize"
    );
}

#[test]
fn instance_transform_places_the_model() {
    let mut system = RenderSystem::new();
    system.set_camera(origin_camera(60.0));
    system.set_light(white_light_at_origin());

    // Small triangle pushed to the left half of the screen.
    system.submit_instance(
        triangle_model(
            Vec3::new(-0.2, -0.2, 0.0),
            Vec3::new(0.2, -0.2, 0.0),
            Vec3::new(0.0, 0.2, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ),
        Mat4::from_translation(Vec3::new(-1.0, 0.0, 2.0)),
    );

    let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);
    system.render_frame(&mut framebuffer);

    let left_half: usize = (0..HEIGHT)
        .flat_map(|y| (0..WIDTH / 2).map(move |x| (x, y)))
        .filter(|&(x, y)| framebuffer.color_at(x, y) != BACKGROUND_COLOR)
        .count();
    let right_half = drawn_pixels(&framebuffer) - left_half;

    assert!(left_half > 0, "translated triangle must land on the left");
    assert_eq!(right_half, 0, "nothing may leak to the right half");
}

#[test]
fn screen_edge_triangle_samples_pixel_centers_only() {
    // Post-viewport triangle built directly: left edge at x = 0, right
    // corner exactly at x = 320. Pixel centers at x = 320.5 are outside
    // the coverage and must stay untouched.
    let scratch = ScratchModel {
        vertices: vec![
            Vec4::new(0.0, 0.0, 0.5, 1.0),
            Vec4::new(0.0, 480.0, 0.5, 1.0),
            Vec4::new(320.0, 240.0, 0.5, 1.0),
        ],
        triangles: vec![[0, 1, 2]],
        triangle_normals: vec![[Vec3::NEG_Z; 3]],
    };

    // Red material so covered pixels can never collide with the white
    // background.
    let material = Material::new(Vec3::new(1.0, 0.0, 0.0), 10.0, Vec3::ONE, Vec3::ONE, Vec3::ONE);
    let light = white_light_at_origin();
    let camera = origin_camera(60.0);
    let clip_to_camera = camera
        .camera_to_clip_matrix(WIDTH as f32 / HEIGHT as f32)
        .inverse();
    let viewport_to_clip = mesh_engine::camera::clip_to_viewport_matrix(WIDTH, HEIGHT).inverse();

    let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);
    framebuffer.clear(BACKGROUND_COLOR);

    rasterize_model(
        &scratch,
        &material,
        &light,
        &clip_to_camera,
        &viewport_to_clip,
        &mut framebuffer,
    );

    assert_ne!(
        framebuffer.color_at(1, HEIGHT / 2),
        BACKGROUND_COLOR,
        "interior pixels must be covered"
    );
    for y in 0..HEIGHT {
        assert_eq!(
            framebuffer.color_at(320, y),
            BACKGROUND_COLOR,
            "column 320 centers lie outside the triangle (row {y})"
        );
    }
}
