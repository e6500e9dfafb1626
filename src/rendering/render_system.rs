/// Frame orchestration: accumulates instance submissions, derives the
/// frame matrices from the current camera, and drives every scratch model
/// through the pipeline stages into the framebuffer.
use std::sync::Arc;

use glam::Mat4;

use super::framebuffer::Framebuffer;
use super::rasterizer::rasterize_model;
use super::scratch::ScratchModel;
use super::shading::Light;
use crate::camera::{clip_to_viewport_matrix, Camera};
use crate::count_call;
use crate::mesh::Model;
use crate::perf::PIPELINE_COUNTERS;

/// Background color of a cleared frame.
pub const BACKGROUND_COLOR: u32 = 0xFFFFFFFF;

/// One queued draw: a shared model plus its model-to-scene placement.
/// The `Arc` keeps the model alive for at least the rest of the frame,
/// whatever the submitter does with its own handle.
struct Instance {
    model: Arc<Model>,
    model_to_scene: Mat4,
}

pub struct RenderSystem {
    camera: Camera,
    light: Light,
    instances: Vec<Instance>,
}

impl Default for RenderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSystem {
    pub fn new() -> Self {
        Self {
            camera: Camera::default(),
            light: Light::new(
                glam::Vec3::ZERO,
                glam::Vec3::splat(0.2),
                glam::Vec3::ONE,
                glam::Vec3::splat(0.8),
            ),
            instances: Vec::new(),
        }
    }

    /// Replace the camera used from the next `render_frame` on. The
    /// vertical field of view is clamped by the `Camera` constructor.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Replace the scene-space point light.
    pub fn set_light(&mut self, light: Light) {
        self.light = light;
    }

    /// Queue a model instance for the next frame. Submission order does
    /// not affect the image; the depth buffer resolves overlap.
    pub fn submit_instance(&mut self, model: Arc<Model>, model_to_scene: Mat4) {
        count_call!(PIPELINE_COUNTERS.instances_submitted);
        self.instances.push(Instance {
            model,
            model_to_scene,
        });
    }

    pub fn pending_instances(&self) -> usize {
        self.instances.len()
    }

    /// Render all queued instances into `framebuffer` and drain the
    /// queue. The caller presents the color buffer afterwards.
    pub fn render_frame(&mut self, framebuffer: &mut Framebuffer) {
        count_call!(PIPELINE_COUNTERS.render_frame_calls);

        framebuffer.clear(BACKGROUND_COLOR);

        let scene_to_camera = self.camera.scene_to_camera_matrix();

        let camera_to_clip = self.camera.camera_to_clip_matrix(framebuffer.aspect_ratio());
        let clip_to_camera = camera_to_clip.inverse();

        let clip_to_viewport = clip_to_viewport_matrix(framebuffer.width, framebuffer.height);
        let viewport_to_clip = clip_to_viewport.inverse();

        // Shade with a camera-space copy; the stored light keeps its
        // scene-space position for the next frame.
        let frame_light = self.light.transformed(&scene_to_camera);

        for instance in &self.instances {
            let model = instance.model.as_ref();
            if model.mesh.is_empty() {
                continue;
            }

            let model_to_camera = scene_to_camera * instance.model_to_scene;

            let mut scratch = ScratchModel::from_mesh(&model.mesh);

            scratch.transform(&model_to_camera);
            scratch.project(&camera_to_clip);
            scratch.clip();
            scratch.normalize();
            scratch.viewport(&clip_to_viewport);

            rasterize_model(
                &scratch,
                &model.material,
                &frame_light,
                &clip_to_camera,
                &viewport_to_clip,
                framebuffer,
            );
        }

        self.instances.clear();
    }
}
