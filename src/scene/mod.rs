/// Scene layer feeding the render system: entities carry a pose plus a
/// list of behaviors, and a single update pass per frame walks every
/// entity, applies input-driven behaviors, and pushes camera, light and
/// instance data into the RenderSystem.
use std::sync::Arc;

use glam::Vec3;

use crate::camera::Camera;
use crate::math::{extract_euler_yxz, transform_matrix};
use crate::mesh::Model;
use crate::rendering::{Light, RenderSystem};

/// Movement tuning. Rotation in radians per second, translation in scene
/// units per second, field-of-view in degrees per second.
const ROTATION_SPEED: f32 = 0.5;
const MOVE_SPEED: f32 = 2.5;
const VFOV_SPEED: f32 = 30.0;

/// Key state collected by the host event loop, consumed by behaviors.
#[derive(Default, Copy, Clone, Debug)]
pub struct InputState {
    pub forward_pressed: bool,
    pub backward_pressed: bool,
    pub left_pressed: bool,
    pub right_pressed: bool,
    pub up_pressed: bool,
    pub down_pressed: bool,

    pub pitch_up_pressed: bool,
    pub pitch_down_pressed: bool,
    pub yaw_left_pressed: bool,
    pub yaw_right_pressed: bool,
    pub roll_left_pressed: bool,
    pub roll_right_pressed: bool,

    pub boost_pressed: bool,

    pub widen_fov_pressed: bool,
    pub narrow_fov_pressed: bool,

    pub light_left_pressed: bool,
    pub light_right_pressed: bool,
}

/// What an entity contributes to the frame. One entity may carry several
/// behaviors (the demo camera is a free-look rig plus a camera feed).
pub enum Behavior {
    /// Submit a model instance posed at the entity's transform.
    MeshInstance { model: Arc<Model> },
    /// Feed the entity's pose and a locally-adjusted vertical FOV to the
    /// render system as the active camera.
    CameraRig { vfov: f32 },
    /// Feed the entity's position and fixed intensities as the point
    /// light. Keypad input slides the light along its local X axis.
    PointLight {
        ambient_intensity: Vec3,
        specular_intensity: Vec3,
        diffuse_intensity: Vec3,
    },
    /// Keyboard-driven free flight: arrows pitch and yaw, Q/E roll,
    /// WASD plus Space/Ctrl translate in local space.
    FreeLook,
}

pub struct Entity {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub behaviors: Vec<Behavior>,
}

impl Entity {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            behaviors: Vec::new(),
        }
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Apply a local-space translation/rotation delta to the pose and
    /// re-extract the YXZ Euler angles from the composed transform.
    fn apply_local_delta(&mut self, translation: Vec3, rotation: Vec3) {
        let local_delta = transform_matrix(translation, rotation, Vec3::ONE);
        let local_to_scene = transform_matrix(self.position, self.rotation, Vec3::ONE);
        let composed = local_to_scene * local_delta;

        self.position = composed.transform_point3(Vec3::ZERO);
        self.rotation = extract_euler_yxz(&composed);
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
pub struct Scene {
    pub entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Per-frame update: run every behavior of every entity, pushing the
    /// results into the render system. Behaviors run in entity order; the
    /// frame is rendered afterwards by the host.
    pub fn update(&mut self, input: &InputState, dt: f32, render_system: &mut RenderSystem) {
        for entity in &mut self.entities {
            for i in 0..entity.behaviors.len() {
                match &mut entity.behaviors[i] {
                    Behavior::MeshInstance { model } => {
                        let model_to_scene =
                            transform_matrix(entity.position, entity.rotation, entity.scale);
                        render_system.submit_instance(model.clone(), model_to_scene);
                    }
                    Behavior::CameraRig { vfov } => {
                        if input.widen_fov_pressed {
                            *vfov += VFOV_SPEED * dt;
                        }
                        if input.narrow_fov_pressed {
                            *vfov -= VFOV_SPEED * dt;
                        }

                        let camera = Camera::new(entity.position, entity.rotation, *vfov);
                        // Read back the clamp so held keys do not run the
                        // stored value far past the limits.
                        *vfov = camera.vfov();

                        render_system.set_camera(camera);
                    }
                    Behavior::PointLight {
                        ambient_intensity,
                        specular_intensity,
                        diffuse_intensity,
                    } => {
                        let ambient = *ambient_intensity;
                        let specular = *specular_intensity;
                        let diffuse = *diffuse_intensity;

                        let translation = light_translation_delta(input, dt);
                        if translation != Vec3::ZERO {
                            entity.apply_local_delta(translation, Vec3::ZERO);
                        }

                        render_system.set_light(Light::new(
                            entity.position,
                            ambient,
                            specular,
                            diffuse,
                        ));
                    }
                    Behavior::FreeLook => {
                        let rotation = look_rotation_delta(input, dt);
                        let translation = look_translation_delta(input, dt);
                        entity.apply_local_delta(translation, rotation);
                    }
                }
            }
        }
    }
}

fn look_rotation_delta(input: &InputState, dt: f32) -> Vec3 {
    let step = ROTATION_SPEED * dt;
    let mut rotation = Vec3::ZERO;

    if input.pitch_up_pressed {
        rotation.x -= step;
    }
    if input.pitch_down_pressed {
        rotation.x += step;
    }
    if input.yaw_left_pressed {
        rotation.y -= step;
    }
    if input.yaw_right_pressed {
        rotation.y += step;
    }
    if input.roll_left_pressed {
        rotation.z += step;
    }
    if input.roll_right_pressed {
        rotation.z -= step;
    }

    rotation
}

fn look_translation_delta(input: &InputState, dt: f32) -> Vec3 {
    let mut step = MOVE_SPEED * dt;
    if input.boost_pressed {
        step *= 2.0;
    }

    let mut translation = Vec3::ZERO;

    if input.forward_pressed {
        translation.z += step;
    }
    if input.backward_pressed {
        translation.z -= step;
    }
    if input.left_pressed {
        translation.x -= step;
    }
    if input.right_pressed {
        translation.x += step;
    }
    if input.up_pressed {
        translation.y += step;
    }
    if input.down_pressed {
        translation.y -= step;
    }

    translation
}

fn light_translation_delta(input: &InputState, dt: f32) -> Vec3 {
    let mut step = MOVE_SPEED * dt;
    if input.boost_pressed {
        step *= 2.0;
    }

    let mut translation = Vec3::ZERO;

    if input.light_left_pressed {
        translation.x -= step;
    }
    if input.light_right_pressed {
        translation.x += step;
    }

    translation
}
