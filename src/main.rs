/// Demo application: a window with two Phong-shaded icospheres, a
/// free-look camera and a movable point light, rendered entirely on the
/// CPU and presented through softbuffer.
use glam::Vec3;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use mesh_engine::mesh::primitives;
use mesh_engine::*;
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

const TARGET_FRAME_TIME: Duration = Duration::from_micros(1_000_000 / 60);

fn main() {
    println!("=== Mesh Engine - Software Phong Rasterizer ===");
    println!("Controls:");
    println!("  WASD - Move camera, Space/Ctrl - Up/Down");
    println!("  Arrows - Pitch/Yaw, Q/E - Roll, Shift - Boost");
    println!("  -/= - Widen/narrow field of view");
    println!("  Numpad 4/6 - Move light");
    println!("  ESC - Exit");
    println!();

    let event_loop = EventLoop::new().unwrap();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Mesh Engine")
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 768))
            .build(&event_loop)
            .unwrap(),
    );

    let context = softbuffer::Context::new(window.clone()).unwrap();
    let mut surface = softbuffer::Surface::new(&context, window.clone()).unwrap();

    let window_size = window.inner_size();
    let mut framebuffer =
        Framebuffer::new(window_size.width as usize, window_size.height as usize);

    let mut render_system = RenderSystem::new();
    let mut scene = build_scene();
    let mut input = InputState::default();

    let mut last_frame = Instant::now();
    let mut frame_count = 0u32;
    let mut fps_timer = Instant::now();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        elwt.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if new_size.width > 0 && new_size.height > 0 {
                            framebuffer
                                .resize(new_size.width as usize, new_size.height as usize);
                        }
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        let pressed = event.state == ElementState::Pressed;

                        if let PhysicalKey::Code(keycode) = event.physical_key {
                            match keycode {
                                KeyCode::KeyW => input.forward_pressed = pressed,
                                KeyCode::KeyS => input.backward_pressed = pressed,
                                KeyCode::KeyA => input.left_pressed = pressed,
                                KeyCode::KeyD => input.right_pressed = pressed,
                                KeyCode::Space => input.up_pressed = pressed,
                                KeyCode::ControlLeft => input.down_pressed = pressed,
                                KeyCode::ArrowUp => input.pitch_up_pressed = pressed,
                                KeyCode::ArrowDown => input.pitch_down_pressed = pressed,
                                KeyCode::ArrowLeft => input.yaw_left_pressed = pressed,
                                KeyCode::ArrowRight => input.yaw_right_pressed = pressed,
                                KeyCode::KeyQ => input.roll_left_pressed = pressed,
                                KeyCode::KeyE => input.roll_right_pressed = pressed,
                                KeyCode::ShiftLeft => input.boost_pressed = pressed,
                                KeyCode::Minus => input.widen_fov_pressed = pressed,
                                KeyCode::Equal => input.narrow_fov_pressed = pressed,
                                KeyCode::Numpad4 => input.light_left_pressed = pressed,
                                KeyCode::Numpad6 => input.light_right_pressed = pressed,
                                KeyCode::Escape if pressed => {
                                    elwt.exit();
                                }
                                _ => {}
                            }
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let frame_start = Instant::now();
                        let dt = (frame_start - last_frame).as_secs_f32();
                        last_frame = frame_start;

                        scene.update(&input, dt, &mut render_system);
                        render_system.render_frame(&mut framebuffer);

                        // Copy the finished frame to the window
                        surface
                            .resize(
                                NonZeroU32::new(framebuffer.width as u32).unwrap(),
                                NonZeroU32::new(framebuffer.height as u32).unwrap(),
                            )
                            .unwrap();

                        let mut buffer = surface.buffer_mut().unwrap();
                        buffer.copy_from_slice(framebuffer.color_buffer_slice());
                        buffer.present().unwrap();

                        frame_count += 1;
                        if fps_timer.elapsed().as_secs() >= 1 {
                            println!("FPS: {}", frame_count);
                            frame_count = 0;
                            fps_timer = Instant::now();
                        }

                        // Nominal 60 Hz pacing; the pipeline itself never sleeps.
                        let elapsed = frame_start.elapsed();
                        if elapsed < TARGET_FRAME_TIME {
                            std::thread::sleep(TARGET_FRAME_TIME - elapsed);
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .unwrap();
}

fn build_scene() -> Scene {
    let sphere = primitives::icosphere(3);

    let gold = Arc::new(Model::new(sphere.clone(), gold_material()));
    let plastic = Arc::new(Model::new(sphere, plastic_material()));

    let mut scene = Scene::new();

    scene.add_entity(
        Entity::at(Vec3::new(-2.0, 0.0, 0.0))
            .with_behavior(Behavior::MeshInstance { model: gold }),
    );
    scene.add_entity(
        Entity::at(Vec3::new(2.0, 0.0, 0.0))
            .with_behavior(Behavior::MeshInstance { model: plastic }),
    );

    scene.add_entity(Entity::new().with_behavior(Behavior::PointLight {
        ambient_intensity: Vec3::splat(0.2),
        specular_intensity: Vec3::ONE,
        diffuse_intensity: Vec3::splat(0.8),
    }));

    scene.add_entity(
        Entity::at(Vec3::new(0.0, 0.0, -10.0))
            .with_behavior(Behavior::FreeLook)
            .with_behavior(Behavior::CameraRig { vfov: 30.0 }),
    );

    scene
}

fn gold_material() -> Material {
    Material::new(
        Vec3::new(1.0, 0.843, 0.0),
        100.0,
        Vec3::new(0.628, 0.555, 0.366),
        Vec3::new(0.75164, 0.60648, 0.22648),
        Vec3::new(0.24725, 0.1995, 0.0745),
    )
}

fn plastic_material() -> Material {
    Material::new(
        Vec3::new(0.8, 0.1, 0.1),
        10.0,
        Vec3::new(0.5, 0.5, 0.5),
        Vec3::new(0.8, 0.1, 0.1),
        Vec3::new(0.1, 0.01, 0.01),
    )
}
