pub mod camera;
pub mod math;
/// Mesh Engine - software rasterization pipeline for triangle meshes
/// Clips, projects and Phong-shades scene instances into a CPU framebuffer
pub mod mesh;
pub mod perf;
pub mod rendering;
pub mod scene;

pub use camera::Camera;
pub use mesh::{Material, Mesh, Model};
pub use perf::{CounterSnapshot, PipelineCounters, PIPELINE_COUNTERS};
pub use rendering::{Framebuffer, Light, RenderSystem, ScratchModel};
pub use scene::{Behavior, Entity, InputState, Scene};
