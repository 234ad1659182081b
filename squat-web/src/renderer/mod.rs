//! Renderer module - WebGPU rendering for the pose and celebration effects
//!
//! Re-exports only. All logic in submodules.

mod state;
mod scene;
mod shapes;

pub use state::{initialize_gpu, GpuStateError, CANVAS_ID};
pub use scene::render_frame;
