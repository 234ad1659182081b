//! Squat Web - WebGPU Squat Trainer
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules
//!
//! The page runs MediaPipe Pose, pushes landmarks through `update_landmarks`
//! (or `clear_landmarks` when no body is found), calls `step_session` once
//! per video frame and then `render_frame`.

use wasm_bindgen::prelude::*;

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub(crate) fn log(s: &str);
}

#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => ($crate::log(&format_args!($($t)*).to_string()))
}

pub mod bridge;
pub mod config;
pub mod effects;
pub mod error;
pub mod trainer;

#[cfg(target_arch = "wasm32")]
mod renderer;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{update_landmarks, clear_landmarks, step_session};
pub use config::TrainerConfig;
pub use error::{Result, TrainerError};
pub use trainer::{FrameReport, SquatSession};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize WebGPU - must be called before render_frame.
/// The canvas takes the session's configured frame size.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn init() -> std::result::Result<(), JsValue> {
    let (width, height) = bridge::with_session(|session| session.config().frame_extent());
    renderer::initialize_gpu((width, height)).await?;
    console_log!("✅ WebGPU initialized on #{} ({}x{})", renderer::CANVAS_ID, width, height);
    Ok(())
}

/// Render one frame with current landmarks and trainer state
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn render_frame() {
    renderer::render_frame();
}
