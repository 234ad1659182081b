//! Session bridge - drives the squat session from the JS frame loop
//!
//! JS calls `update_landmarks`/`clear_landmarks`, then `step_session` once
//! per video frame, then reads the getters below to update the HTML overlay.

use wasm_bindgen::prelude::*;
use std::cell::RefCell;

use crate::config::TrainerConfig;
use crate::trainer::{FrameReport, SquatSession};

/// Session plus the report of the last processed frame
#[derive(Default)]
struct SessionStore {
    session: SquatSession,
    last_report: Option<FrameReport>,
}

thread_local! {
    static SESSION: RefCell<SessionStore> = RefCell::new(SessionStore::default());
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Start a fresh session with the current configuration
#[wasm_bindgen]
pub fn start_session() {
    SESSION.with(|cell| {
        let mut store = cell.borrow_mut();
        let config = store.session.config().clone();
        *store = SessionStore {
            session: SquatSession::new(config),
            last_report: None,
        };
    });
    crate::console_log!("🏋️ Squat session started");
}

/// Apply a TOML configuration and start a fresh session with it
#[wasm_bindgen]
pub fn configure_session(toml: &str) -> Result<(), JsValue> {
    let config = TrainerConfig::from_toml_str(toml)?;
    SESSION.with(|cell| {
        *cell.borrow_mut() = SessionStore {
            session: SquatSession::new(config),
            last_report: None,
        };
    });
    crate::console_log!("⚙️ Squat session configured");
    Ok(())
}

/// Process the current landmarks as one frame. Returns the rep count.
#[wasm_bindgen]
pub fn step_session() -> u32 {
    let frame = super::landmarks::current_pose_frame();
    SESSION.with(|cell| {
        let mut store = cell.borrow_mut();
        let report = store.session.process(frame.as_ref());
        if let Some(event) = report.milestone {
            crate::console_log!("{}", event.message());
        }
        let reps = report.rep_count;
        store.last_report = Some(report);
        reps
    })
}

#[wasm_bindgen]
pub fn get_rep_count() -> u32 {
    SESSION.with(|cell| cell.borrow().session.rep_count())
}

#[wasm_bindgen]
pub fn get_phase_label() -> String {
    SESSION.with(|cell| cell.borrow().session.phase().label().to_string())
}

/// Feedback text of the last frame (empty before the first frame)
#[wasm_bindgen]
pub fn get_feedback_text() -> String {
    with_last_report(|report| report.feedback.label().to_string()).unwrap_or_default()
}

/// Feedback box color as [r, g, b, a]
#[wasm_bindgen]
pub fn get_feedback_color() -> Vec<f32> {
    with_last_report(|report| report.feedback.color().to_vec()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_knee_angle() -> f32 {
    with_last_report(FrameReport::knee_angle).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_back_angle() -> f32 {
    with_last_report(FrameReport::back_angle).unwrap_or(0.0)
}

/// Milestone message while one is on screen
#[wasm_bindgen]
pub fn get_milestone_text() -> Option<String> {
    with_last_report(|report| report.milestone_message.clone()).flatten()
}

// ============================================================================
// INTERNAL API (no wasm_bindgen)
// ============================================================================

/// Read the last frame report
pub fn with_last_report<R>(f: impl FnOnce(&FrameReport) -> R) -> Option<R> {
    SESSION.with(|cell| cell.borrow().last_report.as_ref().map(f))
}

/// Read the live session (renderer draws its particles)
pub fn with_session<R>(f: impl FnOnce(&SquatSession) -> R) -> R {
    SESSION.with(|cell| f(&cell.borrow().session))
}
