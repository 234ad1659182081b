//! Status overlay text and performance metrics
//!
//! Tracks FPS and pose latency, and formats the REPS / STATUS / KNEE / BACK
//! block that JS writes into the HTML overlay.

use wasm_bindgen::prelude::*;
use std::cell::RefCell;

use crate::trainer::FrameReport;

/// Performance metrics storage
#[derive(Default)]
struct Metrics {
    fps: f32,
    frame_time_ms: f32,
    mediapipe_latency_ms: f32,
}

thread_local! {
    static METRICS: RefCell<Metrics> = RefCell::new(Metrics::default());
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Set frame timing (called from JS each frame)
#[wasm_bindgen]
pub fn set_frame_metrics(fps: f32, frame_time_ms: f32) {
    // Ignore invalid times (tab backgrounded or first frame)
    if !(1.0..=200.0).contains(&frame_time_ms) {
        return;
    }

    METRICS.with(|m| {
        let mut metrics = m.borrow_mut();
        // Exponential moving average for smooth display
        metrics.fps = metrics.fps * 0.9 + fps * 0.1;
        metrics.frame_time_ms = metrics.frame_time_ms * 0.9 + frame_time_ms * 0.1;
    });
}

/// Set MediaPipe detection latency
#[wasm_bindgen]
pub fn set_mediapipe_latency(ms: f32) {
    METRICS.with(|m| {
        let mut metrics = m.borrow_mut();
        metrics.mediapipe_latency_ms = metrics.mediapipe_latency_ms * 0.9 + ms * 0.1;
    });
}

/// Get formatted overlay text (called from JS to update HTML)
#[wasm_bindgen]
pub fn get_status_overlay_text() -> String {
    let status = super::session::with_last_report(format_status)
        .unwrap_or_else(|| "REPS: 0 | STATUS: GET READY".to_string());

    METRICS.with(|m| {
        let metrics = m.borrow();
        format!(
            "{}\nFPS: {:.0} | Frame: {:.1}ms | MediaPipe: {:.0}ms",
            status, metrics.fps, metrics.frame_time_ms, metrics.mediapipe_latency_ms,
        )
    })
}

/// Counter, phase and truncated angles for one frame
pub fn format_status(report: &FrameReport) -> String {
    format!(
        "REPS: {} | STATUS: {}\nKNEE: {} | BACK: {}",
        report.rep_count,
        report.phase.label(),
        report.knee_angle() as i32,
        report.back_angle() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::{ExercisePhase, FeedbackCode, JointAngles};

    #[test]
    fn test_format_status_truncates_angles() {
        let report = FrameReport {
            phase: ExercisePhase::Descending,
            rep_count: 7,
            feedback: FeedbackCode::GoLower,
            angles: Some(JointAngles::new(120.9, 165.4)),
            milestone: None,
            milestone_message: None,
        };
        assert_eq!(format_status(&report), "REPS: 7 | STATUS: DOWN\nKNEE: 120 | BACK: 165");
    }

    #[test]
    fn test_frame_metrics_ignore_outliers() {
        set_frame_metrics(30.0, 500.0);
        set_frame_metrics(30.0, 33.0);
        let text = get_status_overlay_text();
        assert!(text.starts_with("REPS: 0 | STATUS: GET READY\nFPS: 3 |"), "{}", text);
    }
}
