//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod landmarks;
mod overlay;
mod session;

pub use landmarks::{
    // WASM entry points
    update_landmarks,
    clear_landmarks,
    // Internal API
    store_landmarks,
    get_all_landmarks,
    current_pose_frame,
    parse_landmarks,
    Landmark,
    // Constants
    NOSE, LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    LEFT_ANKLE, RIGHT_ANKLE,
    SQUAT_SKELETON, KEY_LANDMARKS, VALUES_PER_LANDMARK,
};

pub use overlay::{
    set_frame_metrics,
    set_mediapipe_latency,
    get_status_overlay_text,
    format_status,
};

pub use session::{
    start_session,
    configure_session,
    step_session,
    get_rep_count,
    get_phase_label,
    get_feedback_text,
    get_feedback_color,
    get_knee_angle,
    get_back_angle,
    get_milestone_text,
    with_last_report,
    with_session,
};
