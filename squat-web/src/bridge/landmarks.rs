//! Landmark storage and JS bridge
//!
//! Receives MediaPipe Pose landmarks from JavaScript and stores them for the
//! trainer session and renderer to read.

use wasm_bindgen::prelude::*;
use std::cell::RefCell;

use crate::error::{Result, TrainerError};
use crate::trainer::{Joint, JointSample, PoseFrame, POSE_LANDMARK_COUNT};

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = Joint::LeftShoulder.landmark_index();
pub const RIGHT_SHOULDER: usize = Joint::RightShoulder.landmark_index();
pub const LEFT_HIP: usize = Joint::LeftHip.landmark_index();
pub const RIGHT_HIP: usize = Joint::RightHip.landmark_index();
pub const LEFT_KNEE: usize = Joint::LeftKnee.landmark_index();
pub const RIGHT_KNEE: usize = Joint::RightKnee.landmark_index();
pub const LEFT_ANKLE: usize = Joint::LeftAnkle.landmark_index();
pub const RIGHT_ANKLE: usize = Joint::RightAnkle.landmark_index();

/// Values per landmark in the JS buffer: x, y, z, visibility
pub const VALUES_PER_LANDMARK: usize = 4;

/// Skeleton connections for torso and legs (pairs of landmark indices)
pub const SQUAT_SKELETON: [(usize, usize); 8] = [
    (LEFT_SHOULDER, RIGHT_SHOULDER),
    (LEFT_SHOULDER, LEFT_HIP),
    (RIGHT_SHOULDER, RIGHT_HIP),
    (LEFT_HIP, RIGHT_HIP),
    (LEFT_HIP, LEFT_KNEE),
    (LEFT_KNEE, LEFT_ANKLE),
    (RIGHT_HIP, RIGHT_KNEE),
    (RIGHT_KNEE, RIGHT_ANKLE),
];

/// Key landmarks to draw as dots (squat-relevant)
pub const KEY_LANDMARKS: [usize; 9] = [
    NOSE,
    LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    LEFT_ANKLE, RIGHT_ANKLE,
];

// ============================================================================
// LANDMARK DATA STRUCTURE
// ============================================================================

/// A single landmark point (normalized coordinates) with visibility
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Landmark {
    pub x: f32,  // 0-1 normalized
    pub y: f32,  // 0-1 normalized
    pub z: f32,  // Relative depth
    pub visibility: f32,  // 0-1 confidence
}

impl Landmark {
    fn sample(&self) -> JointSample {
        JointSample::new(self.x, self.y, self.visibility)
    }
}

/// Internal storage for current frame's landmarks
struct LandmarkStore {
    landmarks: [Landmark; POSE_LANDMARK_COUNT],
    has_data: bool,
}

impl Default for LandmarkStore {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); POSE_LANDMARK_COUNT],
            has_data: false,
        }
    }
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static LANDMARKS: RefCell<LandmarkStore> = RefCell::new(LandmarkStore::default());
}

/// Decode a flat buffer of 33 × (x, y, z, visibility)
pub fn parse_landmarks(data: &[f32]) -> Result<[Landmark; POSE_LANDMARK_COUNT]> {
    let expected = POSE_LANDMARK_COUNT * VALUES_PER_LANDMARK;
    if data.len() != expected {
        return Err(TrainerError::InvalidLandmarkBuffer {
            expected,
            actual: data.len(),
        });
    }

    let mut landmarks = [Landmark::default(); POSE_LANDMARK_COUNT];
    for (landmark, values) in landmarks.iter_mut().zip(data.chunks_exact(VALUES_PER_LANDMARK)) {
        *landmark = Landmark {
            x: values[0],
            y: values[1],
            z: values[2],
            visibility: values[3],
        };
    }
    Ok(landmarks)
}

/// Required joints of a full landmark set, in trainer form
pub fn to_pose_frame(landmarks: &[Landmark; POSE_LANDMARK_COUNT]) -> PoseFrame {
    PoseFrame::from_fn(|joint| landmarks[joint.landmark_index()].sample())
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Called from JavaScript with flat Float32Array of 132 values
/// (33 landmarks × 4 values: x, y, z, visibility)
#[wasm_bindgen]
pub fn update_landmarks(data: &[f32]) {
    if let Err(err) = store_landmarks(data) {
        web_sys::console::warn_1(&err.to_string().into());
    }
}

/// Called from JavaScript when MediaPipe found no body this frame
#[wasm_bindgen]
pub fn clear_landmarks() {
    LANDMARKS.with(|store_cell| store_cell.borrow_mut().has_data = false);
}

// ============================================================================
// INTERNAL API (no wasm_bindgen)
// ============================================================================

/// Replace the stored landmarks. A malformed buffer drops this frame's
/// body, so the session sees it as missing rather than reusing the last pose.
pub fn store_landmarks(data: &[f32]) -> Result<()> {
    let parsed = parse_landmarks(data);

    LANDMARKS.with(|store_cell| {
        let mut store = store_cell.borrow_mut();
        match &parsed {
            Ok(landmarks) => {
                store.landmarks = *landmarks;
                store.has_data = true;
            }
            Err(_) => store.has_data = false,
        }
    });

    parsed.map(|_| ())
}

/// Get all current landmarks (for renderer)
pub fn get_all_landmarks() -> Option<[Landmark; POSE_LANDMARK_COUNT]> {
    LANDMARKS.with(|store_cell| {
        let store = store_cell.borrow();
        if store.has_data {
            Some(store.landmarks)
        } else {
            None
        }
    })
}

/// Current pose in trainer form, None when no body was detected
pub fn current_pose_frame() -> Option<PoseFrame> {
    get_all_landmarks().map(|landmarks| to_pose_frame(&landmarks))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> Vec<f32> {
        (0..POSE_LANDMARK_COUNT)
            .flat_map(|i| [i as f32 / 100.0, 0.5, -0.1, 0.9])
            .collect()
    }

    #[test]
    fn test_parse_landmarks() {
        let landmarks = parse_landmarks(&buffer()).unwrap();
        let hip = landmarks[LEFT_HIP];
        assert!((hip.x - 0.23).abs() < 1e-6);
        assert!((hip.z + 0.1).abs() < 1e-6);
        assert!((hip.visibility - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_xyz_only_buffer() {
        let err = parse_landmarks(&[0.0; 99]).unwrap_err();
        assert!(matches!(
            err,
            TrainerError::InvalidLandmarkBuffer { expected: 132, actual: 99 }
        ));
    }

    #[test]
    fn test_store_round_trip() {
        assert!(current_pose_frame().is_none());

        store_landmarks(&buffer()).unwrap();
        let frame = current_pose_frame().unwrap();
        assert!((frame.joint(Joint::RightKnee).x - 0.26).abs() < 1e-6);

        clear_landmarks();
        assert!(current_pose_frame().is_none());
    }

    #[test]
    fn test_malformed_buffer_drops_previous_pose() {
        store_landmarks(&buffer()).unwrap();
        assert!(current_pose_frame().is_some());

        let err = store_landmarks(&[0.0; 99]).unwrap_err();
        assert!(matches!(err, TrainerError::InvalidLandmarkBuffer { .. }));
        assert!(current_pose_frame().is_none());
        assert!(get_all_landmarks().is_none());
    }
}
