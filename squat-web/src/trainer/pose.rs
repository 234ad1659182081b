//! Pose frame - the joints the trainer reads from one MediaPipe result

use crate::error::{Result, TrainerError};

/// Number of landmarks in a MediaPipe Pose result
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Joints required for squat tracking (both sides of shoulders, hips, knees, ankles)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Joint {
    LeftShoulder,
    RightShoulder,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Joint {
    /// All required joints, in storage order
    pub const ALL: [Joint; 8] = [
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
    ];

    /// Index of this joint in a MediaPipe Pose landmark list
    pub const fn landmark_index(self) -> usize {
        match self {
            Joint::LeftShoulder => 11,
            Joint::RightShoulder => 12,
            Joint::LeftHip => 23,
            Joint::RightHip => 24,
            Joint::LeftKnee => 25,
            Joint::RightKnee => 26,
            Joint::LeftAnkle => 27,
            Joint::RightAnkle => 28,
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

/// One joint position (normalized 0-1) with its visibility confidence
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JointSample {
    pub x: f32,
    pub y: f32,
    pub visibility: f32,
}

impl JointSample {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The required joints of a single detected body
#[derive(Clone, Debug, PartialEq)]
pub struct PoseFrame {
    joints: [JointSample; 8],
}

impl PoseFrame {
    /// Build a frame by looking up every required joint
    pub fn from_fn(mut lookup: impl FnMut(Joint) -> JointSample) -> Self {
        let mut joints = [JointSample::default(); 8];
        for joint in Joint::ALL {
            joints[joint.slot()] = lookup(joint);
        }
        Self { joints }
    }

    pub fn joint(&self, joint: Joint) -> JointSample {
        self.joints[joint.slot()]
    }

    pub fn set_joint(&mut self, joint: Joint, sample: JointSample) {
        self.joints[joint.slot()] = sample;
    }

    /// Position of a joint, rejecting NaN or infinite coordinates
    pub fn position(&self, joint: Joint) -> Result<(f32, f32)> {
        let sample = self.joint(joint);
        if sample.is_finite() {
            Ok(sample.position())
        } else {
            Err(TrainerError::NonFiniteCoordinate(joint))
        }
    }

    /// (joint, visibility) for every required joint
    pub fn visibilities(&self) -> impl Iterator<Item = (Joint, f32)> + '_ {
        Joint::ALL.iter().map(move |&joint| (joint, self.joint(joint).visibility))
    }
}
