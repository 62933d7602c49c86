// Data models for body tracking: raw detector keypoints, joints, landmarks and frame snapshots

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::capture::CaptureError;

// ==============================================================================
// Raw Detector Output
// ==============================================================================

/// One joint prediction as produced by the pose model, in source pixel space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawKeypoint {
    pub name: String, // Detector naming, e.g. "left_shoulder"
    pub x: f32,
    pub y: f32,
    pub score: f32, // Confidence [0, 1]
}

impl RawKeypoint {
    pub fn new(name: impl Into<String>, x: f32, y: f32, score: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            score,
        }
    }
}

/// A single detected pose (the detector is configured for at most one)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub keypoints: Vec<RawKeypoint>,
}

// ==============================================================================
// Joints (33 BlazePose keypoints + 3 derived)
// ==============================================================================

/// Published joint names. The first 33 follow BlazePose keypoint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Joint {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    LeftMouth = 9,
    RightMouth = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
    NeckBase = 33,
    Pelvis = 34,
    Mouth = 35,
}

impl Joint {
    pub const COUNT: usize = 36;

    pub const ALL: [Joint; Joint::COUNT] = [
        Joint::Nose,
        Joint::LeftEyeInner,
        Joint::LeftEye,
        Joint::LeftEyeOuter,
        Joint::RightEyeInner,
        Joint::RightEye,
        Joint::RightEyeOuter,
        Joint::LeftEar,
        Joint::RightEar,
        Joint::LeftMouth,
        Joint::RightMouth,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftPinky,
        Joint::RightPinky,
        Joint::LeftIndex,
        Joint::RightIndex,
        Joint::LeftThumb,
        Joint::RightThumb,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
        Joint::LeftHeel,
        Joint::RightHeel,
        Joint::LeftFootIndex,
        Joint::RightFootIndex,
        Joint::NeckBase,
        Joint::Pelvis,
        Joint::Mouth,
    ];

    /// Derived joints and the pair each one averages
    pub const DERIVED: [(Joint, Joint, Joint); 3] = [
        (Joint::NeckBase, Joint::LeftShoulder, Joint::RightShoulder),
        (Joint::Pelvis, Joint::LeftHip, Joint::RightHip),
        (Joint::Mouth, Joint::LeftMouth, Joint::RightMouth),
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Joint::Nose => "nose",
            Joint::LeftEyeInner => "leftEyeInner",
            Joint::LeftEye => "leftEye",
            Joint::LeftEyeOuter => "leftEyeOuter",
            Joint::RightEyeInner => "rightEyeInner",
            Joint::RightEye => "rightEye",
            Joint::RightEyeOuter => "rightEyeOuter",
            Joint::LeftEar => "leftEar",
            Joint::RightEar => "rightEar",
            Joint::LeftMouth => "leftMouth",
            Joint::RightMouth => "rightMouth",
            Joint::LeftShoulder => "leftShoulder",
            Joint::RightShoulder => "rightShoulder",
            Joint::LeftElbow => "leftElbow",
            Joint::RightElbow => "rightElbow",
            Joint::LeftWrist => "leftWrist",
            Joint::RightWrist => "rightWrist",
            Joint::LeftPinky => "leftPinky",
            Joint::RightPinky => "rightPinky",
            Joint::LeftIndex => "leftIndex",
            Joint::RightIndex => "rightIndex",
            Joint::LeftThumb => "leftThumb",
            Joint::RightThumb => "rightThumb",
            Joint::LeftHip => "leftHip",
            Joint::RightHip => "rightHip",
            Joint::LeftKnee => "leftKnee",
            Joint::RightKnee => "rightKnee",
            Joint::LeftAnkle => "leftAnkle",
            Joint::RightAnkle => "rightAnkle",
            Joint::LeftHeel => "leftHeel",
            Joint::RightHeel => "rightHeel",
            Joint::LeftFootIndex => "leftFootIndex",
            Joint::RightFootIndex => "rightFootIndex",
            Joint::NeckBase => "neckBase",
            Joint::Pelvis => "pelvis",
            Joint::Mouth => "mouth",
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, Joint::NeckBase | Joint::Pelvis | Joint::Mouth)
    }

    /// Parse a joint from the detector's naming convention ("mouth_left" etc.)
    pub fn from_raw_name(raw: &str) -> TrackerResult<Self> {
        normalize_name(raw).parse()
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Joint {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Joint::ALL
            .iter()
            .copied()
            .find(|joint| joint.as_str() == s)
            .ok_or_else(|| TrackerError::UnknownJoint(s.to_string()))
    }
}

/// Convert a detector keypoint name to the published joint naming.
///
/// Underscore-separated words are joined camel style, then the model's
/// `mouthLeft`/`mouthRight` are reordered to `leftMouth`/`rightMouth` so the
/// side comes first like every other joint.
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' {
            if let Some(&next) = chars.peek() {
                if next.is_alphanumeric() || next == '_' {
                    chars.next();
                    out.extend(next.to_uppercase());
                    continue;
                }
            }
        }
        out.push(c);
    }

    match out.as_str() {
        "mouthLeft" => "leftMouth".to_string(),
        "mouthRight" => "rightMouth".to_string(),
        _ => out,
    }
}

// ==============================================================================
// Published Landmarks
// ==============================================================================

/// A position in display space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// A joint that passed the confidence filter, in display space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub joint: Joint,
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ==============================================================================
// Frame Snapshot
// ==============================================================================

/// All landmarks published by one detection cycle.
///
/// Two views over the same data: `landmarks()` in publication order for
/// drawing, `get()` keyed by joint for lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    timestamp: i64,
    landmarks: Vec<Landmark>,
    slots: [Option<Point>; Joint::COUNT],
}

impl FrameSnapshot {
    /// Snapshot with every joint absent
    pub fn empty(timestamp: i64) -> Self {
        Self {
            timestamp,
            landmarks: Vec::new(),
            slots: [None; Joint::COUNT],
        }
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn get(&self, joint: Joint) -> Option<Point> {
        self.slots[joint.index()]
    }

    pub fn contains(&self, joint: Joint) -> bool {
        self.slots[joint.index()].is_some()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

/// Accumulates one cycle's landmarks. Setting a joint twice keeps only the
/// last value, and its position in the ordered view moves to the end.
#[derive(Debug)]
pub struct SnapshotBuilder {
    timestamp: i64,
    order: Vec<Joint>,
    slots: [Option<Point>; Joint::COUNT],
}

impl SnapshotBuilder {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            order: Vec::with_capacity(Joint::COUNT),
            slots: [None; Joint::COUNT],
        }
    }

    pub fn get(&self, joint: Joint) -> Option<Point> {
        self.slots[joint.index()]
    }

    /// Publish `point` for `joint`, or mark it absent with `None`
    pub fn set(&mut self, joint: Joint, point: Option<Point>) {
        if self.slots[joint.index()].is_some() {
            self.order.retain(|j| *j != joint);
        }
        if point.is_some() {
            self.order.push(joint);
        }
        self.slots[joint.index()] = point;
    }

    pub fn build(self) -> FrameSnapshot {
        let landmarks = self
            .order
            .iter()
            .filter_map(|joint| {
                self.slots[joint.index()].map(|p| Landmark {
                    joint: *joint,
                    x: p.x,
                    y: p.y,
                })
            })
            .collect();

        FrameSnapshot {
            timestamp: self.timestamp,
            landmarks,
            slots: self.slots,
        }
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Unknown joint name: {0}")]
    UnknownJoint(String),

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Model loading failed: {0}")]
    ModelLoadFailed(String),

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
