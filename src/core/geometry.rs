// Geometry helpers over published landmarks: distances, directions and the skeleton

use std::f32::consts::FRAC_PI_2;

use crate::models::pose::{FrameSnapshot, Joint, Landmark, Point};

/// Skeleton connections (start joint, end joint) used for drawing
pub const SKELETON: [(Joint, Joint); 24] = [
    (Joint::NeckBase, Joint::Mouth),
    // Upper body
    (Joint::LeftShoulder, Joint::RightShoulder),
    (Joint::LeftShoulder, Joint::LeftElbow),
    (Joint::RightShoulder, Joint::RightElbow),
    (Joint::LeftElbow, Joint::LeftWrist),
    (Joint::RightElbow, Joint::RightWrist),
    // Torso
    (Joint::LeftShoulder, Joint::LeftHip),
    (Joint::RightShoulder, Joint::RightHip),
    // Lower body
    (Joint::LeftHip, Joint::LeftKnee),
    (Joint::RightHip, Joint::RightKnee),
    (Joint::LeftHip, Joint::RightHip),
    (Joint::LeftKnee, Joint::LeftAnkle),
    (Joint::LeftAnkle, Joint::LeftHeel),
    (Joint::RightAnkle, Joint::RightHeel),
    (Joint::LeftHeel, Joint::LeftFootIndex),
    (Joint::RightHeel, Joint::RightFootIndex),
    (Joint::RightKnee, Joint::RightAnkle),
    // Hands
    (Joint::LeftWrist, Joint::LeftIndex),
    (Joint::RightWrist, Joint::RightIndex),
    // Face
    (Joint::Mouth, Joint::Nose),
    (Joint::Nose, Joint::LeftEye),
    (Joint::Nose, Joint::RightEye),
    (Joint::LeftEye, Joint::LeftEar),
    (Joint::RightEye, Joint::RightEar),
];

/// Joints left out when drawing individual keypoints
const HIDDEN_KEYPOINTS: [Joint; 10] = [
    Joint::LeftEyeInner,
    Joint::LeftEyeOuter,
    Joint::RightEyeInner,
    Joint::RightEyeOuter,
    Joint::LeftMouth,
    Joint::RightMouth,
    Joint::LeftPinky,
    Joint::RightPinky,
    Joint::LeftThumb,
    Joint::RightThumb,
];

/// A skeleton edge whose endpoints are both present
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Joint,
    pub to: Joint,
    pub start: Point,
    pub end: Point,
}

/// Where to draw an image stretched between two landmarks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub center: Point,
    /// Rotation in radians, measured from the +x axis
    pub angle: f32,
    pub length: f32,
}

/// Euclidean distance, or 0 when either point is absent
pub fn distance_between(p: Option<Point>, q: Option<Point>) -> f32 {
    match (p, q) {
        (Some(p), Some(q)) => (p.x - q.x).hypot(p.y - q.y),
        _ => 0.0,
    }
}

/// Direction of the vector from `p` to `q`, mapped so that -90°..90° becomes
/// -1..1.
///
/// The mapping is linear and unclamped: a vector pointing left yields a value
/// beyond ±1 (up to ±2 for 180°). Returns 0 when either point is absent.
pub fn direction_between(p: Option<Point>, q: Option<Point>) -> f32 {
    match (p, q) {
        (Some(p), Some(q)) => (q.y - p.y).atan2(q.x - p.x) / FRAC_PI_2,
        _ => 0.0,
    }
}

/// Center, angle and length for an image spanning `p` to `q`
pub fn placement_between(p: Option<Point>, q: Option<Point>) -> Option<Placement> {
    let (p, q) = (p?, q?);
    Some(Placement {
        center: p.midpoint(&q),
        angle: (q.y - p.y).atan2(q.x - p.x),
        length: distance_between(Some(p), Some(q)),
    })
}

/// Skeleton edges that can be drawn for this snapshot
pub fn skeleton_segments(snapshot: &FrameSnapshot) -> Vec<Segment> {
    SKELETON
        .iter()
        .filter_map(|&(from, to)| {
            Some(Segment {
                from,
                to,
                start: snapshot.get(from)?,
                end: snapshot.get(to)?,
            })
        })
        .collect()
}

/// Landmarks to draw as individual dots, in publication order
pub fn drawable_keypoints(snapshot: &FrameSnapshot) -> impl Iterator<Item = &Landmark> {
    snapshot
        .landmarks()
        .iter()
        .filter(|lm| !HIDDEN_KEYPOINTS.contains(&lm.joint))
}
