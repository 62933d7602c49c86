// Keypoint normalization: raw detector output -> filtered, display-space frame snapshot

use crate::models::pose::{
    FrameSnapshot, Joint, Point, RawKeypoint, SnapshotBuilder, TrackerError, TrackerResult,
};

/// Source-to-display mapping and acceptance threshold for one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub display_width: f32,
    pub flip: bool,
    pub threshold: f32,
}

impl FrameTransform {
    /// Transform that maps a `source_width` x `source_height` frame onto a
    /// `display_width` x `display_height` surface
    pub fn between(
        source_width: u32,
        source_height: u32,
        display_width: f32,
        display_height: f32,
        flip: bool,
        threshold: f32,
    ) -> TrackerResult<Self> {
        if source_width == 0 || source_height == 0 {
            return Err(TrackerError::InvalidFrame(format!(
                "source has no area: {}x{}",
                source_width, source_height
            )));
        }
        if !display_width.is_finite() || !display_height.is_finite() {
            return Err(TrackerError::InvalidFrame(format!(
                "display size is not finite: {}x{}",
                display_width, display_height
            )));
        }

        Ok(Self {
            scale_x: display_width / source_width as f32,
            scale_y: display_height / source_height as f32,
            display_width,
            flip,
            threshold,
        })
    }

    /// Display-space position of a source-space point
    pub fn apply(&self, x: f32, y: f32) -> Point {
        let mut px = x * self.scale_x;
        let py = y * self.scale_y;

        if self.flip {
            px = self.display_width - px;
        }

        Point::new(px, py)
    }

    pub fn accepts(&self, score: f32) -> bool {
        score > self.threshold
    }
}

/// Build the snapshot for one detection cycle.
///
/// Keypoints scoring at or below the threshold leave their joint absent even
/// if an earlier keypoint of the same name was accepted. Names that do not map
/// to a joint are skipped.
pub fn build_snapshot(
    keypoints: &[RawKeypoint],
    transform: &FrameTransform,
    timestamp: i64,
) -> FrameSnapshot {
    let mut builder = SnapshotBuilder::new(timestamp);

    for kp in keypoints {
        let joint = match Joint::from_raw_name(&kp.name) {
            Ok(joint) if !joint.is_derived() => joint,
            Ok(joint) => {
                tracing::debug!(%joint, "detector reported a derived joint, ignoring");
                continue;
            }
            Err(e) => {
                tracing::debug!("skipping keypoint: {}", e);
                continue;
            }
        };

        let point = transform
            .accepts(kp.score)
            .then(|| transform.apply(kp.x, kp.y));
        builder.set(joint, point);
    }

    for (derived, a, b) in Joint::DERIVED {
        let point = match (builder.get(a), builder.get(b)) {
            (Some(pa), Some(pb)) => Some(pa.midpoint(&pb)),
            _ => None,
        };
        builder.set(derived, point);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(threshold: f32) -> FrameTransform {
        FrameTransform {
            scale_x: 1.0,
            scale_y: 1.0,
            display_width: 640.0,
            flip: false,
            threshold,
        }
    }

    #[test]
    fn test_shoulders_produce_neck_base() {
        let keypoints = vec![
            RawKeypoint::new("left_shoulder", 100.0, 50.0, 0.9),
            RawKeypoint::new("right_shoulder", 200.0, 50.0, 0.9),
        ];

        let snapshot = build_snapshot(&keypoints, &identity(0.7), 0);

        assert_eq!(snapshot.get(Joint::LeftShoulder), Some(Point::new(100.0, 50.0)));
        assert_eq!(snapshot.get(Joint::RightShoulder), Some(Point::new(200.0, 50.0)));
        assert_eq!(snapshot.get(Joint::NeckBase), Some(Point::new(150.0, 50.0)));

        let order: Vec<Joint> = snapshot.landmarks().iter().map(|l| l.joint).collect();
        assert_eq!(order, vec![Joint::LeftShoulder, Joint::RightShoulder, Joint::NeckBase]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let keypoints = vec![
            RawKeypoint::new("nose", 10.0, 10.0, 0.7),
            RawKeypoint::new("left_eye", 20.0, 10.0, 0.7001),
        ];

        let snapshot = build_snapshot(&keypoints, &identity(0.7), 0);

        assert!(!snapshot.contains(Joint::Nose));
        assert!(snapshot.contains(Joint::LeftEye));
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_low_score_clears_earlier_value() {
        let keypoints = vec![
            RawKeypoint::new("nose", 10.0, 10.0, 0.95),
            RawKeypoint::new("nose", 12.0, 11.0, 0.2),
        ];

        let snapshot = build_snapshot(&keypoints, &identity(0.7), 0);
        assert!(!snapshot.contains(Joint::Nose));
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_scale_and_flip() {
        let transform = FrameTransform::between(320, 240, 640.0, 480.0, true, 0.7).unwrap();
        let keypoints = vec![RawKeypoint::new("left_wrist", 100.0, 60.0, 0.8)];

        let snapshot = build_snapshot(&keypoints, &transform, 0);
        // 100 * 2 = 200, mirrored across a 640 wide display
        assert_eq!(snapshot.get(Joint::LeftWrist), Some(Point::new(440.0, 120.0)));
    }

    #[test]
    fn test_scale_without_flip_is_exact() {
        let transform = FrameTransform::between(640, 480, 1280.0, 720.0, false, 0.7).unwrap();
        let keypoints = vec![RawKeypoint::new("right_knee", 33.0, 47.0, 0.99)];

        let snapshot = build_snapshot(&keypoints, &transform, 0);
        let p = snapshot.get(Joint::RightKnee).unwrap();
        assert_eq!(p.x, 33.0 * (1280.0 / 640.0));
        assert_eq!(p.y, 47.0 * (720.0 / 480.0));
    }

    #[test]
    fn test_derived_requires_both_inputs() {
        let keypoints = vec![
            RawKeypoint::new("left_hip", 100.0, 300.0, 0.9),
            RawKeypoint::new("right_hip", 200.0, 310.0, 0.3),
            RawKeypoint::new("mouth_left", 140.0, 80.0, 0.9),
            RawKeypoint::new("mouth_right", 160.0, 84.0, 0.9),
        ];

        let snapshot = build_snapshot(&keypoints, &identity(0.7), 0);

        assert!(!snapshot.contains(Joint::Pelvis));
        assert!(!snapshot.contains(Joint::NeckBase));
        assert_eq!(snapshot.get(Joint::LeftMouth), Some(Point::new(140.0, 80.0)));
        assert_eq!(snapshot.get(Joint::RightMouth), Some(Point::new(160.0, 84.0)));
        assert_eq!(snapshot.get(Joint::Mouth), Some(Point::new(150.0, 82.0)));
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let keypoints = vec![
            RawKeypoint::new("tail_tip", 1.0, 1.0, 0.99),
            RawKeypoint::new("neck_base", 5.0, 5.0, 0.99),
            RawKeypoint::new("nose", 2.0, 3.0, 0.99),
        ];

        let snapshot = build_snapshot(&keypoints, &identity(0.7), 0);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(Joint::Nose), Some(Point::new(2.0, 3.0)));
        assert!(!snapshot.contains(Joint::NeckBase));
    }

    #[test]
    fn test_zero_sized_source_is_rejected() {
        let result = FrameTransform::between(0, 480, 640.0, 480.0, false, 0.7);
        assert!(matches!(result, Err(TrackerError::InvalidFrame(_))));
    }
}
