pub mod core;
pub mod models;
pub mod platform;

pub use crate::core::body_tracker::{BodyTracker, CycleOutcome, TrackerStatus};
pub use crate::core::config::{ModelConfig, ModelType, SourceConfig, TrackerConfig, TrackerProfile};
pub use crate::core::frame_loop::{run_frame_loop, FrameLoopStats, RefreshTicker};
pub use crate::core::geometry::{
    direction_between, distance_between, drawable_keypoints, placement_between, skeleton_segments,
    Placement, Segment, SKELETON,
};
pub use crate::core::landmark_pipeline::{build_snapshot, FrameTransform};
pub use crate::core::logging::{init_logging, LogLevel};
pub use crate::models::pose::{
    normalize_name, FrameSnapshot, Joint, Landmark, Point, Pose, RawKeypoint, TrackerError,
    TrackerResult,
};
