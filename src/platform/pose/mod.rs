// Pose estimation backends
// The model itself is external; backends adapt it to the PoseEstimator trait.

pub mod replay;

pub use replay::ReplayEstimator;

use crate::core::config::ModelConfig;
use crate::models::capture::RawFrame;
use crate::models::pose::{Pose, TrackerResult};
use async_trait::async_trait;

/// Pose estimator bridge
#[async_trait]
pub trait PoseEstimator: Send + Sync {
    /// Load the model with the given options. Resolves once inference can run.
    async fn load(&mut self, model: &ModelConfig) -> TrackerResult<()>;

    /// Estimate poses for a frame. Returns zero or more poses in source pixel
    /// coordinates; the tracker consumes only the first.
    async fn estimate_poses(&self, frame: &RawFrame, enable_smoothing: bool) -> TrackerResult<Vec<Pose>>;

    /// Get model info
    fn model_info(&self) -> String;
}
