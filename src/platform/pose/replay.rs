// Replay backend: serves recorded detector output instead of running a model
//
// Recording format (JSON): an array of frames, each frame an array of poses,
// each pose `{ "keypoints": [{ "name", "x", "y", "score" }, ...] }`.

use super::PoseEstimator;
use crate::core::config::ModelConfig;
use crate::models::capture::RawFrame;
use crate::models::pose::{Pose, TrackerError, TrackerResult};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

enum ReplaySource {
    File(PathBuf),
    Frames(Vec<Vec<Pose>>),
}

/// Pose estimator that replays a recording frame by frame, wrapping around
/// at the end
pub struct ReplayEstimator {
    source: ReplaySource,
    frames: Vec<Vec<Pose>>,
    cursor: AtomicUsize,
    model: Option<ModelConfig>,
}

impl ReplayEstimator {
    /// Replay a recording stored on disk. The file is read by `load`.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ReplaySource::File(path.into()),
            frames: Vec::new(),
            cursor: AtomicUsize::new(0),
            model: None,
        }
    }

    /// Replay frames held in memory
    pub fn from_frames(frames: Vec<Vec<Pose>>) -> Self {
        Self {
            source: ReplaySource::Frames(frames),
            frames: Vec::new(),
            cursor: AtomicUsize::new(0),
            model: None,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn parse_recording(json: &str) -> TrackerResult<Vec<Vec<Pose>>> {
        let frames: Vec<Vec<Pose>> = serde_json::from_str(json)
            .map_err(|e| TrackerError::ModelLoadFailed(format!("Failed to parse recording: {}", e)))?;

        if frames.is_empty() {
            return Err(TrackerError::ModelLoadFailed("Recording has no frames".to_string()));
        }

        Ok(frames)
    }
}

#[async_trait]
impl PoseEstimator for ReplayEstimator {
    async fn load(&mut self, model: &ModelConfig) -> TrackerResult<()> {
        let frames = match &self.source {
            ReplaySource::File(path) => {
                let json = tokio::fs::read_to_string(path).await.map_err(|e| {
                    TrackerError::ModelLoadFailed(format!(
                        "Failed to read recording {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::parse_recording(&json)?
            }
            ReplaySource::Frames(frames) => {
                if frames.is_empty() {
                    return Err(TrackerError::ModelLoadFailed("Recording has no frames".to_string()));
                }
                frames.clone()
            }
        };

        tracing::debug!(
            frames = frames.len(),
            model_type = model.model_type.as_str(),
            max_poses = model.max_poses,
            "replay recording loaded"
        );
        self.frames = frames;
        self.cursor.store(0, Ordering::SeqCst);
        self.model = Some(model.clone());
        Ok(())
    }

    async fn estimate_poses(&self, _frame: &RawFrame, _enable_smoothing: bool) -> TrackerResult<Vec<Pose>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| TrackerError::InferenceFailed("Model not loaded".to_string()))?;

        let i = self.cursor.fetch_add(1, Ordering::SeqCst) % self.frames.len();
        let mut poses = self.frames[i].clone();
        // A model never reports more people than it was configured for
        poses.truncate(model.max_poses as usize);
        Ok(poses)
    }

    fn model_info(&self) -> String {
        let recording = match &self.source {
            ReplaySource::File(path) => format!("Replay of {}", path.display()),
            ReplaySource::Frames(frames) => format!("Replay of {} in-memory frames", frames.len()),
        };

        match &self.model {
            Some(model) => format!(
                "{} ({} model, up to {} poses, segmentation {})",
                recording,
                model.model_type.as_str(),
                model.max_poses,
                if model.enable_segmentation { "on" } else { "off" }
            ),
            None => recording,
        }
    }
}
