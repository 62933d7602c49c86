use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::logging::LogLevel;
use crate::models::pose::{TrackerError, TrackerResult};

/// Where frames come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Looping video file or stream URL, muted
    Video { url: String },
    /// Default camera at the requested capture size
    Webcam { width: u32, height: u32 },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Webcam {
            width: 640,
            height: 480,
        }
    }
}

/// Which tracker flavour the defaults are taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerProfile {
    /// Accepts video files as well as the webcam
    VideoCapable,
    /// Webcam only, stricter confidence filter
    WebcamOnly,
}

impl TrackerProfile {
    pub fn default_threshold(&self) -> f32 {
        match self {
            TrackerProfile::VideoCapable => 0.7,
            TrackerProfile::WebcamOnly => 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    Lite,  // Fastest, less accurate
    Full,  // Balanced
    Heavy, // Slowest, most accurate
}

impl ModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Lite => "lite",
            ModelType::Full => "full",
            ModelType::Heavy => "heavy",
        }
    }
}

/// Options handed to the external pose model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_type: ModelType,
    pub max_poses: u32,
    pub enable_segmentation: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_type: ModelType::Full,
            max_poses: 1,
            enable_segmentation: true,
        }
    }
}

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub source: SourceConfig,
    pub profile: TrackerProfile,
    /// Overrides the profile's acceptance threshold. Keypoints must score
    /// strictly above it to be published.
    pub confidence_threshold: Option<f32>,
    /// Mirror horizontally. Defaults to true for the webcam, false for video.
    pub flip: Option<bool>,
    /// Ask the model for temporal smoothing between frames
    pub enable_smoothing: bool,
    pub model: ModelConfig,
    pub log_level: LogLevel,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            profile: TrackerProfile::VideoCapable,
            confidence_threshold: None,
            flip: None,
            enable_smoothing: true,
            model: ModelConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TrackerConfig {
    /// Config for playing back a video file
    pub fn video(url: impl Into<String>) -> Self {
        Self {
            source: SourceConfig::Video { url: url.into() },
            ..Self::default()
        }
    }

    /// Config for the webcam-only tracker
    pub fn webcam_only() -> Self {
        Self {
            profile: TrackerProfile::WebcamOnly,
            ..Self::default()
        }
    }

    /// Resolved acceptance threshold
    pub fn threshold(&self) -> f32 {
        self.confidence_threshold
            .unwrap_or_else(|| self.profile.default_threshold())
    }

    /// Resolved horizontal mirroring
    pub fn flip(&self) -> bool {
        self.flip.unwrap_or(match self.source {
            SourceConfig::Video { .. } => false,
            SourceConfig::Webcam { .. } => true,
        })
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> TrackerResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: TrackerConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> TrackerResult<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> TrackerResult<()> {
        if let Some(threshold) = self.confidence_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(TrackerError::InvalidConfig(format!(
                    "Invalid confidence threshold: {}. Must be between 0.0 and 1.0",
                    threshold
                )));
            }
        }

        match &self.source {
            SourceConfig::Video { url } if url.trim().is_empty() => {
                return Err(TrackerError::InvalidConfig(
                    "Video source URL must not be empty".to_string(),
                ));
            }
            SourceConfig::Webcam { width, height } if *width == 0 || *height == 0 => {
                return Err(TrackerError::InvalidConfig(format!(
                    "Invalid webcam size: {}x{}",
                    width, height
                )));
            }
            _ => {}
        }

        if self.model.max_poses == 0 {
            return Err(TrackerError::InvalidConfig(
                "max_poses must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.threshold(), 0.7);
        assert!(config.flip());
        assert!(config.enable_smoothing);
        assert_eq!(config.model.max_poses, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_profile_thresholds() {
        assert_eq!(TrackerConfig::webcam_only().threshold(), 0.8);
        assert_eq!(TrackerConfig::video("clip.mp4").threshold(), 0.7);

        let config = TrackerConfig {
            confidence_threshold: Some(0.5),
            ..TrackerConfig::webcam_only()
        };
        assert_eq!(config.threshold(), 0.5);
    }

    #[test]
    fn test_flip_defaults_per_source() {
        assert!(!TrackerConfig::video("clip.mp4").flip());
        assert!(TrackerConfig::webcam_only().flip());

        let config = TrackerConfig {
            flip: Some(true),
            ..TrackerConfig::video("clip.mp4")
        };
        assert!(config.flip());
    }

    #[test]
    fn test_validation() {
        let mut config = TrackerConfig::default();

        config.confidence_threshold = Some(1.5);
        assert!(config.validate().is_err());
        config.confidence_threshold = None;

        config.source = SourceConfig::Video { url: "  ".to_string() };
        assert!(config.validate().is_err());

        config.source = SourceConfig::Webcam { width: 0, height: 480 };
        assert!(config.validate().is_err());

        config.source = SourceConfig::default();
        config.model.max_poses = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tracker.json");

        let config = TrackerConfig {
            confidence_threshold: Some(0.65),
            ..TrackerConfig::video("https://example.com/dance.mp4")
        };
        config.save(&path).unwrap();

        let loaded = TrackerConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{"profile":"webcam_only"}"#).unwrap();
        assert_eq!(config.threshold(), 0.8);
        assert_eq!(config.source, SourceConfig::default());
    }
}
