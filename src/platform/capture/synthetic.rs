// Headless capture source producing blank frames of a fixed size

use super::CaptureSource;
use crate::core::config::SourceConfig;
use crate::models::capture::{CaptureError, CaptureResult, RawFrame, SourceInfo};
use crate::models::pose::{TrackerError, TrackerResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

/// Capture source without a camera. Useful with a replayed detector, where
/// pixel content is irrelevant and only the native size matters for scaling.
pub struct SyntheticCapture {
    width: u32,
    height: u32,
    is_open: AtomicBool,
}

impl SyntheticCapture {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            is_open: AtomicBool::new(false),
        }
    }

    /// Stand-in for the configured webcam, at its requested capture size.
    /// Video sources need a real decoder and are rejected.
    pub fn from_source(source: &SourceConfig) -> TrackerResult<Self> {
        match source {
            SourceConfig::Webcam { width, height } => Ok(Self::new(*width, *height)),
            SourceConfig::Video { url } => Err(TrackerError::InvalidConfig(format!(
                "Synthetic capture cannot play video {}",
                url
            ))),
        }
    }
}

#[async_trait]
impl CaptureSource for SyntheticCapture {
    async fn open(&mut self) -> CaptureResult<SourceInfo> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptureError::OpenFailed(format!(
                "invalid frame size {}x{}",
                self.width, self.height
            )));
        }

        self.is_open.store(true, Ordering::SeqCst);
        Ok(SourceInfo {
            width: self.width,
            height: self.height,
        })
    }

    async fn current_frame(&self) -> CaptureResult<RawFrame> {
        if !self.is_open.load(Ordering::SeqCst) {
            return Err(CaptureError::NotOpen);
        }

        let timestamp = chrono::Utc::now().timestamp_millis();
        Ok(RawFrame::blank(self.width, self.height, timestamp))
    }

    fn name(&self) -> String {
        format!("synthetic {}x{}", self.width, self.height)
    }
}
