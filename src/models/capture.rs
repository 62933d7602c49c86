// Data structures for frame capture (video file or webcam)

use serde::{Deserialize, Serialize};

/// Native dimensions reported by a capture source once it is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub width: u32,
    pub height: u32,
}

/// A captured frame from the source
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub timestamp: i64,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

impl RawFrame {
    /// A zeroed frame of the given size
    pub fn blank(width: u32, height: u32, timestamp: i64) -> Self {
        let len = width as usize * height as usize * PixelFormat::RGBA8.bytes_per_pixel();
        Self {
            timestamp,
            width,
            height,
            data: vec![0; len],
            format: PixelFormat::RGBA8,
        }
    }

    /// Bytes a frame of this size and format must carry
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel()
    }
}

/// Pixel format of captured frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    RGBA8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::RGBA8 => 4,
        }
    }
}

/// Error types for capture operations
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Failed to open source: {0}")]
    OpenFailed(String),

    #[error("Source is not open")]
    NotOpen,

    /// The source is open but could not hand over a usable frame
    #[error("Frame unavailable: {0}")]
    FrameUnavailable(String),
}

pub type CaptureResult<T> = Result<T, CaptureError>;
