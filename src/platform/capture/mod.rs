// Frame capture sources
// The tracker only depends on the CaptureSource trait; video decoding and
// camera access live in the host that implements it.

pub mod synthetic;

pub use synthetic::SyntheticCapture;

use crate::models::capture::{CaptureResult, RawFrame, SourceInfo};
use async_trait::async_trait;

/// A video file or camera feeding frames to the tracker
#[async_trait]
pub trait CaptureSource: Send + Sync {
    /// Acquire the source. Resolves once frames can be read.
    async fn open(&mut self) -> CaptureResult<SourceInfo>;

    /// Read the frame currently presented by the source
    async fn current_frame(&self) -> CaptureResult<RawFrame>;

    /// Human readable description, used in logs
    fn name(&self) -> String;
}
