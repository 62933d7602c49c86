// Collaborator seams: capture sources, pose estimators and the display surface

pub mod capture;
pub mod display;
pub mod pose;

pub use capture::{CaptureSource, SyntheticCapture};
pub use display::{DisplaySurface, FixedDisplay, RefreshScheduler};
pub use pose::{PoseEstimator, ReplayEstimator};
