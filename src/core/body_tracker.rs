use crate::core::config::TrackerConfig;
use crate::core::landmark_pipeline::{build_snapshot, FrameTransform};
use crate::models::capture::{CaptureError, SourceInfo};
use crate::models::pose::{FrameSnapshot, TrackerResult};
use crate::platform::capture::CaptureSource;
use crate::platform::display::{DisplaySurface, RefreshScheduler};
use crate::platform::pose::PoseEstimator;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{debug, error, info, warn};

// ==============================================================================
// Status
// ==============================================================================

/// Result of one detection cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A resource is not ready yet, or another cycle is still running;
    /// nothing was published or re-armed
    Skipped,
    /// A new snapshot was published
    Published { landmarks: usize },
    /// Frame read or inference failed; the previous snapshot stays published
    Failed,
}

/// Tracker status for hosts and UI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerStatus {
    pub started: bool,
    pub capture_ready: bool,
    pub detector_ready: bool,
    pub source: Option<SourceInfo>,
    pub cycles_published: u64,
    pub cycles_failed: u64,
}

#[derive(Debug, Default)]
struct TrackerState {
    status: TrackerStatus,
    armed: bool,
}

enum Resource {
    Capture(SourceInfo),
    Detector,
}

// ==============================================================================
// Body Tracker
// ==============================================================================

/// Runs the detect -> normalize -> publish cycle once both the capture source
/// and the pose estimator are ready.
///
/// The tracker never loops on its own. Each completed cycle asks the
/// `RefreshScheduler` for one more refresh, and the host calls `run_cycle()`
/// when that refresh comes. Stopping the host's refresh ticks stops tracking.
pub struct BodyTracker {
    config: TrackerConfig,
    capture: Mutex<Box<dyn CaptureSource>>,
    estimator: Mutex<Box<dyn PoseEstimator>>,
    display: Arc<dyn DisplaySurface>,
    scheduler: Arc<dyn RefreshScheduler>,
    state: RwLock<TrackerState>,
    in_flight: AtomicBool,
    snapshot_tx: watch::Sender<Arc<FrameSnapshot>>,
}

/// Clears the in-flight flag when a cycle ends, even if it was cancelled
struct CycleGuard<'a>(&'a AtomicBool);

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl BodyTracker {
    pub fn new(
        config: TrackerConfig,
        capture: Box<dyn CaptureSource>,
        estimator: Box<dyn PoseEstimator>,
        display: Arc<dyn DisplaySurface>,
        scheduler: Arc<dyn RefreshScheduler>,
    ) -> TrackerResult<Self> {
        config.validate()?;

        let (snapshot_tx, _) = watch::channel(Arc::new(FrameSnapshot::empty(0)));

        Ok(Self {
            config,
            capture: Mutex::new(capture),
            estimator: Mutex::new(estimator),
            display,
            scheduler,
            state: RwLock::new(TrackerState::default()),
            in_flight: AtomicBool::new(false),
            snapshot_tx,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Acquire the capture source and load the estimator concurrently.
    ///
    /// Only the first call does anything. Load failures are logged, and the
    /// tracker then simply never starts its cycle.
    pub async fn start(&self) {
        {
            let mut state = self.state.write().await;
            if state.status.started {
                warn!("Body tracker already started, ignoring");
                return;
            }
            state.status.started = true;
        }

        tokio::join!(self.acquire_capture(), self.load_estimator());
    }

    async fn acquire_capture(&self) {
        let (name, result) = {
            let mut capture = self.capture.lock().await;
            info!("Loading capture source: {}", capture.name());
            let result = capture.open().await;
            (capture.name(), result)
        };

        match result {
            Ok(source) => {
                info!(width = source.width, height = source.height, "Capture source loaded: {}", name);
                self.mark_ready(Resource::Capture(source)).await;
            }
            Err(e) => error!("Failed to open capture source {}: {}", name, e),
        }
    }

    async fn load_estimator(&self) {
        let (info, result) = {
            let mut estimator = self.estimator.lock().await;
            let result = estimator.load(&self.config.model).await;
            (estimator.model_info(), result)
        };

        match result {
            Ok(()) => {
                info!("Detector loaded: {}", info);
                self.mark_ready(Resource::Detector).await;
            }
            Err(e) => error!("Failed to load detector {}: {}", info, e),
        }
    }

    /// Record a readiness signal and arm the first cycle once both are in
    async fn mark_ready(&self, resource: Resource) {
        let arm = {
            let mut state = self.state.write().await;
            match resource {
                Resource::Capture(source) => {
                    state.status.capture_ready = true;
                    state.status.source = Some(source);
                }
                Resource::Detector => state.status.detector_ready = true,
            }

            let both = state.status.capture_ready && state.status.detector_ready;
            if both && !state.armed {
                state.armed = true;
                true
            } else {
                false
            }
        };

        if arm {
            info!("Capture and detector ready, starting detection");
            self.scheduler.request_refresh();
        }
    }

    /// Run one detection cycle.
    ///
    /// Unless skipped, the cycle requests exactly one further refresh whether
    /// it published or failed. Call it once per requested refresh; a call made
    /// while another cycle is still running is skipped, so one refresh never
    /// arms two cycles.
    pub async fn run_cycle(&self) -> CycleOutcome {
        {
            let state = self.state.read().await;
            if !state.status.capture_ready || !state.status.detector_ready {
                debug!("Resources not ready, skipping cycle");
                return CycleOutcome::Skipped;
            }
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Cycle already in flight, skipping");
            return CycleOutcome::Skipped;
        }
        let guard = CycleGuard(&self.in_flight);

        let outcome = match self.detect().await {
            Ok(snapshot) => {
                let landmarks = snapshot.len();
                self.snapshot_tx.send_replace(Arc::new(snapshot));
                self.state.write().await.status.cycles_published += 1;
                CycleOutcome::Published { landmarks }
            }
            Err(e) => {
                error!("Error detecting pose: {}", e);
                self.state.write().await.status.cycles_failed += 1;
                CycleOutcome::Failed
            }
        };

        drop(guard);
        self.scheduler.request_refresh();
        outcome
    }

    async fn detect(&self) -> TrackerResult<FrameSnapshot> {
        // Held for the whole cycle so cycles never overlap
        let estimator = self.estimator.lock().await;

        let frame = self.capture.lock().await.current_frame().await?;
        if frame.data.len() < frame.expected_len() {
            return Err(CaptureError::FrameUnavailable(format!(
                "truncated frame: {} of {} bytes",
                frame.data.len(),
                frame.expected_len()
            ))
            .into());
        }

        let transform = FrameTransform::between(
            frame.width,
            frame.height,
            self.display.width(),
            self.display.height(),
            self.config.flip(),
            self.config.threshold(),
        )?;

        let poses = estimator
            .estimate_poses(&frame, self.config.enable_smoothing)
            .await?;
        let keypoints = poses
            .first()
            .map(|pose| pose.keypoints.as_slice())
            .unwrap_or(&[]);

        Ok(build_snapshot(keypoints, &transform, frame.timestamp))
    }

    /// The most recently published snapshot
    pub fn snapshot(&self) -> Arc<FrameSnapshot> {
        self.snapshot_tx.borrow().clone()
    }

    /// Receiver that observes every newly published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<FrameSnapshot>> {
        self.snapshot_tx.subscribe()
    }

    pub async fn status(&self) -> TrackerStatus {
        self.state.read().await.status.clone()
    }
}
