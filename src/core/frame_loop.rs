// Host-side driver: turns refresh requests into tracker cycles

use crate::core::body_tracker::{BodyTracker, CycleOutcome};
use crate::platform::display::RefreshScheduler;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Notify;

/// Refresh scheduler for hosts without a display loop.
///
/// Requests coalesce: any number of calls before the next tick arm a single
/// cycle. An optional frame interval emulates the wait for the next display
/// refresh.
#[derive(Debug, Default)]
pub struct RefreshTicker {
    notify: Notify,
    frame_interval: Option<Duration>,
}

impl RefreshTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticker that waits `interval` after each request, e.g. 16ms for 60Hz
    pub fn with_frame_interval(interval: Duration) -> Self {
        Self {
            notify: Notify::new(),
            frame_interval: Some(interval),
        }
    }

    /// Wait for the next requested refresh
    pub async fn tick(&self) {
        self.notify.notified().await;
        if let Some(interval) = self.frame_interval {
            tokio::time::sleep(interval).await;
        }
    }
}

impl RefreshScheduler for RefreshTicker {
    fn request_refresh(&self) {
        self.notify.notify_one();
    }
}

/// Cycle counts from one run of the frame loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameLoopStats {
    pub published: u64,
    pub failed: u64,
    pub skipped: u64,
}

/// Run a tracker cycle on every requested refresh until `shutdown` resolves.
///
/// `ticker` must be the scheduler the tracker was built with.
pub async fn run_frame_loop<F>(tracker: &BodyTracker, ticker: &RefreshTicker, shutdown: F) -> FrameLoopStats
where
    F: Future<Output = ()>,
{
    let mut stats = FrameLoopStats::default();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                match tracker.run_cycle().await {
                    CycleOutcome::Published { .. } => stats.published += 1,
                    CycleOutcome::Failed => stats.failed += 1,
                    CycleOutcome::Skipped => stats.skipped += 1,
                }
            }
        }
    }

    tracing::debug!(
        published = stats.published,
        failed = stats.failed,
        skipped = stats.skipped,
        "frame loop stopped"
    );
    stats
}
