/// Drives the tracker headlessly with a replayed recording
/// Run with: cargo run --example replay_tracker [recording.json]
///
/// Without a recording a short synthetic arm wave is generated.

use body_tracker::platform::{FixedDisplay, ReplayEstimator, SyntheticCapture};
use body_tracker::{
    direction_between, distance_between, init_logging, run_frame_loop, skeleton_segments,
    BodyTracker, Joint, Pose, RawKeypoint, RefreshTicker, TrackerConfig,
};
use std::sync::Arc;
use std::time::Duration;

fn wave(frames: usize) -> Vec<Vec<Pose>> {
    (0..frames)
        .map(|i| {
            let t = i as f32 / frames as f32 * std::f32::consts::TAU;
            let wrist_y = 160.0 + 60.0 * t.sin();
            vec![Pose {
                keypoints: vec![
                    RawKeypoint::new("nose", 320.0, 100.0, 0.98),
                    RawKeypoint::new("mouth_left", 330.0, 125.0, 0.95),
                    RawKeypoint::new("mouth_right", 310.0, 125.0, 0.95),
                    RawKeypoint::new("left_shoulder", 380.0, 180.0, 0.97),
                    RawKeypoint::new("right_shoulder", 260.0, 180.0, 0.97),
                    RawKeypoint::new("left_elbow", 440.0, 200.0, 0.9),
                    RawKeypoint::new("left_wrist", 500.0, wrist_y, 0.85),
                    RawKeypoint::new("left_hip", 360.0, 330.0, 0.9),
                    RawKeypoint::new("right_hip", 280.0, 330.0, 0.9),
                    // Occluded this frame
                    RawKeypoint::new("right_elbow", 200.0, 200.0, 0.4),
                ],
            }]
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = TrackerConfig::default();
    init_logging(config.log_level);

    let estimator = match std::env::args().nth(1) {
        Some(path) => ReplayEstimator::from_file(path),
        None => ReplayEstimator::from_frames(wave(30)),
    };

    let capture = SyntheticCapture::from_source(&config.source)?;
    let ticker = Arc::new(RefreshTicker::with_frame_interval(Duration::from_millis(16)));
    let tracker = BodyTracker::new(
        config,
        Box::new(capture),
        Box::new(estimator),
        Arc::new(FixedDisplay::new(1280.0, 960.0)),
        ticker.clone(),
    )?;

    let mut snapshots = tracker.subscribe();
    let printer = async {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            let forearm = direction_between(
                snapshot.get(Joint::LeftElbow),
                snapshot.get(Joint::LeftWrist),
            );
            let shoulders = distance_between(
                snapshot.get(Joint::LeftShoulder),
                snapshot.get(Joint::RightShoulder),
            );
            println!(
                "{} landmarks, {} segments, shoulder width {:.1}, forearm direction {:+.2}",
                snapshot.len(),
                skeleton_segments(&snapshot).len(),
                shoulders,
                forearm
            );
        }
    };

    tracker.start().await;

    let shutdown = tokio::time::sleep(Duration::from_secs(1));
    let stats = tokio::select! {
        stats = run_frame_loop(&tracker, &ticker, shutdown) => stats,
        _ = printer => return Ok(()),
    };

    println!(
        "\nPublished {} frames ({} failed, {} skipped)",
        stats.published, stats.failed, stats.skipped
    );
    println!("Status: {}", serde_json::to_string_pretty(&tracker.status().await)?);

    Ok(())
}
