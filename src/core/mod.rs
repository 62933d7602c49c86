pub mod config;
pub mod logging;

// Per-frame landmark normalization and geometry
pub mod landmark_pipeline;
pub mod geometry;

// Detection lifecycle
pub mod body_tracker;
pub mod frame_loop;
