// Data models for frame capture and body tracking

pub mod capture;
pub mod pose;
