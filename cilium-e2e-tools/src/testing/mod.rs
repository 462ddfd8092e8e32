//! Fake command runner for exercising the lifecycle without real processes

mod recording;

pub use recording::RecordingRunner;
