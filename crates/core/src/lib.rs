//! Face detection task orchestration.
//!
//! A [`task::face_detector::FaceDetector`] binds an inference engine to one
//! running mode (single image, offline video, or live stream), applies
//! confidence filtering and non-max suppression to raw engine output, and
//! in live-stream mode delivers results through a callback in submission
//! order. The engine itself is a host-supplied implementation of
//! [`detection::domain::detection_engine::DetectionEngine`].

pub mod detection;
pub mod shared;
pub mod task;
