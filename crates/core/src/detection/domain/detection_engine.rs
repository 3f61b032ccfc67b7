use crate::detection::domain::detection::Detection;
use crate::shared::frame::Frame;

/// Port for the inference backend producing raw detections.
///
/// Implementations may be stateful (e.g., temporal smoothing across
/// frames), hence `&mut self`. A task owns its engine exclusively and never
/// invokes it concurrently; `Send` lets live-stream tasks move the engine
/// onto their detection thread.
///
/// `timestamp_ms` is non-decreasing across calls on one task instance.
/// Single-image tasks always pass 0.
pub trait DetectionEngine: Send {
    fn infer(
        &mut self,
        frame: &Frame,
        timestamp_ms: i64,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}
