use crate::detection::domain::detection::Detection;
use crate::detection::domain::detection_engine::DetectionEngine;
use crate::shared::frame::Frame;

/// Adapts a closure into a [`DetectionEngine`].
///
/// Useful when the inference backend is a plain function, such as an FFI
/// shim or a canned response in tests.
pub struct ClosureEngine<F> {
    func: F,
}

impl<F> ClosureEngine<F>
where
    F: FnMut(&Frame, i64) -> Result<Vec<Detection>, Box<dyn std::error::Error>> + Send,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> DetectionEngine for ClosureEngine<F>
where
    F: FnMut(&Frame, i64) -> Result<Vec<Detection>, Box<dyn std::error::Error>> + Send,
{
    fn infer(
        &mut self,
        frame: &Frame,
        timestamp_ms: i64,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        (self.func)(frame, timestamp_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::bounding_box::BoundingBox;

    fn frame() -> Frame {
        Frame::new(vec![0u8; 8 * 8 * 3], 8, 8, 3)
    }

    #[test]
    fn test_returns_closure_output() {
        let canned = vec![Detection::new(BoundingBox::new(1, 2, 3, 4), 0.8)];
        let expected = canned.clone();
        let mut engine = ClosureEngine::new(move |_frame, _ts| Ok(canned.clone()));

        let result = engine.infer(&frame(), 0).unwrap();

        assert_eq!(result, expected);
    }

    #[test]
    fn test_receives_frame_and_timestamp() {
        let mut engine = ClosureEngine::new(|frame: &Frame, ts| {
            assert_eq!(frame.width(), 8);
            assert_eq!(ts, 42);
            Ok(vec![])
        });

        engine.infer(&frame(), 42).unwrap();
    }

    #[test]
    fn test_propagates_errors() {
        let mut engine = ClosureEngine::new(|_frame: &Frame, _ts| Err("model exploded".into()));

        let err = engine.infer(&frame(), 0).unwrap_err();

        assert_eq!(err.to_string(), "model exploded");
    }

    #[test]
    fn test_stateful_closure_mutates_between_calls() {
        let mut calls = 0u32;
        let mut engine = ClosureEngine::new(move |_frame: &Frame, _ts| {
            calls += 1;
            Ok(vec![Detection::new(
                BoundingBox::new(calls as i32, 0, 10, 10),
                0.9,
            )])
        });

        let first = engine.infer(&frame(), 1).unwrap();
        let second = engine.infer(&frame(), 2).unwrap();

        assert_eq!(first[0].bounding_box.x, 1);
        assert_eq!(second[0].bounding_box.x, 2);
    }
}
