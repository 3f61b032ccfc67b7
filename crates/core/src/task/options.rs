use crate::detection::domain::detection::DetectionResult;
use crate::task::error::{ConfigError, DetectionError};
use crate::task::running_mode::RunningMode;

/// Live-stream result sink: invoked once per accepted frame with the
/// frame's timestamp and either its detections or the failure that frame
/// hit. Runs on the task's delivery thread; invocations are serialized.
pub type ResultCallback = Box<dyn FnMut(i64, Result<DetectionResult, DetectionError>) + Send>;

/// Options for creating a face detection task.
///
/// Copied into the task at construction and immutable afterwards.
pub struct FaceDetectorOptions {
    pub running_mode: RunningMode,
    /// Minimum score for a detection to be kept. Defaults to 0.5.
    pub min_detection_confidence: f32,
    /// IoU above which a lower-scored overlapping detection is dropped.
    /// Defaults to 0.3.
    pub min_suppression_threshold: f32,
    /// Required in live-stream mode, forbidden in image and video modes.
    pub result_callback: Option<ResultCallback>,
}

impl Default for FaceDetectorOptions {
    fn default() -> Self {
        Self {
            running_mode: RunningMode::default(),
            min_detection_confidence: 0.5,
            min_suppression_threshold: 0.3,
            result_callback: None,
        }
    }
}

impl FaceDetectorOptions {
    /// Checks value ranges and the mode/callback pairing. Pure check, no
    /// side effects.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_detection_confidence) {
            return Err(ConfigError::ConfidenceOutOfRange(
                self.min_detection_confidence,
            ));
        }
        if !(0.0..=1.0).contains(&self.min_suppression_threshold) {
            return Err(ConfigError::SuppressionThresholdOutOfRange(
                self.min_suppression_threshold,
            ));
        }
        match (self.running_mode, self.result_callback.is_some()) {
            (RunningMode::LiveStream, false) => {
                Err(ConfigError::MissingResultCallback(RunningMode::LiveStream))
            }
            (RunningMode::Image | RunningMode::Video, true) => {
                Err(ConfigError::UnexpectedResultCallback(self.running_mode))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn options(mode: RunningMode) -> FaceDetectorOptions {
        FaceDetectorOptions {
            running_mode: mode,
            ..Default::default()
        }
    }

    fn noop_callback() -> ResultCallback {
        Box::new(|_ts, _result| {})
    }

    #[test]
    fn test_defaults() {
        let opts = FaceDetectorOptions::default();
        assert_eq!(opts.running_mode, RunningMode::Image);
        assert_eq!(opts.min_detection_confidence, 0.5);
        assert_eq!(opts.min_suppression_threshold, 0.3);
        assert!(opts.result_callback.is_none());
    }

    #[test]
    fn test_default_image_options_are_valid() {
        assert!(options(RunningMode::Image).validate().is_ok());
        assert!(options(RunningMode::Video).validate().is_ok());
    }

    #[rstest]
    #[case(-0.1)]
    #[case(1.1)]
    #[case(f32::NAN)]
    fn test_confidence_out_of_range(#[case] value: f32) {
        let opts = FaceDetectorOptions {
            min_detection_confidence: value,
            ..Default::default()
        };
        assert!(matches!(
            opts.validate(),
            Err(ConfigError::ConfidenceOutOfRange(_))
        ));
    }

    #[rstest]
    #[case(-0.01)]
    #[case(2.0)]
    #[case(f32::NAN)]
    fn test_suppression_threshold_out_of_range(#[case] value: f32) {
        let opts = FaceDetectorOptions {
            min_suppression_threshold: value,
            ..Default::default()
        };
        assert!(matches!(
            opts.validate(),
            Err(ConfigError::SuppressionThresholdOutOfRange(_))
        ));
    }

    #[test]
    fn test_thresholds_at_bounds_are_valid() {
        let opts = FaceDetectorOptions {
            min_detection_confidence: 0.0,
            min_suppression_threshold: 1.0,
            ..Default::default()
        };
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_live_stream_requires_callback() {
        assert_eq!(
            options(RunningMode::LiveStream).validate(),
            Err(ConfigError::MissingResultCallback(RunningMode::LiveStream))
        );
    }

    #[test]
    fn test_live_stream_with_callback_is_valid() {
        let opts = FaceDetectorOptions {
            running_mode: RunningMode::LiveStream,
            result_callback: Some(noop_callback()),
            ..Default::default()
        };
        assert!(opts.validate().is_ok());
    }

    #[rstest]
    #[case(RunningMode::Image)]
    #[case(RunningMode::Video)]
    fn test_synchronous_modes_forbid_callback(#[case] mode: RunningMode) {
        let opts = FaceDetectorOptions {
            running_mode: mode,
            result_callback: Some(noop_callback()),
            ..Default::default()
        };
        assert_eq!(
            opts.validate(),
            Err(ConfigError::UnexpectedResultCallback(mode))
        );
    }
}
