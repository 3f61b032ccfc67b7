use crate::detection::domain::detection::DetectionResult;
use crate::detection::domain::detection_engine::DetectionEngine;
use crate::detection::domain::suppression;
use crate::shared::frame::Frame;
use crate::task::error::{ConfigError, DetectionError, LifecycleError, TimestampError};
use crate::task::infrastructure::live_stream_executor::LiveStreamExecutor;
use crate::task::options::FaceDetectorOptions;
use crate::task::running_mode::RunningMode;

/// Face detection task bound to one running mode for its lifetime.
///
/// Owns the detection engine exclusively; inference is never invoked
/// concurrently. In live-stream mode the engine moves onto a dedicated
/// detection thread and results reach the options callback in submission
/// order.
pub struct FaceDetector {
    running_mode: RunningMode,
    min_detection_confidence: f32,
    min_suppression_threshold: f32,
    state: TaskState,
}

/// Lifecycle and mode folded into one tagged state, so each operation's
/// validity is a single match on the active variant.
enum TaskState {
    Image {
        engine: Box<dyn DetectionEngine>,
    },
    Video {
        engine: Box<dyn DetectionEngine>,
        last_timestamp_ms: Option<i64>,
    },
    LiveStream {
        executor: LiveStreamExecutor,
    },
    Closed,
}

impl FaceDetector {
    /// Validates `options` and binds `engine` into a ready task.
    ///
    /// The engine is constructed by the host, so its initialization
    /// failures surface before this call; `new` itself only rejects bad
    /// options. Live-stream tasks spawn their detection and delivery
    /// threads here.
    pub fn new(
        options: FaceDetectorOptions,
        engine: Box<dyn DetectionEngine>,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let FaceDetectorOptions {
            running_mode,
            min_detection_confidence,
            min_suppression_threshold,
            result_callback,
        } = options;

        let state = match running_mode {
            RunningMode::Image => TaskState::Image { engine },
            RunningMode::Video => TaskState::Video {
                engine,
                last_timestamp_ms: None,
            },
            RunningMode::LiveStream => {
                // validate() guarantees the callback is present here.
                let callback = result_callback
                    .ok_or(ConfigError::MissingResultCallback(RunningMode::LiveStream))?;
                TaskState::LiveStream {
                    executor: LiveStreamExecutor::spawn(
                        engine,
                        callback,
                        min_detection_confidence,
                        min_suppression_threshold,
                    ),
                }
            }
        };

        log::debug!("face detection task created in {running_mode} mode");
        Ok(Self {
            running_mode,
            min_detection_confidence,
            min_suppression_threshold,
            state,
        })
    }

    pub fn running_mode(&self) -> RunningMode {
        self.running_mode
    }

    /// Synchronous detection on a single image. Image mode only.
    pub fn detect(&mut self, frame: &Frame) -> Result<DetectionResult, DetectionError> {
        let min_confidence = self.min_detection_confidence;
        let min_suppression = self.min_suppression_threshold;
        match &mut self.state {
            TaskState::Image { engine } => {
                detect_frame(engine.as_mut(), frame, 0, min_confidence, min_suppression)
            }
            TaskState::Closed => Err(LifecycleError::TaskClosed.into()),
            _ => Err(wrong_mode("detect", RunningMode::Image, self.running_mode)),
        }
    }

    /// Synchronous detection on one decoded video frame. Video mode only.
    ///
    /// `timestamp_ms` must be strictly greater than the timestamp of the
    /// previous accepted call on this task.
    pub fn detect_for_video(
        &mut self,
        frame: &Frame,
        timestamp_ms: i64,
    ) -> Result<DetectionResult, DetectionError> {
        let min_confidence = self.min_detection_confidence;
        let min_suppression = self.min_suppression_threshold;
        match &mut self.state {
            TaskState::Video {
                engine,
                last_timestamp_ms,
            } => {
                if let Some(last_ms) = *last_timestamp_ms {
                    if timestamp_ms <= last_ms {
                        return Err(TimestampError {
                            last_ms,
                            received_ms: timestamp_ms,
                        }
                        .into());
                    }
                }
                *last_timestamp_ms = Some(timestamp_ms);
                detect_frame(
                    engine.as_mut(),
                    frame,
                    timestamp_ms,
                    min_confidence,
                    min_suppression,
                )
            }
            TaskState::Closed => Err(LifecycleError::TaskClosed.into()),
            _ => Err(wrong_mode(
                "detect_for_video",
                RunningMode::Video,
                self.running_mode,
            )),
        }
    }

    /// Non-blocking live-stream submission. LiveStream mode only.
    ///
    /// On success the frame is queued and its result (or error) reaches the
    /// options callback later, tagged with `timestamp_ms`. Timestamp
    /// violations fail here, before anything is queued, and produce no
    /// callback.
    pub fn detect_async(&mut self, frame: Frame, timestamp_ms: i64) -> Result<(), DetectionError> {
        match &mut self.state {
            TaskState::LiveStream { executor } => executor.submit(frame, timestamp_ms),
            TaskState::Closed => Err(LifecycleError::TaskClosed.into()),
            _ => Err(wrong_mode(
                "detect_async",
                RunningMode::LiveStream,
                self.running_mode,
            )),
        }
    }

    /// Shuts the task down and releases the engine.
    ///
    /// Live-stream tasks drain first: every accepted frame still resolves
    /// through the callback before this returns, and no callback fires
    /// afterwards. All later calls, including a second `close`, fail with
    /// [`LifecycleError`].
    pub fn close(&mut self) -> Result<(), LifecycleError> {
        match std::mem::replace(&mut self.state, TaskState::Closed) {
            TaskState::Closed => Err(LifecycleError::TaskClosed),
            TaskState::LiveStream { executor } => {
                executor.shutdown();
                log::debug!("face detection task closed");
                Ok(())
            }
            TaskState::Image { .. } | TaskState::Video { .. } => {
                log::debug!("face detection task closed");
                Ok(())
            }
        }
    }
}

fn wrong_mode(
    operation: &'static str,
    required: RunningMode,
    actual: RunningMode,
) -> DetectionError {
    LifecycleError::WrongMode {
        operation,
        required,
        actual,
    }
    .into()
}

/// Per-frame pipeline shared by all running modes: engine inference, then
/// confidence filtering and non-max suppression.
pub(crate) fn detect_frame(
    engine: &mut dyn DetectionEngine,
    frame: &Frame,
    timestamp_ms: i64,
    min_confidence: f32,
    min_suppression_threshold: f32,
) -> Result<DetectionResult, DetectionError> {
    let raw = engine
        .infer(frame, timestamp_ms)
        .map_err(|e| DetectionError::Engine(e.to_string()))?;
    Ok(DetectionResult::new(suppression::suppress_detections(
        raw,
        min_confidence,
        min_suppression_threshold,
    )))
}
