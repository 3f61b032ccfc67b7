//! Error types for the face detection task.

use thiserror::Error;

use crate::task::running_mode::RunningMode;

/// Rejected options at construction time. No task is produced.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("min_detection_confidence must be in [0.0, 1.0], got {0}")]
    ConfidenceOutOfRange(f32),
    #[error("min_suppression_threshold must be in [0.0, 1.0], got {0}")]
    SuppressionThresholdOutOfRange(f32),
    #[error("running mode {0} requires a result callback")]
    MissingResultCallback(RunningMode),
    #[error("running mode {0} does not accept a result callback")]
    UnexpectedResultCallback(RunningMode),
}

/// Non-monotonic timestamp. Only the offending call is rejected; the task
/// stays usable and its last accepted timestamp is unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("timestamp {received_ms} ms is not greater than the last accepted timestamp {last_ms} ms")]
pub struct TimestampError {
    pub last_ms: i64,
    pub received_ms: i64,
}

/// Operation invoked on a closed task, or in the wrong running mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("task is closed")]
    TaskClosed,
    #[error("{operation} requires running mode {required}, but the task was created in {actual} mode")]
    WrongMode {
        operation: &'static str,
        required: RunningMode,
        actual: RunningMode,
    },
}

/// Per-invocation failure of a detect operation.
///
/// Synchronous calls return this directly; live-stream calls return the
/// pre-enqueue cases and deliver engine failures through the result
/// callback, tagged with the frame's timestamp.
#[derive(Error, Debug, PartialEq)]
pub enum DetectionError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
    #[error("detection engine failed: {0}")]
    Engine(String),
}
