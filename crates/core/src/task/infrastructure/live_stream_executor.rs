use std::sync::atomic::{AtomicI64, Ordering};
use std::thread::JoinHandle;

use crate::detection::domain::detection::DetectionResult;
use crate::detection::domain::detection_engine::DetectionEngine;
use crate::shared::frame::Frame;
use crate::task::error::{DetectionError, TimestampError};
use crate::task::face_detector::detect_frame;
use crate::task::options::ResultCallback;
use crate::task::ordered_delivery::OrderedDelivery;

/// A frame accepted for asynchronous detection.
struct Job {
    seq: u64,
    timestamp_ms: i64,
    frame: Frame,
}

/// A finished frame on its way to the callback.
struct Completion {
    seq: u64,
    timestamp_ms: i64,
    result: Result<DetectionResult, DetectionError>,
}

/// Runs live-stream detection on dedicated threads.
///
/// Layout: `submit → detect [owns engine] → deliver [owns callback]`
///
/// Inference runs off the caller's thread so `submit` returns immediately.
/// The delivery thread serializes callback invocations and feeds them
/// through an [`OrderedDelivery`] buffer, so frames are reported in
/// submission order even if completions arrive out of order.
pub(crate) struct LiveStreamExecutor {
    job_tx: Option<crossbeam_channel::Sender<Job>>,
    detect_handle: Option<JoinHandle<()>>,
    delivery_handle: Option<JoinHandle<()>>,
    last_timestamp_ms: AtomicI64,
    next_seq: u64,
}

impl LiveStreamExecutor {
    pub(crate) fn spawn(
        engine: Box<dyn DetectionEngine>,
        callback: ResultCallback,
        min_confidence: f32,
        min_suppression_threshold: f32,
    ) -> Self {
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<Job>();
        let (done_tx, done_rx) = crossbeam_channel::unbounded::<Completion>();

        let detect_handle = spawn_detect(
            engine,
            job_rx,
            done_tx,
            min_confidence,
            min_suppression_threshold,
        );
        let delivery_handle = spawn_delivery(callback, done_rx);

        Self {
            job_tx: Some(job_tx),
            detect_handle: Some(detect_handle),
            delivery_handle: Some(delivery_handle),
            last_timestamp_ms: AtomicI64::new(i64::MIN),
            next_seq: 0,
        }
    }

    /// Accepts the frame if its timestamp advances, then queues it without
    /// blocking. The accept-and-record step is a single atomic update, and
    /// a rejected frame is never queued.
    pub(crate) fn submit(&mut self, frame: Frame, timestamp_ms: i64) -> Result<(), DetectionError> {
        self.last_timestamp_ms
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last_ms| {
                (timestamp_ms > last_ms).then_some(timestamp_ms)
            })
            .map_err(|last_ms| TimestampError {
                last_ms,
                received_ms: timestamp_ms,
            })?;

        let job = Job {
            seq: self.next_seq,
            timestamp_ms,
            frame,
        };
        let sent = self
            .job_tx
            .as_ref()
            .map(|tx| tx.send(job).is_ok())
            .unwrap_or(false);
        if !sent {
            return Err(DetectionError::Engine(
                "detection thread is no longer running".into(),
            ));
        }
        self.next_seq += 1;
        Ok(())
    }

    /// Stops accepting work and drains: already-accepted frames still run
    /// detection and reach the callback before this returns.
    pub(crate) fn shutdown(mut self) {
        self.drain();
    }

    fn drain(&mut self) {
        // Dropping the job sender lets the detect thread run dry; dropping
        // its completion sender in turn lets delivery finish.
        self.job_tx.take();
        if let Some(handle) = self.detect_handle.take() {
            if handle.join().is_err() {
                log::warn!("detect thread panicked during shutdown");
            }
        }
        if let Some(handle) = self.delivery_handle.take() {
            if handle.join().is_err() {
                log::warn!("delivery thread panicked during shutdown");
            }
        }
    }
}

impl Drop for LiveStreamExecutor {
    fn drop(&mut self) {
        self.drain();
    }
}

fn spawn_detect(
    mut engine: Box<dyn DetectionEngine>,
    job_rx: crossbeam_channel::Receiver<Job>,
    done_tx: crossbeam_channel::Sender<Completion>,
    min_confidence: f32,
    min_suppression_threshold: f32,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        log::debug!("live-stream detect thread started");
        for job in job_rx {
            let result = detect_frame(
                engine.as_mut(),
                &job.frame,
                job.timestamp_ms,
                min_confidence,
                min_suppression_threshold,
            );
            let completion = Completion {
                seq: job.seq,
                timestamp_ms: job.timestamp_ms,
                result,
            };
            if done_tx.send(completion).is_err() {
                break;
            }
        }
        log::debug!("live-stream detect thread exiting");
    })
}

fn spawn_delivery(
    mut callback: ResultCallback,
    done_rx: crossbeam_channel::Receiver<Completion>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let mut reorder = OrderedDelivery::new();
        for completion in done_rx {
            let released = reorder.accept(
                completion.seq,
                (completion.timestamp_ms, completion.result),
            );
            for (timestamp_ms, result) in released {
                callback(timestamp_ms, result);
            }
        }
        log::debug!("live-stream delivery thread exiting");
    })
}
