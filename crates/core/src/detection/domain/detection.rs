use crate::shared::bounding_box::BoundingBox;

/// A landmark inside a detection, normalized to `[0,1]` of the input frame.
///
/// Face detection engines typically emit six of these per face (eyes, nose
/// tip, mouth center, ear tragions). Label and per-point score are optional
/// because not every model provides them.
#[derive(Clone, Debug, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub label: Option<String>,
    pub score: Option<f32>,
}

impl Keypoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            label: None,
            score: None,
        }
    }
}

/// One detected face: pixel-space bounding box, confidence score, and any
/// keypoints the engine produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub bounding_box: BoundingBox,
    pub score: f32,
    pub keypoints: Vec<Keypoint>,
}

impl Detection {
    pub fn new(bounding_box: BoundingBox, score: f32) -> Self {
        Self {
            bounding_box,
            score,
            keypoints: Vec::new(),
        }
    }

    pub fn with_keypoints(mut self, keypoints: Vec<Keypoint>) -> Self {
        self.keypoints = keypoints;
        self
    }
}

/// Detections surviving confidence filtering and suppression for one
/// invocation, ordered by descending score.
///
/// Synchronous calls return this to the caller; live-stream calls move it
/// into the result callback together with the frame's timestamp.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectionResult {
    pub detections: Vec<Detection>,
}

impl DetectionResult {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}
