//! Confidence filtering and greedy non-max suppression.

use std::cmp::Ordering;

use crate::detection::domain::detection::Detection;

/// Filters raw engine output and resolves overlapping detections.
///
/// Detections scoring below `min_confidence` are dropped. Survivors are
/// sorted by descending score (equal scores keep the engine's emission
/// order), then greedily kept: a candidate survives only if its IoU with
/// every previously kept detection is at or below
/// `min_suppression_threshold`. The returned order is score-descending.
pub fn suppress_detections(
    detections: Vec<Detection>,
    min_confidence: f32,
    min_suppression_threshold: f32,
) -> Vec<Detection> {
    let mut candidates: Vec<Detection> = detections
        .into_iter()
        .filter(|d| d.score >= min_confidence)
        .collect();

    // Stable sort, so the tie-break on equal scores is emission order.
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut kept: Vec<Detection> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let dominated = kept
            .iter()
            .any(|k| k.bounding_box.iou(&candidate.bounding_box) > min_suppression_threshold as f64);
        if !dominated {
            kept.push(candidate);
        }
    }
    kept
}
