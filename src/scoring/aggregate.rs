use std::cmp::Ordering;

use crate::model::EntityId;

/// Transient pairing of one exam-file/sample-file comparison with its score.
///
/// Exists only during multi-groove aggregation; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StriationScore {
    pub exam_file_id: EntityId,
    pub sample_file_id: EntityId,
    pub score: f32,
}

/// Aggregates a multi-groove comparison: sort pairwise scores descending,
/// keep the top `groove_count`, return their arithmetic mean.
///
/// An empty candidate list aggregates to 0.0.
pub fn aggregate_top_k(mut scores: Vec<StriationScore>, groove_count: usize) -> f32 {
    if scores.is_empty() || groove_count == 0 {
        return 0.0;
    }

    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scores.truncate(groove_count);

    let sum: f32 = scores.iter().map(|s| s.score).sum();
    sum / scores.len() as f32
}
