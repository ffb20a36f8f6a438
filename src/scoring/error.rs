use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by score computation.
pub enum ScoringError {
    /// The delegated backend could not compute a score for the pair.
    #[error("score computation failed for '{exam_file}' vs '{sample_file}': {reason}")]
    ComputationFailed {
        /// Exam-side scan path.
        exam_file: String,
        /// Sample-side scan path.
        sample_file: String,
        /// Backend failure description.
        reason: String,
    },
}
