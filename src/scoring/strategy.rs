use crate::model::EvidenceFile;

use super::error::ScoringError;
use super::{MAX_SCORE, MIN_SCORE};

/// Delegated numeric comparison backend.
///
/// Implementations compare two evidence files and return a raw similarity
/// value. The engine does not interpret the number beyond the clamp
/// contract; how it is computed is the backend's business.
pub trait ScoreBackend: Send + Sync {
    /// Signature-based comparison used for striation artefacts.
    fn signature_similarity(
        &self,
        exam_file: &EvidenceFile,
        sample_file: &EvidenceFile,
    ) -> Result<f32, ScoringError>;

    /// CFF-max comparison used for breech-face artefacts.
    fn cff_max(
        &self,
        exam_file: &EvidenceFile,
        sample_file: &EvidenceFile,
    ) -> Result<f32, ScoringError>;
}

/// Clamp contract shared by both strategies: values outside the meaningful
/// range (or NaN) carry no usable signal and are reported as 0.0 rather
/// than rejected.
pub fn clamp_score(raw: f32) -> f32 {
    if raw.is_nan() || !(MIN_SCORE..=MAX_SCORE).contains(&raw) {
        0.0
    } else {
        raw
    }
}

/// Interchangeable scoring strategies, selected per artefact type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreStrategy {
    /// Precomputed-signature similarity (bullet striations).
    SignatureSimilarity,
    /// CFF maximum (breech faces).
    CffMax,
}

impl ScoreStrategy {
    /// Computes one clamped pairwise score via the given backend.
    pub fn score<B: ScoreBackend>(
        &self,
        backend: &B,
        exam_file: &EvidenceFile,
        sample_file: &EvidenceFile,
    ) -> Result<f32, ScoringError> {
        let raw = match self {
            ScoreStrategy::SignatureSimilarity => {
                backend.signature_similarity(exam_file, sample_file)?
            }
            ScoreStrategy::CffMax => backend.cff_max(exam_file, sample_file)?,
        };

        Ok(clamp_score(raw))
    }
}
