use std::collections::HashMap;
use std::sync::RwLock;

use crate::model::EvidenceFile;

use super::error::ScoringError;
use super::strategy::ScoreBackend;

/// Scriptable [`ScoreBackend`] for tests.
///
/// Raw scores are keyed by (exam path, sample path); unknown pairs fall
/// back to a uniform default. Values are returned unclamped so tests can
/// exercise the clamp contract.
pub struct MockScoreBackend {
    default_score: f32,
    by_pair: RwLock<HashMap<(String, String), f32>>,
}

impl MockScoreBackend {
    /// Backend answering every pair with `default_score`.
    pub fn uniform(default_score: f32) -> Self {
        Self {
            default_score,
            by_pair: RwLock::new(HashMap::new()),
        }
    }

    /// Scripts a raw score for one (exam path, sample path) pair.
    pub fn set_pair(&self, exam_path: &str, sample_path: &str, raw_score: f32) {
        if let Ok(mut by_pair) = self.by_pair.write() {
            by_pair.insert((exam_path.to_string(), sample_path.to_string()), raw_score);
        }
    }

    fn lookup(&self, exam_file: &EvidenceFile, sample_file: &EvidenceFile) -> f32 {
        self.by_pair
            .read()
            .ok()
            .and_then(|by_pair| {
                by_pair
                    .get(&(exam_file.file_path.clone(), sample_file.file_path.clone()))
                    .copied()
            })
            .unwrap_or(self.default_score)
    }
}

impl ScoreBackend for MockScoreBackend {
    fn signature_similarity(
        &self,
        exam_file: &EvidenceFile,
        sample_file: &EvidenceFile,
    ) -> Result<f32, ScoringError> {
        Ok(self.lookup(exam_file, sample_file))
    }

    fn cff_max(
        &self,
        exam_file: &EvidenceFile,
        sample_file: &EvidenceFile,
    ) -> Result<f32, ScoringError> {
        Ok(self.lookup(exam_file, sample_file))
    }
}
