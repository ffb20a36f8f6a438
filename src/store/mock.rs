use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::model::{
    ArtefactType, EntityId, Exam, ExamStatus, MatchRecord, Sample, SampleStatus, WorkState,
};

use super::error::StoreError;
use super::{ExamStore, MatchStore, SampleStore};

/// In-memory store implementing all three persistence traits.
///
/// Cloning is cheap (shared state), so one instance can be handed to an
/// orchestrator in every store role. BTreeMaps give a stable iteration
/// order, which makes offset pagination deterministic in tests.
#[derive(Clone, Default)]
pub struct MockEvidenceStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    samples: BTreeMap<EntityId, Sample>,
    exams: BTreeMap<EntityId, Exam>,
    matches: BTreeMap<(EntityId, EntityId), MatchRecord>,
}

impl MockEvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a sample.
    pub async fn insert_sample(&self, sample: Sample) {
        self.inner.write().await.samples.insert(sample.id, sample);
    }

    /// Seeds an exam.
    pub async fn insert_exam(&self, exam: Exam) {
        self.inner.write().await.exams.insert(exam.id, exam);
    }

    /// Current stored state of a sample.
    pub async fn sample(&self, id: EntityId) -> Option<Sample> {
        self.inner.read().await.samples.get(&id).cloned()
    }

    /// Current stored state of an exam.
    pub async fn exam(&self, id: EntityId) -> Option<Exam> {
        self.inner.read().await.exams.get(&id).cloned()
    }

    /// Number of persisted match records.
    pub async fn match_count(&self) -> usize {
        self.inner.read().await.matches.len()
    }

    /// Stored record for one (exam, sample) pair.
    pub async fn match_for(&self, exam_id: EntityId, sample_id: EntityId) -> Option<MatchRecord> {
        self.inner
            .read()
            .await
            .matches
            .get(&(exam_id, sample_id))
            .cloned()
    }
}

impl SampleStore for MockEvidenceStore {
    async fn find_sample(&self, id: EntityId) -> Result<Option<Sample>, StoreError> {
        Ok(self.inner.read().await.samples.get(&id).cloned())
    }

    async fn count_candidates(
        &self,
        status: SampleStatus,
        artefact_type: ArtefactType,
        groove_count: usize,
    ) -> Result<u64, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .samples
            .values()
            .filter(|s| {
                s.status == status
                    && s.artefact_type == artefact_type
                    && s.groove_count() == groove_count
            })
            .count() as u64)
    }

    async fn fetch_candidates(
        &self,
        status: SampleStatus,
        artefact_type: ArtefactType,
        groove_count: usize,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Sample>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .samples
            .values()
            .filter(|s| {
                s.status == status
                    && s.artefact_type == artefact_type
                    && s.groove_count() == groove_count
            })
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn save_sample(&self, sample: &Sample) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .samples
            .insert(sample.id, sample.clone());
        Ok(())
    }

    async fn write_sample_signature(
        &self,
        file_id: EntityId,
        signature: &[u8],
        resolution: f64,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let file = inner
            .samples
            .values_mut()
            .flat_map(|s| s.files.iter_mut())
            .find(|f| f.id == file_id)
            .ok_or(StoreError::UnknownFile { file_id })?;

        file.signature = Some(signature.to_vec());
        file.resolution = Some(resolution);
        Ok(())
    }
}

impl ExamStore for MockEvidenceStore {
    async fn find_exam(&self, id: EntityId) -> Result<Option<Exam>, StoreError> {
        Ok(self.inner.read().await.exams.get(&id).cloned())
    }

    async fn write_exam_signature(
        &self,
        file_id: EntityId,
        signature: &[u8],
        resolution: f64,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let file = inner
            .exams
            .values_mut()
            .flat_map(|e| e.files.iter_mut())
            .find(|f| f.id == file_id)
            .ok_or(StoreError::UnknownFile { file_id })?;

        file.signature = Some(signature.to_vec());
        file.resolution = Some(resolution);
        Ok(())
    }

    async fn set_total_matching_samples(
        &self,
        exam_id: EntityId,
        total: u64,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let exam = inner
            .exams
            .get_mut(&exam_id)
            .ok_or_else(|| StoreError::WriteFailed {
                entity: "exam".to_string(),
                message: format!("exam #{exam_id} not found"),
            })?;

        exam.total_matching_samples = total;
        Ok(())
    }

    async fn increase_matched_samples(&self, exam_id: EntityId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let exam = inner
            .exams
            .get_mut(&exam_id)
            .ok_or_else(|| StoreError::WriteFailed {
                entity: "exam".to_string(),
                message: format!("exam #{exam_id} not found"),
            })?;

        exam.matched_samples += 1;
        Ok(())
    }

    async fn update_status(&self, exam_id: EntityId, status: ExamStatus) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let exam = inner
            .exams
            .get_mut(&exam_id)
            .ok_or_else(|| StoreError::WriteFailed {
                entity: "exam".to_string(),
                message: format!("exam #{exam_id} not found"),
            })?;

        exam.status = status;
        Ok(())
    }

    async fn update_match_state(
        &self,
        exam_ids: &[EntityId],
        state: WorkState,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        for exam_id in exam_ids {
            if let Some(exam) = inner.exams.get_mut(exam_id) {
                exam.match_state = state;
            }
        }
        Ok(())
    }
}

impl MatchStore for MockEvidenceStore {
    async fn match_exists(
        &self,
        exam_id: EntityId,
        sample_id: EntityId,
    ) -> Result<bool, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .matches
            .contains_key(&(exam_id, sample_id)))
    }

    async fn insert_match(&self, record: MatchRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let key = (record.exam_id, record.sample_id);
        if inner.matches.contains_key(&key) {
            return Err(StoreError::DuplicateMatch {
                exam_id: record.exam_id,
                sample_id: record.sample_id,
            });
        }

        inner.matches.insert(key, record);
        Ok(())
    }
}
