//! Persistence boundary for exams, samples and match records.
//!
//! The engine never owns storage; it talks to these traits. "Not found" is
//! always an `Ok(None)`, never an error. Signature writes are write-through
//! (committed immediately) so partial batch progress survives a later
//! failure. Match inserts are append-only and reject duplicates, which keeps
//! the check-then-insert sequence in the matcher safe even if callers run
//! exams concurrently.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use error::StoreError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEvidenceStore;

use crate::model::{
    ArtefactType, EntityId, Exam, ExamStatus, MatchRecord, Sample, SampleStatus, WorkState,
};

/// Read/write access to catalog samples and their evidence files.
pub trait SampleStore: Send + Sync {
    /// Looks a sample up by id.
    fn find_sample(
        &self,
        id: EntityId,
    ) -> impl std::future::Future<Output = Result<Option<Sample>, StoreError>> + Send;

    /// Counts samples matching (status, artefact type, groove count).
    fn count_candidates(
        &self,
        status: SampleStatus,
        artefact_type: ArtefactType,
        groove_count: usize,
    ) -> impl std::future::Future<Output = Result<u64, StoreError>> + Send;

    /// Returns one page of samples matching (status, artefact type, groove
    /// count), at most `limit` entries starting at `offset`.
    ///
    /// An empty result signals exhaustion. No ordering is guaranteed beyond
    /// "not previously returned for a strictly increasing offset sequence
    /// within one run"; the underlying set may change between pages.
    fn fetch_candidates(
        &self,
        status: SampleStatus,
        artefact_type: ArtefactType,
        groove_count: usize,
        limit: usize,
        offset: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Sample>, StoreError>> + Send;

    /// Persists the full sample record (status, state, stamps, files).
    fn save_sample(
        &self,
        sample: &Sample,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Write-through persistence of one sample file's signature and
    /// resolution, committed immediately.
    fn write_sample_signature(
        &self,
        file_id: EntityId,
        signature: &[u8],
        resolution: f64,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

/// Read/write access to exams and their evidence files.
pub trait ExamStore: Send + Sync {
    /// Looks an exam up by id.
    fn find_exam(
        &self,
        id: EntityId,
    ) -> impl std::future::Future<Output = Result<Option<Exam>, StoreError>> + Send;

    /// Write-through persistence of one exam file's signature and resolution.
    fn write_exam_signature(
        &self,
        file_id: EntityId,
        signature: &[u8],
        resolution: f64,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Persists the recomputed candidate corpus size for an exam.
    fn set_total_matching_samples(
        &self,
        exam_id: EntityId,
        total: u64,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Atomic counter bump for the exam's matched-sample count.
    fn increase_matched_samples(
        &self,
        exam_id: EntityId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Updates the exam status without touching the rest of the record.
    fn update_status(
        &self,
        exam_id: EntityId,
        status: ExamStatus,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Updates the matching work state for a set of exams.
    fn update_match_state(
        &self,
        exam_ids: &[EntityId],
        state: WorkState,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

/// Append-only storage for match records.
pub trait MatchStore: Send + Sync {
    /// Returns `true` if a record for (exam, sample) already exists.
    fn match_exists(
        &self,
        exam_id: EntityId,
        sample_id: EntityId,
    ) -> impl std::future::Future<Output = Result<bool, StoreError>> + Send;

    /// Inserts a new record. Fails with [`StoreError::DuplicateMatch`] if a
    /// record for the same (exam, sample) pair is already present.
    fn insert_match(
        &self,
        record: MatchRecord,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
