//! Core data model for exams, samples, evidence files and match records.
//!
//! Entities are owned by the persistence layer ([`crate::store`]); the
//! orchestrators in [`crate::pipeline`] mutate them only through explicit
//! store calls, never implicitly.


use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier type shared by exams, samples, evidence files and users of the
/// surrounding system.
pub type EntityId = u64;

/// Physical artefact class of a scan. Drives which comparison strategy and
/// aggregation path is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtefactType {
    /// Cartridge-case breech face impression.
    BreechFace,
    /// Bullet land/groove striation.
    BulletStriation,
}

/// Review status of a catalog sample. Only `Approved` samples take part in
/// signature generation and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleStatus {
    New,
    Approved,
    Rejected,
}

/// Lifecycle status of an exam. `Processed` is the terminal state reached
/// once a matching run completed for the exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamStatus {
    Pending,
    Processed,
}

/// Classification of a persisted match record. Records are created as
/// `NoMatch` and reclassified later by an examiner, never by this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    NoMatch,
}

/// Explicit progress state for long-running per-entity work (signature
/// syncing, matching).
///
/// `InProgress` is guaranteed to be exited to `Done` or `Failed` on every
/// path through an orchestrator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkState {
    Idle,
    InProgress,
    Done,
    Failed,
}

impl WorkState {
    /// Returns `true` while a run owns the entity.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, WorkState::InProgress)
    }
}

/// One evidence scan file attached to an exam or sample.
///
/// `signature` is the opaque feature encoding produced by the external
/// backend; `None` (or empty) means "not yet generated". `resolution` is
/// numeric metadata paired with the signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceFile {
    pub id: EntityId,
    /// Owning exam or sample. Lookup only, not ownership.
    pub owner_id: EntityId,
    /// Reference to the externally stored scan data.
    pub file_path: String,
    pub artefact_type: ArtefactType,
    pub signature: Option<Vec<u8>>,
    pub resolution: Option<f64>,
}

impl EvidenceFile {
    /// Returns `true` if a non-empty signature has been generated.
    ///
    /// Generation is memoized on this predicate: once it holds, the
    /// signature backend is never invoked again for this file.
    pub fn has_signature(&self) -> bool {
        self.signature.as_ref().is_some_and(|s| !s.is_empty())
    }
}

/// A catalog evidence item available as a match candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub id: EntityId,
    pub status: SampleStatus,
    pub artefact_type: ArtefactType,
    pub sync_state: WorkState,
    pub files: Vec<EvidenceFile>,
    /// Stamped when a signature sync run completed without any file-level
    /// error.
    pub synced_at: Option<DateTime<Utc>>,
}

impl Sample {
    /// Number of evidence files; two items are comparable only when their
    /// groove counts match.
    pub fn groove_count(&self) -> usize {
        self.files.len()
    }
}

/// An evidence submission to be matched against the sample corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: EntityId,
    pub status: ExamStatus,
    pub artefact_type: ArtefactType,
    pub match_state: WorkState,
    pub files: Vec<EvidenceFile>,
    /// Candidates matched so far. Advanced through
    /// [`crate::store::ExamStore::increase_matched_samples`] only.
    pub matched_samples: u64,
    /// Candidate corpus size, recomputed at the start of each matching run.
    pub total_matching_samples: u64,
}

impl Exam {
    pub fn groove_count(&self) -> usize {
        self.files.len()
    }
}

/// Persisted outcome of comparing one exam against one sample.
///
/// Append-only: created at most once per (exam, sample) pair and never
/// updated by this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub exam_id: EntityId,
    pub sample_id: EntityId,
    /// Aggregate similarity score in [-1.0, 1.0].
    pub score: f32,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
}
