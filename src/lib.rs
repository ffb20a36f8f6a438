//! Striae: forensic ballistic evidence correlation engine.
//!
//! Given a collected exam (a set of evidence scan files) the engine locates
//! and scores candidate matches from a large sample corpus, using a
//! similarity metric computed over precomputed signal signatures. It owns
//! the orchestration contracts only: signature lifecycle, type-compatible
//! batched candidate retrieval, clamp-and-aggregate scoring, idempotent
//! match persistence, and exam state/counter bookkeeping. The numeric
//! comparison itself and the storage engine live behind traits.
//!
//! # Public API Surface
//!
//! ## Data Model
//! - [`Exam`], [`Sample`], [`EvidenceFile`], [`MatchRecord`] - persisted entities
//! - [`ArtefactType`], [`ExamStatus`], [`SampleStatus`], [`MatchStatus`],
//!   [`WorkState`] - state enums
//!
//! ## Orchestration
//! - [`SignatureSyncer`] - batch signature generation for catalog samples
//! - [`ExamMatcher`], [`MatchPlan`] - batch exam-to-corpus matching
//! - [`BatchReport`], [`ItemOutcome`] - per-item batch outcomes
//!
//! ## Boundaries
//! - [`SignatureClient`] / [`HttpSignatureClient`] - external signature backend
//! - [`SampleStore`], [`ExamStore`], [`MatchStore`] - persistence collaborators
//! - [`ScoreBackend`], [`ScoreStrategy`] - delegated similarity computation
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - environment-backed settings
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod model;
pub mod pipeline;
pub mod scoring;
pub mod signature;
pub mod store;

pub use config::{Config, ConfigError, DEFAULT_BACKEND_URL, DEFAULT_PAGE_SIZE};
pub use model::{
    ArtefactType, EntityId, EvidenceFile, Exam, ExamStatus, MatchRecord, MatchStatus, Sample,
    SampleStatus, WorkState,
};
pub use pipeline::{
    BatchReport, ExamMatcher, ItemOutcome, ItemReport, MatchPlan, PipelineError, SignatureSyncer,
    SkipReason,
};
pub use scoring::{
    MAX_SCORE, MIN_SCORE, ScoreBackend, ScoreStrategy, ScoringError, StriationScore,
    aggregate_top_k, clamp_score,
};
#[cfg(any(test, feature = "mock"))]
pub use scoring::MockScoreBackend;
pub use signature::{HttpSignatureClient, SignatureAndResolution, SignatureClient, SignatureError};
#[cfg(any(test, feature = "mock"))]
pub use signature::MockSignatureClient;
pub use store::{ExamStore, MatchStore, SampleStore, StoreError};
#[cfg(any(test, feature = "mock"))]
pub use store::MockEvidenceStore;
