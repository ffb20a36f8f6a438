//! Batch orchestration pipelines.
//!
//! Two sibling controllers drive the engine:
//!
//! - [`SignatureSyncer`] (re)generates signatures for a batch of catalog
//!   samples.
//! - [`ExamMatcher`] scores a batch of exams against the approved sample
//!   corpus and persists the match records.
//!
//! Both process each identifier independently: one bad sample or exam never
//! aborts the batch. Per-item outcomes are collected into a [`BatchReport`]
//! instead of being swallowed by a catch-and-log block, so failure data
//! stays inspectable.

pub mod error;
pub mod matching;
pub mod report;
pub mod sync;


pub use error::PipelineError;
pub use matching::{ExamMatcher, MatchPlan};
pub use report::{BatchReport, ItemOutcome, ItemReport, SkipReason};
pub use sync::SignatureSyncer;
