//! Similarity scoring: strategy dispatch, the clamp contract, and top-k
//! aggregation for multi-groove striation sets.
//!
//! The numeric comparison itself is delegated to an external backend behind
//! [`ScoreBackend`]; this module only owns the orchestration contract: every
//! raw score outside [`MIN_SCORE`]..=[`MAX_SCORE`] (and NaN) is reported as
//! 0.0 ("no usable signal"), and a multi-groove aggregate is the arithmetic
//! mean of the top `groove_count` pairwise scores.

pub mod aggregate;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use aggregate::{StriationScore, aggregate_top_k};
pub use error::ScoringError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockScoreBackend;
pub use strategy::{ScoreBackend, ScoreStrategy, clamp_score};

/// Lowest meaningful similarity score.
pub const MIN_SCORE: f32 = -1.0;

/// Highest meaningful similarity score.
pub const MAX_SCORE: f32 = 1.0;
