use thiserror::Error;

use crate::model::EntityId;
use crate::scoring::ScoringError;
use crate::signature::SignatureError;
use crate::store::StoreError;

#[derive(Debug, Error)]
/// Per-item pipeline failures.
///
/// Precondition violations and backend failures carry their wire code in
/// the display text; store and client errors are wrapped at the seam.
pub enum PipelineError {
    /// The evidence item has no scan files at all.
    #[error("REQUIRE_X3P_FILE: evidence item #{id} has no scan files")]
    RequireEvidenceFile {
        /// Offending exam or sample.
        id: EntityId,
    },

    /// A multi-file item carried a non-striation scan.
    #[error(
        "REQUIRE_BULLET_STRIATION_TYPE: multi-groove item #{id} requires every file to be a bullet striation"
    )]
    RequireStriationType {
        /// Offending exam or sample.
        id: EntityId,
    },

    /// The signature backend produced no usable signature.
    #[error("FAIL_TO_GEN_SIGNATURE: no signature produced for '{file_path}'")]
    SignatureGeneration {
        /// Scan file the generation failed for.
        file_path: String,
    },

    /// Signature backend transport/decoding failure.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Score computation failure.
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}
