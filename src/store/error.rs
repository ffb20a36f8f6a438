use thiserror::Error;

use crate::model::EntityId;

#[derive(Debug, Error)]
/// Errors returned by persistence operations.
pub enum StoreError {
    /// The store could not serve the request at all.
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Error message.
        message: String,
    },

    /// A write did not commit.
    #[error("failed to persist {entity}: {message}")]
    WriteFailed {
        /// Entity kind being written.
        entity: String,
        /// Error message.
        message: String,
    },

    /// Unique constraint on (exam, sample) rejected the insert.
    #[error("match already recorded for exam #{exam_id} and sample #{sample_id}")]
    DuplicateMatch {
        /// Exam side of the pair.
        exam_id: EntityId,
        /// Sample side of the pair.
        sample_id: EntityId,
    },

    /// A signature write referenced an evidence file that does not exist.
    #[error("unknown evidence file #{file_id}")]
    UnknownFile {
        /// Missing file id.
        file_id: EntityId,
    },
}
