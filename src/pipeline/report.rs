use crate::model::EntityId;

use super::error::PipelineError;

/// Why an identifier was skipped without being treated as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No entity with that id exists.
    NotFound,
    /// The sample is not in `Approved` status.
    NotApproved,
}

/// Outcome of processing one identifier.
#[derive(Debug)]
pub enum ItemOutcome {
    Completed,
    Skipped { reason: SkipReason },
    Failed { error: PipelineError },
}

impl ItemOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ItemOutcome::Completed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ItemOutcome::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ItemOutcome::Failed { .. })
    }
}

/// One identifier paired with its outcome.
#[derive(Debug)]
pub struct ItemReport {
    pub id: EntityId,
    pub outcome: ItemOutcome,
}

/// Per-item outcomes of one batch run, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    items: Vec<ItemReport>,
}

impl BatchReport {
    pub(crate) fn push(&mut self, id: EntityId, outcome: ItemOutcome) {
        self.items.push(ItemReport { id, outcome });
    }

    pub fn items(&self) -> &[ItemReport] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of identifiers that ran to completion.
    pub fn completed(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_completed()).count()
    }

    /// Number of identifiers skipped (missing, not approved).
    pub fn skipped(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_skipped()).count()
    }

    /// Number of identifiers that failed.
    pub fn failed(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_failed()).count()
    }

    /// Outcome recorded for `id`, if it was part of the batch.
    pub fn outcome_for(&self, id: EntityId) -> Option<&ItemOutcome> {
        self.items.iter().find(|i| i.id == id).map(|i| &i.outcome)
    }
}
