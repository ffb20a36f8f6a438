use tracing::{debug, info, instrument, warn};

use crate::model::{ArtefactType, EntityId, Sample, SampleStatus, WorkState};
use crate::signature::SignatureClient;
use crate::store::SampleStore;

use super::error::PipelineError;
use super::report::{BatchReport, ItemOutcome, SkipReason};

/// Signature generation orchestrator for catalog samples.
///
/// Processes each sample independently; generated signatures are persisted
/// write-through (per file, immediately) so partial progress survives a
/// later failure in the same sample.
pub struct SignatureSyncer<S, G> {
    samples: S,
    client: G,
}

impl<S, G> std::fmt::Debug for SignatureSyncer<S, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureSyncer").finish_non_exhaustive()
    }
}

impl<S: SampleStore, G: SignatureClient> SignatureSyncer<S, G> {
    pub fn new(samples: S, client: G) -> Self {
        Self { samples, client }
    }

    /// Runs signature generation for a batch of sample ids.
    ///
    /// An empty batch is a logged no-op. One sample's failure never aborts
    /// the batch; every outcome lands in the returned report.
    #[instrument(skip(self, sample_ids), fields(batch_size = sample_ids.len()))]
    pub async fn sync_samples(&self, sample_ids: &[EntityId]) -> BatchReport {
        let mut report = BatchReport::default();

        if sample_ids.is_empty() {
            warn!("signature sync invoked with no sample ids");
            return report;
        }

        for &sample_id in sample_ids {
            match self.sync_one(sample_id).await {
                Ok(outcome) => report.push(sample_id, outcome),
                Err(error) => {
                    warn!(sample_id, %error, "signature sync failed for sample");
                    report.push(sample_id, ItemOutcome::Failed { error });
                }
            }
        }

        info!(
            completed = report.completed(),
            skipped = report.skipped(),
            failed = report.failed(),
            "signature sync batch finished"
        );

        report
    }

    async fn sync_one(&self, sample_id: EntityId) -> Result<ItemOutcome, PipelineError> {
        let Some(mut sample) = self.samples.find_sample(sample_id).await? else {
            debug!(sample_id, "sample not found, skipping");
            return Ok(ItemOutcome::Skipped {
                reason: SkipReason::NotFound,
            });
        };

        if sample.status != SampleStatus::Approved {
            debug!(sample_id, status = ?sample.status, "sample not approved, skipping");
            return Ok(ItemOutcome::Skipped {
                reason: SkipReason::NotApproved,
            });
        }

        sample.sync_state = WorkState::InProgress;
        self.samples.save_sample(&sample).await?;

        let result = self.generate_signatures(&mut sample).await;

        // InProgress is exited on every path. A failed exit write must not
        // overwrite the run's outcome, so it is logged rather than raised.
        sample.sync_state = match result {
            Ok(()) => WorkState::Done,
            Err(_) => WorkState::Failed,
        };
        if let Err(error) = self.samples.save_sample(&sample).await {
            warn!(sample_id = sample.id, %error, "failed to persist sync state");
        }

        result.map(|()| ItemOutcome::Completed)
    }

    async fn generate_signatures(&self, sample: &mut Sample) -> Result<(), PipelineError> {
        if sample.files.is_empty() {
            return Err(PipelineError::RequireEvidenceFile { id: sample.id });
        }

        if sample.groove_count() > 1
            && !sample
                .files
                .iter()
                .all(|f| f.artefact_type == ArtefactType::BulletStriation)
        {
            return Err(PipelineError::RequireStriationType { id: sample.id });
        }

        debug!(
            sample_id = sample.id,
            grooves = sample.groove_count(),
            "generating signatures for sample files"
        );

        let mut first_failed: Option<String> = None;
        for file in &mut sample.files {
            if file.has_signature() {
                debug!(
                    file_id = file.id,
                    file_path = file.file_path,
                    "signature already present, skipping generation"
                );
                continue;
            }

            match self.client.generate(&file.file_path).await? {
                Some(generated) if !generated.signature.is_empty() => {
                    // Write-through: committed before the next file so the
                    // work is not lost if a sibling fails.
                    self.samples
                        .write_sample_signature(file.id, &generated.signature, generated.resolution)
                        .await?;
                    file.signature = Some(generated.signature);
                    file.resolution = Some(generated.resolution);

                    debug!(file_id = file.id, file_path = file.file_path, "signature stored");
                }
                _ => {
                    warn!(
                        file_id = file.id,
                        file_path = file.file_path,
                        "backend produced no signature (FAIL_TO_GEN_SIGNATURE)"
                    );
                    if first_failed.is_none() {
                        first_failed = Some(file.file_path.clone());
                    }
                }
            }
        }

        match first_failed {
            // synced_at is stamped only when every file made it.
            None => {
                sample.synced_at = Some(chrono::Utc::now());
                Ok(())
            }
            Some(file_path) => Err(PipelineError::SignatureGeneration { file_path }),
        }
    }
}
