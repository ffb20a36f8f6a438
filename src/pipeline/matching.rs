use tracing::{debug, info, instrument, warn};

use crate::config::DEFAULT_PAGE_SIZE;
use crate::model::{
    ArtefactType, EntityId, Exam, ExamStatus, MatchRecord, MatchStatus, Sample, SampleStatus,
    WorkState,
};
use crate::scoring::{ScoreBackend, ScoreStrategy, StriationScore, aggregate_top_k};
use crate::signature::SignatureClient;
use crate::store::{ExamStore, MatchStore, SampleStore};

use super::error::PipelineError;
use super::report::{BatchReport, ItemOutcome, SkipReason};

/// Which comparison path a matching run takes, decided once per exam from
/// its (groove count, artefact type) shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPlan {
    /// One breech-face scan, CFF-max strategy.
    SingleBreechFace,
    /// One striation scan, signature-similarity strategy.
    SingleStriation,
    /// Several striation scans, cross-product scoring with top-k mean
    /// aggregation.
    MultiGrooveStriation,
}

impl MatchPlan {
    /// Derives the plan for an exam, enforcing the shape preconditions.
    pub fn for_exam(exam: &Exam) -> Result<MatchPlan, PipelineError> {
        match (exam.groove_count(), exam.artefact_type) {
            (0, _) => Err(PipelineError::RequireEvidenceFile { id: exam.id }),
            (1, ArtefactType::BreechFace) => Ok(MatchPlan::SingleBreechFace),
            (1, ArtefactType::BulletStriation) => Ok(MatchPlan::SingleStriation),
            (_, _) => {
                if exam
                    .files
                    .iter()
                    .all(|f| f.artefact_type == ArtefactType::BulletStriation)
                {
                    Ok(MatchPlan::MultiGrooveStriation)
                } else {
                    Err(PipelineError::RequireStriationType { id: exam.id })
                }
            }
        }
    }

    /// Artefact type the candidate corpus is filtered by.
    fn candidate_type(&self) -> ArtefactType {
        match self {
            MatchPlan::SingleBreechFace => ArtefactType::BreechFace,
            MatchPlan::SingleStriation | MatchPlan::MultiGrooveStriation => {
                ArtefactType::BulletStriation
            }
        }
    }

    /// Pairwise strategy for this plan.
    fn strategy(&self) -> ScoreStrategy {
        match self {
            MatchPlan::SingleBreechFace => ScoreStrategy::CffMax,
            MatchPlan::SingleStriation | MatchPlan::MultiGrooveStriation => {
                ScoreStrategy::SignatureSimilarity
            }
        }
    }
}

/// Exam match orchestrator.
///
/// Per exam: validate shape, recompute the candidate total, make sure every
/// exam file has a signature, then page through approved samples of the
/// same (artefact type, groove count), score each unseen pair, persist a
/// match record and bump the matched counter. Candidates are fetched in
/// fixed-size pages so a large corpus is never loaded at once.
pub struct ExamMatcher<E, S, M, G, B> {
    exams: E,
    samples: S,
    matches: M,
    client: G,
    backend: B,
    page_size: usize,
}

impl<E, S, M, G, B> std::fmt::Debug for ExamMatcher<E, S, M, G, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExamMatcher")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl<E, S, M, G, B> ExamMatcher<E, S, M, G, B>
where
    E: ExamStore,
    S: SampleStore,
    M: MatchStore,
    G: SignatureClient,
    B: ScoreBackend,
{
    pub fn new(exams: E, samples: S, matches: M, client: G, backend: B) -> Self {
        Self {
            exams,
            samples,
            matches,
            client,
            backend,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Overrides the candidate page size (must be > 0).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        debug_assert!(page_size > 0);
        self.page_size = page_size;
        self
    }

    /// Runs matching for a batch of exam ids.
    ///
    /// An empty batch is a logged no-op. One exam's failure never aborts
    /// the batch.
    #[instrument(skip(self, exam_ids), fields(batch_size = exam_ids.len()))]
    pub async fn match_exams(&self, exam_ids: &[EntityId]) -> BatchReport {
        let mut report = BatchReport::default();

        if exam_ids.is_empty() {
            warn!("matching invoked with no exam ids");
            return report;
        }

        for &exam_id in exam_ids {
            match self.match_one(exam_id).await {
                Ok(outcome) => report.push(exam_id, outcome),
                Err(error) => {
                    warn!(exam_id, %error, "matching failed for exam");
                    report.push(exam_id, ItemOutcome::Failed { error });
                }
            }
        }

        info!(
            completed = report.completed(),
            skipped = report.skipped(),
            failed = report.failed(),
            "matching batch finished"
        );

        report
    }

    async fn match_one(&self, exam_id: EntityId) -> Result<ItemOutcome, PipelineError> {
        let Some(mut exam) = self.exams.find_exam(exam_id).await? else {
            debug!(exam_id, "exam not found, skipping");
            return Ok(ItemOutcome::Skipped {
                reason: SkipReason::NotFound,
            });
        };

        self.exams
            .update_match_state(&[exam_id], WorkState::InProgress)
            .await?;

        let result = self.run_match(&mut exam).await;

        // The matching state is exited on every path. This is a dedicated
        // update: the in-memory exam is stale after the store-side counter
        // bumps and must not be written back wholesale.
        let final_state = match result {
            Ok(()) => WorkState::Done,
            Err(_) => WorkState::Failed,
        };
        if let Err(error) = self.exams.update_match_state(&[exam_id], final_state).await {
            warn!(exam_id, %error, "failed to clear matching state");
        }

        result.map(|()| ItemOutcome::Completed)
    }

    async fn run_match(&self, exam: &mut Exam) -> Result<(), PipelineError> {
        if exam.files.is_empty() {
            return Err(PipelineError::RequireEvidenceFile { id: exam.id });
        }

        let groove_count = exam.groove_count();

        // The candidate total is computed once per run and persisted before
        // the shape check, so an exam rejected for its file types still
        // carries its current corpus size. Concurrent approvals mid-run are
        // picked up by the next run.
        let total = self
            .samples
            .count_candidates(SampleStatus::Approved, exam.artefact_type, groove_count)
            .await?;
        self.exams
            .set_total_matching_samples(exam.id, total)
            .await?;

        let plan = MatchPlan::for_exam(exam)?;

        info!(
            exam_id = exam.id,
            ?plan,
            groove_count,
            total_candidates = total,
            "starting matching run"
        );

        self.ensure_exam_signatures(exam).await?;
        self.score_candidate_pages(exam, plan).await?;

        self.exams
            .update_status(exam.id, ExamStatus::Processed)
            .await?;

        Ok(())
    }

    /// Generates and persists signatures for exam files that lack one.
    ///
    /// Unlike the sample sync pipeline, any generation failure aborts the
    /// exam: scoring without a full signature set is meaningless.
    async fn ensure_exam_signatures(&self, exam: &mut Exam) -> Result<(), PipelineError> {
        for file in &mut exam.files {
            if file.has_signature() {
                continue;
            }

            let Some(generated) = self.client.generate(&file.file_path).await? else {
                return Err(PipelineError::SignatureGeneration {
                    file_path: file.file_path.clone(),
                });
            };

            if generated.signature.is_empty() {
                return Err(PipelineError::SignatureGeneration {
                    file_path: file.file_path.clone(),
                });
            }

            self.exams
                .write_exam_signature(file.id, &generated.signature, generated.resolution)
                .await?;
            file.signature = Some(generated.signature);
            file.resolution = Some(generated.resolution);
        }

        Ok(())
    }

    /// Pages through matching candidates and scores every unseen pair.
    /// Stops on the first empty page.
    async fn score_candidate_pages(
        &self,
        exam: &Exam,
        plan: MatchPlan,
    ) -> Result<(), PipelineError> {
        let groove_count = exam.groove_count();
        let mut offset = 0;

        loop {
            let page = self
                .samples
                .fetch_candidates(
                    SampleStatus::Approved,
                    plan.candidate_type(),
                    groove_count,
                    self.page_size,
                    offset,
                )
                .await?;

            if page.is_empty() {
                debug!(exam_id = exam.id, offset, "candidate pages exhausted");
                break;
            }

            for sample in &page {
                // At-most-once per (exam, sample): a recorded pair is never
                // rescored, even across runs.
                if self.matches.match_exists(exam.id, sample.id).await? {
                    debug!(
                        exam_id = exam.id,
                        sample_id = sample.id,
                        "pair already recorded, skipping"
                    );
                    continue;
                }

                let score = match plan {
                    MatchPlan::MultiGrooveStriation => self.score_groove_set(exam, sample)?,
                    MatchPlan::SingleBreechFace | MatchPlan::SingleStriation => {
                        self.score_single(exam, sample, plan.strategy())?
                    }
                };

                self.record_match(exam, sample, score).await?;
            }

            offset += self.page_size;
        }

        Ok(())
    }

    /// Full cross-product of (exam file x sample file) pairwise scores,
    /// aggregated as the mean of the top `groove_count`.
    fn score_groove_set(&self, exam: &Exam, sample: &Sample) -> Result<f32, PipelineError> {
        let groove_count = exam.groove_count();
        let mut pair_scores = Vec::with_capacity(groove_count * sample.groove_count());

        for sample_file in &sample.files {
            for exam_file in &exam.files {
                let score =
                    ScoreStrategy::SignatureSimilarity.score(&self.backend, exam_file, sample_file)?;

                debug!(
                    exam_file = exam_file.file_path,
                    sample_file = sample_file.file_path,
                    score,
                    "pairwise striation score"
                );

                pair_scores.push(StriationScore {
                    exam_file_id: exam_file.id,
                    sample_file_id: sample_file.id,
                    score,
                });
            }
        }

        Ok(aggregate_top_k(pair_scores, groove_count))
    }

    fn score_single(
        &self,
        exam: &Exam,
        sample: &Sample,
        strategy: ScoreStrategy,
    ) -> Result<f32, PipelineError> {
        // Both files exist: the plan guarantees one exam file and the
        // candidate query filters on groove count 1.
        let (Some(exam_file), Some(sample_file)) = (exam.files.first(), sample.files.first())
        else {
            return Err(PipelineError::RequireEvidenceFile { id: sample.id });
        };

        let score = strategy.score(&self.backend, exam_file, sample_file)?;

        debug!(
            exam_file = exam_file.file_path,
            sample_file = sample_file.file_path,
            score,
            "pairwise score"
        );

        Ok(score)
    }

    async fn record_match(
        &self,
        exam: &Exam,
        sample: &Sample,
        score: f32,
    ) -> Result<(), PipelineError> {
        self.matches
            .insert_match(MatchRecord {
                exam_id: exam.id,
                sample_id: sample.id,
                score,
                status: MatchStatus::NoMatch,
                created_at: chrono::Utc::now(),
            })
            .await?;

        self.exams.increase_matched_samples(exam.id).await?;

        info!(
            exam_id = exam.id,
            sample_id = sample.id,
            score,
            "match recorded"
        );

        Ok(())
    }
}
