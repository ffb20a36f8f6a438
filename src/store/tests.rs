use super::mock::MockEvidenceStore;
use super::{ExamStore, MatchStore, SampleStore, StoreError};
use crate::model::{
    ArtefactType, EntityId, EvidenceFile, Exam, ExamStatus, MatchRecord, MatchStatus, Sample,
    SampleStatus, WorkState,
};

fn sample_file(id: EntityId, owner_id: EntityId, artefact_type: ArtefactType) -> EvidenceFile {
    EvidenceFile {
        id,
        owner_id,
        file_path: format!("/scans/sample-{owner_id}-{id}.x3p"),
        artefact_type,
        signature: None,
        resolution: None,
    }
}

fn approved_sample(id: EntityId, artefact_type: ArtefactType, grooves: usize) -> Sample {
    let files = (0..grooves)
        .map(|i| sample_file(id * 100 + i as EntityId, id, artefact_type))
        .collect();
    Sample {
        id,
        status: SampleStatus::Approved,
        artefact_type,
        sync_state: WorkState::Idle,
        files,
        synced_at: None,
    }
}

fn pending_exam(id: EntityId, artefact_type: ArtefactType, grooves: usize) -> Exam {
    let files = (0..grooves)
        .map(|i| sample_file(id * 100 + i as EntityId, id, artefact_type))
        .collect();
    Exam {
        id,
        status: ExamStatus::Pending,
        artefact_type,
        match_state: WorkState::Idle,
        files,
        matched_samples: 0,
        total_matching_samples: 0,
    }
}

fn record(exam_id: EntityId, sample_id: EntityId, score: f32) -> MatchRecord {
    MatchRecord {
        exam_id,
        sample_id,
        score,
        status: MatchStatus::NoMatch,
        created_at: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn test_find_sample_not_found_is_none() {
    let store = MockEvidenceStore::new();

    assert!(store.find_sample(99).await.unwrap().is_none());
}

#[tokio::test]
async fn test_count_candidates_filters_shape() {
    let store = MockEvidenceStore::new();
    store
        .insert_sample(approved_sample(1, ArtefactType::BreechFace, 1))
        .await;
    store
        .insert_sample(approved_sample(2, ArtefactType::BulletStriation, 1))
        .await;
    store
        .insert_sample(approved_sample(3, ArtefactType::BulletStriation, 2))
        .await;

    let mut rejected = approved_sample(4, ArtefactType::BulletStriation, 1);
    rejected.status = SampleStatus::Rejected;
    store.insert_sample(rejected).await;

    let count = store
        .count_candidates(SampleStatus::Approved, ArtefactType::BulletStriation, 1)
        .await
        .unwrap();

    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_fetch_candidates_respects_limit_and_offset() {
    let store = MockEvidenceStore::new();
    for id in 1..=7 {
        store
            .insert_sample(approved_sample(id, ArtefactType::BreechFace, 1))
            .await;
    }

    let first = store
        .fetch_candidates(SampleStatus::Approved, ArtefactType::BreechFace, 1, 3, 0)
        .await
        .unwrap();
    let second = store
        .fetch_candidates(SampleStatus::Approved, ArtefactType::BreechFace, 1, 3, 3)
        .await
        .unwrap();
    let third = store
        .fetch_candidates(SampleStatus::Approved, ArtefactType::BreechFace, 1, 3, 6)
        .await
        .unwrap();
    let exhausted = store
        .fetch_candidates(SampleStatus::Approved, ArtefactType::BreechFace, 1, 3, 9)
        .await
        .unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 3);
    assert_eq!(third.len(), 1);
    assert!(exhausted.is_empty());

    let mut seen: Vec<EntityId> = first
        .iter()
        .chain(second.iter())
        .chain(third.iter())
        .map(|s| s.id)
        .collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 7, "pages must not repeat samples");
}

#[tokio::test]
async fn test_write_sample_signature_is_visible_on_reload() {
    let store = MockEvidenceStore::new();
    let sample = approved_sample(1, ArtefactType::BulletStriation, 1);
    let file_id = sample.files[0].id;
    store.insert_sample(sample).await;

    store
        .write_sample_signature(file_id, &[0xCA, 0xFE], 0.645)
        .await
        .unwrap();

    let reloaded = store.find_sample(1).await.unwrap().unwrap();
    assert_eq!(reloaded.files[0].signature.as_deref(), Some(&[0xCA, 0xFE][..]));
    assert_eq!(reloaded.files[0].resolution, Some(0.645));
}

#[tokio::test]
async fn test_write_signature_unknown_file_fails() {
    let store = MockEvidenceStore::new();

    let result = store.write_sample_signature(404, &[1], 1.0).await;

    assert!(matches!(result, Err(StoreError::UnknownFile { file_id: 404 })));
}

#[tokio::test]
async fn test_insert_match_rejects_duplicates() {
    let store = MockEvidenceStore::new();

    store.insert_match(record(1, 2, 0.5)).await.unwrap();
    let duplicate = store.insert_match(record(1, 2, 0.9)).await;

    assert!(matches!(
        duplicate,
        Err(StoreError::DuplicateMatch {
            exam_id: 1,
            sample_id: 2
        })
    ));
    assert_eq!(store.match_count().await, 1);
    // The original record is untouched (append-only).
    assert_eq!(store.match_for(1, 2).await.unwrap().score, 0.5);
}

#[tokio::test]
async fn test_match_exists_after_insert() {
    let store = MockEvidenceStore::new();

    assert!(!store.match_exists(1, 2).await.unwrap());
    store.insert_match(record(1, 2, 0.5)).await.unwrap();
    assert!(store.match_exists(1, 2).await.unwrap());
    assert!(!store.match_exists(2, 1).await.unwrap());
}

#[tokio::test]
async fn test_exam_counter_and_status_updates() {
    let store = MockEvidenceStore::new();
    store
        .insert_exam(pending_exam(5, ArtefactType::BreechFace, 1))
        .await;

    store.set_total_matching_samples(5, 3).await.unwrap();
    store.increase_matched_samples(5).await.unwrap();
    store.increase_matched_samples(5).await.unwrap();
    store.update_status(5, ExamStatus::Processed).await.unwrap();
    store
        .update_match_state(&[5], WorkState::Done)
        .await
        .unwrap();

    let exam = store.exam(5).await.unwrap();
    assert_eq!(exam.total_matching_samples, 3);
    assert_eq!(exam.matched_samples, 2);
    assert_eq!(exam.status, ExamStatus::Processed);
    assert_eq!(exam.match_state, WorkState::Done);
}

#[tokio::test]
async fn test_counter_update_on_missing_exam_fails() {
    let store = MockEvidenceStore::new();

    let result = store.increase_matched_samples(123).await;

    assert!(matches!(result, Err(StoreError::WriteFailed { .. })));
}

#[tokio::test]
async fn test_update_match_state_ignores_unknown_ids() {
    let store = MockEvidenceStore::new();
    store
        .insert_exam(pending_exam(1, ArtefactType::BreechFace, 1))
        .await;

    store
        .update_match_state(&[1, 999], WorkState::InProgress)
        .await
        .unwrap();

    assert_eq!(store.exam(1).await.unwrap().match_state, WorkState::InProgress);
}
