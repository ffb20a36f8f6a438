use super::aggregate::{StriationScore, aggregate_top_k};
use super::mock::MockScoreBackend;
use super::strategy::{ScoreStrategy, clamp_score};
use crate::model::{ArtefactType, EvidenceFile};

fn file(id: u64, path: &str) -> EvidenceFile {
    EvidenceFile {
        id,
        owner_id: 1,
        file_path: path.to_string(),
        artefact_type: ArtefactType::BulletStriation,
        signature: Some(vec![1, 2, 3]),
        resolution: Some(0.645),
    }
}

fn pair(exam_file_id: u64, sample_file_id: u64, score: f32) -> StriationScore {
    StriationScore {
        exam_file_id,
        sample_file_id,
        score,
    }
}

#[test]
fn test_clamp_passes_values_in_range() {
    assert_eq!(clamp_score(0.5), 0.5);
    assert_eq!(clamp_score(-1.0), -1.0);
    assert_eq!(clamp_score(1.0), 1.0);
    assert_eq!(clamp_score(0.0), 0.0);
}

#[test]
fn test_clamp_zeroes_out_of_range_values() {
    assert_eq!(clamp_score(1.5), 0.0);
    assert_eq!(clamp_score(-1.001), 0.0);
    assert_eq!(clamp_score(f32::INFINITY), 0.0);
    assert_eq!(clamp_score(f32::NEG_INFINITY), 0.0);
}

#[test]
fn test_clamp_zeroes_nan() {
    assert_eq!(clamp_score(f32::NAN), 0.0);
}

#[test]
fn test_aggregate_top_k_mean_of_best_pairs() {
    // grooveCount = 2 over 4 pairwise scores: mean of {0.9, 0.7} = 0.8
    let scores = vec![
        pair(1, 10, 0.9),
        pair(1, 11, 0.7),
        pair(2, 10, 0.4),
        pair(2, 11, 0.2),
    ];

    let aggregate = aggregate_top_k(scores, 2);

    assert!((aggregate - 0.8).abs() < f32::EPSILON);
}

#[test]
fn test_aggregate_empty_is_zero() {
    assert_eq!(aggregate_top_k(vec![], 3), 0.0);
}

#[test]
fn test_aggregate_zero_grooves_is_zero() {
    assert_eq!(aggregate_top_k(vec![pair(1, 1, 0.9)], 0), 0.0);
}

#[test]
fn test_aggregate_fewer_pairs_than_grooves() {
    let scores = vec![pair(1, 10, 0.6), pair(1, 11, 0.2)];

    let aggregate = aggregate_top_k(scores, 5);

    assert!((aggregate - 0.4).abs() < 1e-6);
}

#[test]
fn test_aggregate_handles_negative_scores() {
    let scores = vec![pair(1, 10, -0.2), pair(2, 10, -0.6)];

    let aggregate = aggregate_top_k(scores, 1);

    assert!((aggregate - (-0.2)).abs() < f32::EPSILON);
}

#[test]
fn test_strategy_clamps_backend_output() {
    let backend = MockScoreBackend::uniform(2.5);
    let exam_file = file(1, "/scans/exam.x3p");
    let sample_file = file(2, "/scans/sample.x3p");

    let score = ScoreStrategy::SignatureSimilarity
        .score(&backend, &exam_file, &sample_file)
        .unwrap();

    assert_eq!(score, 0.0);
}

#[test]
fn test_strategy_passes_valid_backend_output() {
    let backend = MockScoreBackend::uniform(0.5);
    let exam_file = file(1, "/scans/exam.x3p");
    let sample_file = file(2, "/scans/sample.x3p");

    let signature = ScoreStrategy::SignatureSimilarity
        .score(&backend, &exam_file, &sample_file)
        .unwrap();
    let cff = ScoreStrategy::CffMax
        .score(&backend, &exam_file, &sample_file)
        .unwrap();

    assert_eq!(signature, 0.5);
    assert_eq!(cff, 0.5);
}

#[test]
fn test_mock_backend_per_pair_scripting() {
    let backend = MockScoreBackend::uniform(0.1);
    backend.set_pair("/scans/exam.x3p", "/scans/sample.x3p", 0.9);

    let exam_file = file(1, "/scans/exam.x3p");
    let scripted = file(2, "/scans/sample.x3p");
    let other = file(3, "/scans/other.x3p");

    let hit = ScoreStrategy::SignatureSimilarity
        .score(&backend, &exam_file, &scripted)
        .unwrap();
    let miss = ScoreStrategy::SignatureSimilarity
        .score(&backend, &exam_file, &other)
        .unwrap();

    assert_eq!(hit, 0.9);
    assert_eq!(miss, 0.1);
}
