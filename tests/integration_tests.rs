//! Integration tests for the internship matcher

use internship_matcher::input::manager::InputManager;
use internship_matcher::output::formatter::{JsonFormatter, OutputFormatter};
use internship_matcher::output::ListingReport;
use internship_matcher::processing::listing::ListingOptions;
use internship_matcher::{annotate, can_apply, MatchTier, MatcherError};
use std::path::Path;

#[tokio::test]
async fn test_profile_from_json() {
    let mut manager = InputManager::new();
    let student = manager
        .load_profile(Path::new("tests/fixtures/student.json"))
        .await
        .unwrap();

    assert_eq!(student.career(), "sistemas");
    assert_eq!(student.current_year(), 4);
    assert!(student.technical_skills().contains_key("react"));
}

#[tokio::test]
async fn test_profile_missing_year_is_fatal() {
    let mut manager = InputManager::new();
    let result = manager
        .load_profile(Path::new("tests/fixtures/student_missing_year.json"))
        .await;

    match result {
        Err(MatcherError::MissingField { field, .. }) => assert_eq!(field, "currentYear"),
        other => panic!("expected missing field error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_json_catalogue_annotation() {
    let mut manager = InputManager::new();
    let student = manager
        .load_profile(Path::new("tests/fixtures/student.json"))
        .await
        .unwrap();
    let catalogue = manager
        .load_postings(Path::new("tests/fixtures/postings.json"))
        .await
        .unwrap();

    assert_eq!(catalogue.len(), 4);
    assert_eq!(catalogue.skipped.len(), 1);
    assert_eq!(catalogue.skipped[0].index, 3);
    assert_eq!(catalogue.skipped[0].id.as_deref(), Some("104"));

    let before = catalogue.postings.clone();
    let annotated = annotate(&student, &catalogue.postings);
    assert_eq!(catalogue.postings, before);

    let scored: Vec<(String, u8, MatchTier)> = annotated
        .iter()
        .map(|a| (a.posting.id_label().unwrap(), a.match_score, a.match_tier))
        .collect();
    assert_eq!(
        scored,
        vec![
            ("101".to_string(), 75, MatchTier::Alta),
            ("102".to_string(), 0, MatchTier::Baja),
            ("103".to_string(), 67, MatchTier::Alta),
            ("105".to_string(), 100, MatchTier::Perfecta),
        ]
    );

    let apply: Vec<bool> = annotated.iter().map(|a| can_apply(a.match_tier)).collect();
    assert_eq!(apply, vec![true, false, true, true]);
}

#[tokio::test]
async fn test_toml_inputs() {
    let mut manager = InputManager::new();
    let student = manager
        .load_profile(Path::new("tests/fixtures/student.toml"))
        .await
        .unwrap();
    let catalogue = manager
        .load_postings(Path::new("tests/fixtures/postings.toml"))
        .await
        .unwrap();

    assert_eq!(student.current_year(), 2);
    let annotated = annotate(&student, &catalogue.postings);

    // 5 of 6: portugues is the only gap
    assert_eq!(annotated[0].match_score, 83);
    assert_eq!(annotated[0].match_tier, MatchTier::Perfecta);
    // career only
    assert_eq!(annotated[1].match_score, 50);
    assert_eq!(annotated[1].match_tier, MatchTier::Media);
}

#[tokio::test]
async fn test_sorted_report_json() {
    let mut manager = InputManager::new();
    let student = manager
        .load_profile(Path::new("tests/fixtures/student.json"))
        .await
        .unwrap();
    let catalogue = manager
        .load_postings(Path::new("tests/fixtures/postings.json"))
        .await
        .unwrap();

    let options = ListingOptions {
        minimum_tier: Some(MatchTier::Alta),
        sort_by_score: true,
        limit: None,
    };
    let report = ListingReport::generate(&student, catalogue, &options, false);
    let json = JsonFormatter::new(true).format_report(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let entries = value["entries"].as_array().unwrap();
    let ids: Vec<i64> = entries.iter().map(|e| e["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![105, 101, 103]);

    // Stale annotations from the stored record are overwritten
    assert_eq!(entries[2]["matchScore"], 67);
    assert_eq!(entries[2]["matchTier"], "Alta");
    assert_eq!(entries[1]["modality"], "remoto");
    assert!(!json.contains("plain-text-secret"));
    assert_eq!(value["summary"]["baja"], 1);
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/postings.json");

    let first = manager.read_document(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let second = manager.read_document(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_can_be_disabled() {
    let mut manager = InputManager::new().with_cache(false);
    manager
        .read_document(Path::new("tests/fixtures/student.json"))
        .await
        .unwrap();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager
        .read_document(Path::new("tests/fixtures/unsupported.xyz"))
        .await;
    assert!(matches!(result, Err(MatcherError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager
        .load_postings(Path::new("tests/fixtures/nonexistent.json"))
        .await;
    assert!(result.is_err());
}
