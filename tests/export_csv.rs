//! Tests for CSV and JSONL export functionality.

use std::path::PathBuf;

use civic_status::export::{export_csv, export_jsonl};
use civic_status::geo::Location;
use civic_status::resolution::{submit_response, NewResponse};
use civic_status::storage::models::{IssueStatus, Role};
use civic_status::{init_db_pool_with_path, run_migrations};
use tempfile::TempDir;

#[path = "helpers.rs"]
mod helpers;

use helpers::{create_test_issue, create_test_profile};

/// Creates a file-backed database (export opens the file itself) seeded with
/// two citizens, an official, two issues, and one verified resolution.
/// Returns the temp dir, db path, and the resolved issue's id.
async fn seed_database(dir: &TempDir) -> (PathBuf, String) {
    let db_path = dir.path().join("export_test.db");
    let pool = init_db_pool_with_path(&db_path)
        .await
        .expect("Failed to create test database");
    run_migrations(&pool).await.expect("Failed to run migrations");

    let jane = create_test_profile(&pool, "jane@example.com", "Jane", Role::Citizen).await;
    let bob = create_test_profile(&pool, "bob@example.com", "Bob", Role::Citizen).await;
    let official = create_test_profile(&pool, "works@city.gov", "Works", Role::Official).await;

    let resolved = create_test_issue(&pool, &jane.id, 37.7749, -122.4194).await;
    let _open = create_test_issue(&pool, &bob.id, 37.7749, -122.4194).await;

    submit_response(
        &pool,
        &resolved,
        &official,
        NewResponse {
            message: "Patched".to_string(),
            new_status: IssueStatus::Resolved,
            photo_url: None,
            photo_filename: None,
            location: Some(Location::new(37.7751, -122.4196)),
        },
    )
    .await
    .expect("resolution should verify");

    pool.close().await;
    (db_path, resolved.id)
}

#[tokio::test]
async fn test_export_csv_all_issues() {
    let dir = TempDir::new().expect("tempdir");
    let (db_path, resolved_id) = seed_database(&dir).await;

    let output = dir.path().join("issues.csv");
    let count = export_csv(&db_path, Some(&output), None, None, None, None)
        .await
        .expect("export should succeed");
    assert_eq!(count, 2);

    let content = std::fs::read_to_string(&output).expect("output should exist");
    let mut lines = content.lines();
    let header = lines.next().expect("header line");
    assert!(header.starts_with("id,title,description,category,status"));
    assert!(header.contains("resolution_distance_m"));
    assert!(header.contains("location_verified"));

    assert_eq!(lines.count(), 2);
    assert!(content.contains(&resolved_id));
    assert!(content.contains("jane@example.com"));
    assert!(content.contains("bob@example.com"));
}

#[tokio::test]
async fn test_export_csv_filters() {
    let dir = TempDir::new().expect("tempdir");
    let (db_path, resolved_id) = seed_database(&dir).await;

    // By status
    let output = dir.path().join("resolved.csv");
    let count = export_csv(
        &db_path,
        Some(&output),
        Some(IssueStatus::Resolved),
        None,
        None,
        None,
    )
    .await
    .expect("export should succeed");
    assert_eq!(count, 1);
    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains(&resolved_id));
    assert!(content.contains(",true,"), "verified resolution column");
    assert!(!content.contains("bob@example.com"));

    // By reporter
    let output = dir.path().join("bob.csv");
    let count = export_csv(&db_path, Some(&output), None, None, None, Some("bob@example.com"))
        .await
        .expect("export should succeed");
    assert_eq!(count, 1);

    // Since the far future: nothing
    let output = dir.path().join("none.csv");
    let count = export_csv(&db_path, Some(&output), None, None, Some(i64::MAX), None)
        .await
        .expect("export should succeed");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_export_csv_resolution_columns() {
    let dir = TempDir::new().expect("tempdir");
    let (db_path, resolved_id) = seed_database(&dir).await;

    let output = dir.path().join("issues.csv");
    export_csv(
        &db_path,
        Some(&output),
        Some(IssueStatus::Resolved),
        None,
        None,
        None,
    )
    .await
    .expect("export should succeed");

    let content = std::fs::read_to_string(&output).unwrap();
    let row = content
        .lines()
        .find(|l| l.contains(&resolved_id))
        .expect("resolved issue row");
    let fields: Vec<&str> = row.split(',').collect();

    // resolution_distance_m is a ~25-30m figure with one decimal
    let distance_field = fields
        .iter()
        .find(|f| f.parse::<f64>().map(|d| d > 20.0 && d < 35.0).unwrap_or(false))
        .expect("distance column should hold the measured distance");
    assert!(distance_field.contains('.'));
    assert!(row.contains("good") || row.contains("fair"));
}

#[tokio::test]
async fn test_export_jsonl_nested_responses() {
    let dir = TempDir::new().expect("tempdir");
    let (db_path, resolved_id) = seed_database(&dir).await;

    let output = dir.path().join("issues.jsonl");
    let count = export_jsonl(&db_path, Some(&output), None, None, None, None)
        .await
        .expect("export should succeed");
    assert_eq!(count, 2);

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let resolved_line = lines
        .iter()
        .find(|l| l.contains(&resolved_id))
        .expect("resolved issue line");
    let record: serde_json::Value =
        serde_json::from_str(resolved_line).expect("each line is valid JSON");
    assert_eq!(record["reporter"]["email"], "jane@example.com");
    let responses = record["responses"].as_array().expect("responses array");
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["response_type"], "resolution");
    assert_eq!(responses[0]["location_verified"], true);
    assert_eq!(responses[0]["accuracy_tier"], "fair");
}

#[tokio::test]
async fn test_export_jsonl_reporter_filter() {
    let dir = TempDir::new().expect("tempdir");
    let (db_path, _) = seed_database(&dir).await;

    let output = dir.path().join("jane.jsonl");
    let count = export_jsonl(
        &db_path,
        Some(&output),
        None,
        None,
        None,
        Some("jane@example.com"),
    )
    .await
    .expect("export should succeed");
    assert_eq!(count, 1);
}
