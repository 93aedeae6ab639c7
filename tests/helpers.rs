// Shared test helpers for database setup and test data creation.
//
// This module provides common utilities used across multiple test files to
// reduce duplication.

use sqlx::SqlitePool;

use civic_status::auth;
use civic_status::run_migrations;
use civic_status::storage::models::{Issue, IssueCategory, IssuePriority, Profile, Role};
use civic_status::storage::{issues, profiles, NewIssue};

/// Creates a test database pool with migrations applied.
/// Uses an in-memory database for fast test execution.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Creates an account with the given role, approved and ready to use.
/// All test accounts share the same password ("password123").
#[allow(dead_code)] // Used by other test files
pub async fn create_test_profile(
    pool: &SqlitePool,
    email: &str,
    full_name: &str,
    role: Role,
) -> Profile {
    let profile = auth::sign_up(pool, email, "password123", full_name, role)
        .await
        .expect("Failed to sign up test profile");
    if !profile.approved {
        profiles::set_approved(pool, &profile.id, true)
            .await
            .expect("Failed to approve test profile");
    }
    profiles::get_profile(pool, &profile.id)
        .await
        .expect("Failed to reload test profile")
        .expect("Test profile should exist")
}

/// Creates a test issue at the given coordinates with default text fields.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_issue(
    pool: &SqlitePool,
    reporter_id: &str,
    latitude: f64,
    longitude: f64,
) -> Issue {
    issues::insert_issue(
        pool,
        NewIssue {
            title: "Pothole on Main St".to_string(),
            description: "Deep pothole near the crosswalk".to_string(),
            category: IssueCategory::Pothole,
            priority: IssuePriority::Medium,
            latitude,
            longitude,
            address: "Main St & 1st Ave".to_string(),
            photo_url: Some("/uploads/test.jpg".to_string()),
            photo_filename: Some("test.jpg".to_string()),
            reporter_id: reporter_id.to_string(),
        },
    )
    .await
    .expect("Failed to insert test issue")
}
