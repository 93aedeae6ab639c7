//! Tests for sign-up, sign-in, sessions, and approval gating.

use civic_status::auth;
use civic_status::error_handling::AuthError;
use civic_status::storage::models::Role;
use civic_status::storage::profiles;

#[path = "helpers.rs"]
mod helpers;

use helpers::create_test_pool;

#[tokio::test]
async fn test_citizen_sign_up_and_sign_in() {
    let pool = create_test_pool().await;

    let profile = auth::sign_up(&pool, "jane@example.com", "password123", "Jane Doe", Role::Citizen)
        .await
        .expect("sign up should succeed");
    assert_eq!(profile.role, Role::Citizen);
    assert!(profile.approved, "citizens are approved immediately");
    assert_eq!(profile.email, "jane@example.com");

    let (session, signed_in) = auth::sign_in_with_password(&pool, "jane@example.com", "password123")
        .await
        .expect("sign in should succeed");
    assert_eq!(signed_in.id, profile.id);
    assert!(session.expires_at_ms > 0);

    let me = auth::get_user(&pool, &session.token)
        .await
        .expect("session should resolve");
    assert_eq!(me.id, profile.id);
}

#[tokio::test]
async fn test_sign_up_normalizes_email() {
    let pool = create_test_pool().await;
    let profile = auth::sign_up(&pool, "  Jane@Example.COM ", "password123", "Jane", Role::Citizen)
        .await
        .expect("sign up should succeed");
    assert_eq!(profile.email, "jane@example.com");

    // Sign-in with differently cased email still works
    auth::sign_in_with_password(&pool, "JANE@example.com", "password123")
        .await
        .expect("sign in should succeed after normalization");
}

#[tokio::test]
async fn test_sign_up_validation() {
    let pool = create_test_pool().await;

    assert!(matches!(
        auth::sign_up(&pool, "not-an-email", "password123", "X", Role::Citizen).await,
        Err(AuthError::InvalidEmail)
    ));
    assert!(matches!(
        auth::sign_up(&pool, "a@b.co", "short", "X", Role::Citizen).await,
        Err(AuthError::PasswordTooShort(_))
    ));

    auth::sign_up(&pool, "dup@example.com", "password123", "First", Role::Citizen)
        .await
        .expect("first sign up should succeed");
    assert!(matches!(
        auth::sign_up(&pool, "dup@example.com", "password456", "Second", Role::Citizen).await,
        Err(AuthError::DuplicateEmail)
    ));
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
    let pool = create_test_pool().await;
    auth::sign_up(&pool, "jane@example.com", "password123", "Jane", Role::Citizen)
        .await
        .expect("sign up should succeed");

    let wrong_password = auth::sign_in_with_password(&pool, "jane@example.com", "nope-nope").await;
    let unknown_email = auth::sign_in_with_password(&pool, "ghost@example.com", "password123").await;

    assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
    assert!(matches!(unknown_email, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_official_requires_approval() {
    let pool = create_test_pool().await;

    let official = auth::sign_up(
        &pool,
        "inspector@city.gov",
        "password123",
        "Inspector",
        Role::Official,
    )
    .await
    .expect("sign up should succeed");
    assert!(!official.approved, "officials start unapproved");

    assert!(matches!(
        auth::sign_in_with_password(&pool, "inspector@city.gov", "password123").await,
        Err(AuthError::NotApproved)
    ));

    profiles::set_approved(&pool, &official.id, true)
        .await
        .expect("approval should succeed");

    auth::sign_in_with_password(&pool, "inspector@city.gov", "password123")
        .await
        .expect("approved official should sign in");
}

#[tokio::test]
async fn test_sign_out_invalidates_session() {
    let pool = create_test_pool().await;
    auth::sign_up(&pool, "jane@example.com", "password123", "Jane", Role::Citizen)
        .await
        .expect("sign up should succeed");
    let (session, _) = auth::sign_in_with_password(&pool, "jane@example.com", "password123")
        .await
        .expect("sign in should succeed");

    auth::sign_out(&pool, &session.token)
        .await
        .expect("sign out should succeed");

    assert!(matches!(
        auth::get_user(&pool, &session.token).await,
        Err(AuthError::InvalidSession)
    ));

    // Signing out again is a no-op
    auth::sign_out(&pool, &session.token)
        .await
        .expect("repeated sign out should be idempotent");
}

#[tokio::test]
async fn test_unknown_token_is_rejected() {
    let pool = create_test_pool().await;
    assert!(matches!(
        auth::get_user(&pool, "no-such-token").await,
        Err(AuthError::InvalidSession)
    ));
}

#[tokio::test]
async fn test_bootstrap_super_admin() {
    let pool = create_test_pool().await;

    auth::bootstrap_super_admin(&pool, "root@city.gov:password123")
        .await
        .expect("bootstrap should succeed");

    let (_, profile) = auth::sign_in_with_password(&pool, "root@city.gov", "password123")
        .await
        .expect("bootstrap admin should sign in");
    assert_eq!(profile.role, Role::SuperAdmin);
    assert!(profile.approved);

    // Running again must not fail or duplicate
    auth::bootstrap_super_admin(&pool, "root@city.gov:password123")
        .await
        .expect("bootstrap should be idempotent");
    let all = profiles::list_profiles(&pool).await.expect("list profiles");
    assert_eq!(all.len(), 1);
}
