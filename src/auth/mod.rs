//! Identity and session handling.
//!
//! The hosted identity provider this service replaces exposed four calls:
//! sign up, sign in with password, sign out, get user. That is exactly
//! the surface kept here, backed by the profiles and sessions tables.
//!
//! Citizens are usable immediately after sign-up. Official and admin
//! sign-ups start unapproved and cannot sign in until an administrator
//! approves them.

mod password;
mod session;

pub use password::{generate_salt, hash_password, verify_password};
pub use session::{create_session, delete_session, lookup_session, Session, SessionLookup};

use std::sync::OnceLock;

use regex::Regex;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::config::MIN_PASSWORD_LENGTH;
use crate::error_handling::AuthError;
use crate::storage::models::{Profile, Role};
use crate::storage::profiles;
use crate::utils::now_ms;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Shape check only: something@something.tld, no whitespace.
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    })
}

/// Creates a new account.
///
/// Validates email shape and password length, rejects duplicate emails, and
/// stores a salted digest. Returns the stored profile. Accounts requesting
/// `official` or above start unapproved.
pub async fn sign_up(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    full_name: &str,
    requested_role: Role,
) -> Result<Profile, AuthError> {
    let email = email.trim().to_lowercase();
    if !email_regex().is_match(&email) {
        return Err(AuthError::InvalidEmail);
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }
    if profiles::get_profile_by_email(pool, &email).await?.is_some() {
        return Err(AuthError::DuplicateEmail);
    }

    let salt = generate_salt();
    let digest = hash_password(password, &salt);
    let approved = requested_role == Role::Citizen;
    let profile = Profile {
        id: Uuid::new_v4().to_string(),
        email: email.clone(),
        full_name: full_name.trim().to_string(),
        role: requested_role,
        approved,
        created_at_ms: now_ms(),
    };

    profiles::insert_profile(
        pool,
        &profiles::NewProfile {
            id: &profile.id,
            email: &profile.email,
            full_name: &profile.full_name,
            password_digest: &digest,
            password_salt: &salt,
            role: profile.role,
            approved: profile.approved,
            created_at_ms: profile.created_at_ms,
        },
    )
    .await?;

    log::info!("New {} account registered: {}", profile.role.as_str(), profile.email);
    Ok(profile)
}

/// Verifies credentials and opens a session.
///
/// Returns the session token together with the profile. Unknown emails and
/// wrong passwords produce the same error. Unapproved accounts are refused.
pub async fn sign_in_with_password(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<(Session, Profile), AuthError> {
    let email = email.trim().to_lowercase();
    let Some((profile, digest, salt)) = profiles::get_credentials_by_email(pool, &email).await?
    else {
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(password, &salt, &digest) {
        return Err(AuthError::InvalidCredentials);
    }
    if !profile.approved {
        return Err(AuthError::NotApproved);
    }

    let session = create_session(pool, &profile.id).await?;
    Ok((session, profile))
}

/// Closes a session. Unknown tokens are ignored.
pub async fn sign_out(pool: &SqlitePool, token: &str) -> Result<(), AuthError> {
    delete_session(pool, token).await?;
    Ok(())
}

/// Resolves a session token to its profile.
pub async fn get_user(pool: &SqlitePool, token: &str) -> Result<Profile, AuthError> {
    match lookup_session(pool, token).await? {
        SessionLookup::Valid(profile) => Ok(profile),
        SessionLookup::Expired => Err(AuthError::SessionExpired),
        SessionLookup::Missing => Err(AuthError::InvalidSession),
    }
}

/// Ensures a super_admin account exists for the given `email:password` pair.
///
/// Used by `serve --bootstrap-admin`. Existing accounts are left untouched.
pub async fn bootstrap_super_admin(pool: &SqlitePool, spec: &str) -> Result<(), AuthError> {
    let Some((email, password)) = spec.split_once(':') else {
        return Err(AuthError::InvalidEmail);
    };
    if profiles::get_profile_by_email(pool, &email.trim().to_lowercase())
        .await?
        .is_some()
    {
        log::debug!("Bootstrap admin already exists, skipping");
        return Ok(());
    }
    sign_up(pool, email, password, "Administrator", Role::SuperAdmin).await?;
    // sign_up leaves non-citizen accounts unapproved; the bootstrap account
    // has no one to approve it
    if let Some(profile) = profiles::get_profile_by_email(pool, &email.trim().to_lowercase()).await?
    {
        profiles::set_approved(pool, &profile.id, true).await?;
    }
    log::info!("Bootstrap super_admin account ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(email_regex().is_match("a@b.co"));
        assert!(email_regex().is_match("first.last@city.example.gov"));
        assert!(!email_regex().is_match("not-an-email"));
        assert!(!email_regex().is_match("a b@c.co"));
        assert!(!email_regex().is_match("a@b"));
    }
}
