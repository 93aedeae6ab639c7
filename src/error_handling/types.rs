//! Error type definitions.
//!
//! This module defines all error and event types used throughout the service.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::geo::AccuracyTier;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error preparing the upload directory.
    #[error("Upload directory error: {0}")]
    UploadDirError(String),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// A stored column held a value outside its expected vocabulary.
    #[error("Unexpected value in column {column}: {value}")]
    UnexpectedValue {
        /// Column the value was read from.
        column: &'static str,
        /// The offending value.
        value: String,
    },
}

/// Error types for identity and session operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email does not look like an email address.
    #[error("Invalid email address")]
    InvalidEmail,

    /// Password shorter than the configured minimum.
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    /// An account with this email already exists.
    #[error("An account with this email already exists")]
    DuplicateEmail,

    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Official/admin account awaiting administrator approval.
    #[error("Account is awaiting administrator approval")]
    NotApproved,

    /// Session token is unknown.
    #[error("Invalid session token")]
    InvalidSession,

    /// Session token has expired.
    #[error("Session has expired")]
    SessionExpired,

    /// Underlying database failure.
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Error types for response submission and resolution verification.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// A resolution response was submitted without responder coordinates.
    #[error("Resolution responses require your current location")]
    MissingLocation,

    /// Responder coordinates failed validation.
    #[error("Invalid location coordinates received")]
    InvalidLocation,

    /// The responder was too far from the reported issue location.
    /// The response is recorded as evidence but the issue is not resolved.
    #[error("Response location is {formatted_distance} from the issue; resolution requires being within {threshold_meters}m")]
    OutsideGeofence {
        /// Measured distance in meters.
        distance_meters: f64,
        /// Human-readable distance ("37m", "1.2km").
        formatted_distance: String,
        /// Tier the distance classified into.
        tier: AccuracyTier,
        /// Threshold that was applied.
        threshold_meters: f64,
    },

    /// Underlying database failure.
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Types of errors that can occur while serving requests.
///
/// This enum categorizes actual failure conditions, counted per-process and
/// surfaced at the status and metrics endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Identity
    AuthFailure,
    SessionExpired,
    // Verification
    InvalidCoordinates,
    ResolutionRejected,
    // Intake
    UploadRejected,
    ValidationFailure,
    // Storage
    DatabaseError,
}

/// Types of warnings: degraded but accepted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
#[allow(clippy::enum_variant_names)] // All variants start with "Missing" by design
pub enum WarningType {
    MissingAddress,
    MissingResponsePhoto,
}

/// Types of informational metrics: notable events that are neither errors
/// nor warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    IssueReported,
    StatusChanged,
    ResolutionVerified,
    NotificationSent,
    UploadStored,
    EventBroadcast,
}
