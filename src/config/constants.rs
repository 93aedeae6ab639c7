//! Configuration constants.
//!
//! Operational parameters used throughout the service: default paths,
//! size limits, session lifetimes, and channel capacities.

/// Default SQLite database path.
pub const DB_PATH: &str = "./civic_status.db";

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default directory for uploaded photo evidence.
pub const UPLOAD_DIR: &str = "./uploads";

/// Maximum accepted photo upload size in bytes (5MB).
/// Uploads larger than this are rejected before being written to disk.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Content types accepted for photo evidence.
pub const ALLOWED_PHOTO_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

// User text limits
/// Maximum issue title length in characters.
pub const MAX_TITLE_LENGTH: usize = 200;
/// Maximum issue description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;
/// Maximum response message length in characters.
pub const MAX_MESSAGE_LENGTH: usize = 5000;
/// Maximum address length in characters.
pub const MAX_ADDRESS_LENGTH: usize = 500;

// Identity
/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Session lifetime in days. Expired sessions are reaped lazily on lookup.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Capacity of the in-process change-event broadcast channel.
/// Slow subscribers that fall more than this many events behind skip ahead;
/// the feed is a refresh signal, not a replayable log.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Window used for the "issues this week" analytics figure, in days.
pub const ANALYTICS_WINDOW_DAYS: i64 = 7;
