//! Shared utility functions.

pub mod sanitize;

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// All persisted timestamps use this representation.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
