//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for each component (init, database, auth,
//!   resolution verification)
//! - Per-process event counters (errors, warnings, info metrics)
//!
//! Event types are categorized into:
//! - **Errors**: Failures that prevented a request from succeeding
//! - **Warnings**: Degraded but accepted input (e.g. a response without a photo)
//! - **Info**: Notable events (issues reported, resolutions verified, ...)

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{
    AuthError, DatabaseError, ErrorType, InfoType, InitializationError, ResolutionError,
    WarningType,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        for warning_type in WarningType::iter() {
            assert_eq!(stats.get_warning_count(warning_type), 0);
        }
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::AuthFailure);
        assert_eq!(stats.get_error_count(ErrorType::AuthFailure), 1);

        stats.increment_warning(WarningType::MissingResponsePhoto);
        assert_eq!(stats.get_warning_count(WarningType::MissingResponsePhoto), 1);

        stats.increment_info(InfoType::IssueReported);
        assert_eq!(stats.get_info_count(InfoType::IssueReported), 1);
    }

    #[test]
    fn test_processing_stats_multiple_increments() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::ResolutionRejected);
        stats.increment_error(ErrorType::ResolutionRejected);
        stats.increment_error(ErrorType::ResolutionRejected);
        assert_eq!(stats.get_error_count(ErrorType::ResolutionRejected), 3);
    }

    #[test]
    fn test_processing_stats_totals() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::InvalidCoordinates);
        stats.increment_error(ErrorType::DatabaseError);
        stats.increment_warning(WarningType::MissingAddress);
        stats.increment_info(InfoType::NotificationSent);

        assert_eq!(stats.total_errors(), 2);
        assert_eq!(stats.total_warnings(), 1);
        assert_eq!(stats.total_info(), 1);
    }

    #[test]
    fn test_resolution_error_message_includes_distance() {
        let err = ResolutionError::OutsideGeofence {
            distance_meters: 120.0,
            formatted_distance: "120m".to_string(),
            tier: crate::geo::AccuracyTier::Poor,
            threshold_meters: 50.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("120m"));
        assert!(msg.contains("50"));
    }
}
