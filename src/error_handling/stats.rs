//! Processing statistics tracking.
//!
//! Thread-safe per-process counters for errors, warnings, and informational
//! events, surfaced at the status and metrics endpoints.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType, WarningType};

/// Thread-safe event counter set.
///
/// Tracks errors, warnings, and informational metrics using atomic counters,
/// allowing concurrent access from any number of request handlers. All types
/// are initialized to zero on creation.
///
/// # Thread Safety
///
/// This struct is thread-safe and is shared across handlers via `Arc`.
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    warnings: HashMap<WarningType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl ProcessingStats {
    /// Creates a counter set with every known event type initialized to zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        let mut warnings = HashMap::new();
        for warning in WarningType::iter() {
            warnings.insert(warning, AtomicUsize::new(0));
        }

        let mut info = HashMap::new();
        for info_type in InfoType::iter() {
            info.insert(info_type, AtomicUsize::new(0));
        }

        ProcessingStats {
            errors,
            warnings,
            info,
        }
    }

    /// Increment an error counter.
    ///
    /// Every variant is initialized in the constructor, so the lookup cannot
    /// miss; if it somehow does, the event is logged and dropped rather than
    /// panicking the handler.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                error
            );
        }
    }

    /// Increment a warning counter.
    pub fn increment_warning(&self, warning: WarningType) {
        if let Some(counter) = self.warnings.get(&warning) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment warning counter for {:?} which is not in the map.",
                warning
            );
        }
    }

    /// Increment an info counter.
    pub fn increment_info(&self, info: InfoType) {
        if let Some(counter) = self.info.get(&info) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment info counter for {:?} which is not in the map.",
                info
            );
        }
    }

    /// Current count for a specific error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Current count for a specific warning type.
    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings
            .get(&warning)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Current count for a specific info type.
    pub fn get_info_count(&self, info: InfoType) -> usize {
        self.info
            .get(&info)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum of all error counters.
    pub fn total_errors(&self) -> usize {
        self.errors
            .values()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    /// Sum of all warning counters.
    pub fn total_warnings(&self) -> usize {
        self.warnings
            .values()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    /// Sum of all info counters.
    pub fn total_info(&self) -> usize {
        self.info.values().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    /// Logs all nonzero counters, one line per type.
    pub fn log_summary(&self) {
        for error in ErrorType::iter() {
            let count = self.get_error_count(error);
            if count > 0 {
                log::info!("errors.{:?}: {}", error, count);
            }
        }
        for warning in WarningType::iter() {
            let count = self.get_warning_count(warning);
            if count > 0 {
                log::info!("warnings.{:?}: {}", warning, count);
            }
        }
        for info in InfoType::iter() {
            let count = self.get_info_count(info);
            if count > 0 {
                log::info!("info.{:?}: {}", info, count);
            }
        }
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
