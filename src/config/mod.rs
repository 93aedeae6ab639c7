//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (paths, limits, lifetimes)
//! - CLI option types and the core `Config` struct

mod constants;
mod types;

pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
