//! civic_status library: civic issue reporting with geofence-verified resolutions.
//!
//! This library provides the full backend for a civic issue-reporting
//! platform: citizens submit infrastructure complaints with photo and
//! geolocation evidence, officials triage and resolve them, and
//! administrators manage users and view analytics. Resolution claims are
//! gated by a Haversine geofence check against the reported location.
//!
//! # Example
//!
//! ```no_run
//! use civic_status::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     port: 9090,
//!     ..Default::default()
//! };
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod geo;
pub mod initialization;
pub mod realtime;
pub mod resolution;
pub mod storage;
mod uploads;
pub mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use run::run_server;
pub use storage::{init_db_pool_with_path, run_migrations};
pub use uploads::{store_photo, StoredPhoto, UploadError};

// Internal run module (server startup and lifecycle)
mod run {
    use std::sync::Arc;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::info;
    use tokio_util::sync::CancellationToken;

    use crate::api::AppState;
    use crate::app::wait_for_shutdown;
    use crate::config::Config;
    use crate::error_handling::ProcessingStats;
    use crate::initialization::ensure_upload_dir;
    use crate::realtime::ChangeFeed;
    use crate::storage::{init_db_pool_with_path, run_migrations};

    /// Runs the API server with the provided configuration.
    ///
    /// This is the main entry point for the library. It prepares the upload
    /// directory, initializes the database (creating the file and applying
    /// migrations as needed), optionally bootstraps a super_admin account,
    /// and serves the HTTP API until ctrl-c.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload directory cannot be prepared, database
    /// initialization fails, or the listener cannot bind.
    pub async fn run_server(config: Config) -> Result<()> {
        ensure_upload_dir(&config.upload_dir)
            .context("Failed to prepare upload directory")?;

        let pool = init_db_pool_with_path(&config.db_path)
            .await
            .context("Failed to initialize database pool")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        if let Some(ref spec) = config.bootstrap_admin {
            crate::auth::bootstrap_super_admin(&pool, spec)
                .await
                .context("Failed to bootstrap admin account")?;
        }

        let stats = Arc::new(ProcessingStats::new());
        let state = AppState {
            pool: Arc::clone(&pool),
            feed: ChangeFeed::new(),
            stats: Arc::clone(&stats),
            start_time: Arc::new(Instant::now()),
            upload_dir: Arc::new(config.upload_dir.clone()),
            db_path: Arc::new(config.db_path.clone()),
        };

        info!("Starting civic_status (db: {})", config.db_path.display());

        let cancel = CancellationToken::new();
        let shutdown_task = tokio::spawn(wait_for_shutdown(cancel.clone()));

        let result = crate::api::start_server(config.port, state, cancel.clone()).await;

        cancel.cancel();
        let _ = shutdown_task.await;

        stats.log_summary();
        info!("Server stopped");

        result
    }
}
