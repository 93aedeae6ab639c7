//! Database migration management.
//!
//! Schema lives in versioned `.sql` files under `migrations/`; sqlx tracks
//! applied versions in its own bookkeeping table, so running this on every
//! startup is safe.

use sqlx::{Pool, Sqlite};

/// Applies any pending SQLx migrations from the `migrations/` directory.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), anyhow::Error> {
    let migrations_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir.as_path()).await?;
    migrator.run(pool).await?;
    log::debug!("Database migrations up to date");
    Ok(())
}
