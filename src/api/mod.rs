//! HTTP API surface.
//!
//! A single axum `Router` carrying the whole platform: identity, issues and
//! responses, notifications, uploads, admin, the SSE change feed, and the
//! monitoring endpoints (`/api/status` JSON, `/api/metrics` Prometheus).

mod error;
mod handlers;
mod types;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use tokio_util::sync::CancellationToken;

use crate::config::MAX_UPLOAD_BYTES;

pub use error::ApiError;
pub use types::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Identity
        .route("/api/auth/sign-up", post(handlers::auth::sign_up))
        .route("/api/auth/sign-in", post(handlers::auth::sign_in))
        .route("/api/auth/sign-out", post(handlers::auth::sign_out))
        .route("/api/auth/me", get(handlers::auth::me))
        // Issues
        .route(
            "/api/issues",
            get(handlers::issues::list_issues).post(handlers::issues::create_issue),
        )
        .route("/api/issues/{id}", get(handlers::issues::get_issue))
        .route(
            "/api/issues/{id}/responses",
            get(handlers::issues::list_issue_responses).post(handlers::issues::respond),
        )
        .route("/api/stats", get(handlers::issues::dashboard_stats))
        // Notifications
        .route("/api/notifications", get(handlers::notifications::list))
        .route(
            "/api/notifications/unread-count",
            get(handlers::notifications::unread_count),
        )
        .route(
            "/api/notifications/{id}/read",
            post(handlers::notifications::mark_read),
        )
        .route(
            "/api/notifications/read-all",
            post(handlers::notifications::mark_all_read),
        )
        // Uploads
        .route("/api/uploads", post(handlers::uploads::upload))
        .route("/uploads/{filename}", get(handlers::uploads::serve))
        // Admin
        .route("/api/admin/users", get(handlers::admin::list_users))
        .route("/api/admin/users/{id}/role", post(handlers::admin::set_role))
        .route(
            "/api/admin/users/{id}/approve",
            post(handlers::admin::approve),
        )
        .route("/api/admin/analytics", get(handlers::admin::analytics))
        .route("/api/admin/actions", get(handlers::admin::actions))
        // Change feed
        .route("/api/events", get(handlers::events::events))
        // Monitoring
        .route("/api/healthz", get(handlers::status::health))
        .route("/api/status", get(handlers::status::status_handler))
        .route("/api/metrics", get(handlers::metrics::metrics_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .with_state(state)
}

/// Binds the listener and serves the API until the token is cancelled.
pub async fn start_server(
    port: u16,
    state: AppState,
    cancel: CancellationToken,
) -> Result<(), anyhow::Error> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind API server to port {}: {}", port, e))?;

    log::info!("API server listening on http://0.0.0.0:{}/", port);
    log::info!("  - Status: http://127.0.0.1:{}/api/status", port);
    log::info!("  - Metrics: http://127.0.0.1:{}/api/metrics", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

    Ok(())
}
