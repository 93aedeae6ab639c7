//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Resolves when ctrl-c is received or the token is cancelled, whichever
/// comes first, then cancels the token so every holder observes shutdown.
pub async fn wait_for_shutdown(cancel: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                log::warn!("Failed to listen for ctrl-c: {e}");
            } else {
                log::info!("Shutdown signal received");
            }
        }
        _ = cancel.cancelled() => {}
    }
    cancel.cancel();
}
