//! Server-sent events endpoint for the row-change feed.

use std::convert::Infallible;

use axum::{
    extract::State,
    http::HeaderMap,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use tokio::sync::broadcast::error::RecvError;

use crate::api::error::ApiError;
use crate::api::types::AppState;

/// `GET /api/events`
///
/// Streams change events as SSE, one event per changed row, named after the
/// table. Subscribers that fall behind skip ahead; there is no replay.
pub async fn events(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    super::require_user(&state, &headers).await?;

    let rx = state.feed.subscribe();
    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(change) => {
                    match Event::default().event(change.table.as_str()).json_data(&change) {
                        Ok(event) => return Some((Ok(event), rx)),
                        Err(e) => {
                            log::warn!("Failed to serialize change event: {}", e);
                            continue;
                        }
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    log::debug!("SSE subscriber lagged, skipped {} events", skipped);
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
