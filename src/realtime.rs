//! In-process row-change feed.
//!
//! A broadcast channel carrying `{table, op, id}` events, published on every
//! insert/update the service performs and consumed by the SSE endpoint.
//! Delivery is best-effort while subscribed: subscribers that fall behind
//! skip ahead, and nothing is replayed. Clients treat an event as a signal
//! to refresh, not as a data payload.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::config::EVENT_CHANNEL_CAPACITY;

/// Table a change event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTable {
    Issues,
    IssueResponses,
    Notifications,
    Profiles,
}

impl ChangeTable {
    /// Stable event-name string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeTable::Issues => "issues",
            ChangeTable::IssueResponses => "issue_responses",
            ChangeTable::Notifications => "notifications",
            ChangeTable::Profiles => "profiles",
        }
    }
}

/// What happened to the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
    Insert,
    Update,
}

/// A row-level change notification.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    /// Table the row belongs to.
    pub table: ChangeTable,
    /// Insert or update.
    pub op: ChangeOp,
    /// Primary key of the affected row.
    pub id: String,
}

/// Handle to the change-event channel.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    /// Creates a feed with the configured channel capacity.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Opens a new subscription. Events published before this call are not
    /// delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// Publishes an event. A send error only means there are currently no
    /// subscribers, which is not a failure.
    pub fn publish(&self, table: ChangeTable, op: ChangeOp, id: &str) {
        let event = ChangeEvent {
            table,
            op,
            id: id.to_string(),
        };
        if self.tx.send(event).is_err() {
            log::trace!("Change event dropped: no subscribers");
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_published_events() {
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();
        feed.publish(ChangeTable::Issues, ChangeOp::Insert, "abc");

        let event = rx.recv().await.expect("event should arrive");
        assert_eq!(event.table, ChangeTable::Issues);
        assert_eq!(event.op, ChangeOp::Insert);
        assert_eq!(event.id, "abc");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_not_an_error() {
        let feed = ChangeFeed::new();
        // Should not panic or block
        feed.publish(ChangeTable::Notifications, ChangeOp::Update, "x");
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_events_arrive_in_publish_order_per_subscriber() {
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();
        feed.publish(ChangeTable::Issues, ChangeOp::Insert, "1");
        feed.publish(ChangeTable::Issues, ChangeOp::Update, "1");

        assert_eq!(rx.recv().await.unwrap().op, ChangeOp::Insert);
        assert_eq!(rx.recv().await.unwrap().op, ChangeOp::Update);
    }
}
