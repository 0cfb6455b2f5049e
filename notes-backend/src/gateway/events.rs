//! Fan-out of gateway events to connected listeners.
//!
//! Delivery is best-effort: no replay for late subscribers, no acks, and a
//! listener whose receiver is gone is dropped on the next broadcast. A
//! listener that falls behind by `LISTENER_QUEUE_SIZE` events misses the
//! overflow; the broadcaster never waits on it.

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::protocol::GatewayEvent;

/// Events held for one listener before new ones are dropped
pub const LISTENER_QUEUE_SIZE: usize = 16;

pub struct EventBroadcaster {
    clients: DashMap<String, mpsc::Sender<GatewayEvent>>,
}

impl EventBroadcaster {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }

    /// Register a listener. Only events broadcast after this call reach it.
    pub fn subscribe(&self) -> (String, mpsc::Receiver<GatewayEvent>) {
        let client_id = uuid::Uuid::new_v4().to_string();
        let (tx, rx) = mpsc::channel(LISTENER_QUEUE_SIZE);
        self.clients.insert(client_id.clone(), tx);
        log::debug!(
            "[GATEWAY] Listener {} subscribed ({} total)",
            client_id,
            self.clients.len()
        );
        (client_id, rx)
    }

    pub fn unsubscribe(&self, client_id: &str) {
        if self.clients.remove(client_id).is_some() {
            log::debug!(
                "[GATEWAY] Listener {} unsubscribed ({} remaining)",
                client_id,
                self.clients.len()
            );
        }
    }

    /// Send `event` to every listener. Returns how many accepted it.
    pub fn broadcast(&self, event: GatewayEvent) -> usize {
        let mut delivered = 0;
        let mut dead = Vec::new();

        for entry in self.clients.iter() {
            match entry.value().try_send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    log::warn!(
                        "[GATEWAY] Listener {} is not keeping up, dropped '{}'",
                        entry.key(),
                        event.event
                    );
                }
                Err(TrySendError::Closed(_)) => dead.push(entry.key().clone()),
            }
        }

        // Removal happens after iteration; DashMap shards are locked while iterating.
        for client_id in dead {
            self.unsubscribe(&client_id);
        }

        log::debug!(
            "[GATEWAY] Broadcast '{}' to {} listener(s)",
            event.event,
            delivered
        );
        delivered
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::protocol::NOTES_CHANGED;

    fn event(n: i64) -> GatewayEvent {
        GatewayEvent::new(NOTES_CHANGED, serde_json::json!([{ "note_id": n }]))
    }

    #[tokio::test]
    async fn test_every_listener_receives_broadcast() {
        let broadcaster = EventBroadcaster::new();
        let (_a, mut rx_a) = broadcaster.subscribe();
        let (_b, mut rx_b) = broadcaster.subscribe();

        assert_eq!(broadcaster.broadcast(event(1)), 2);

        assert_eq!(rx_a.recv().await.unwrap().data[0]["note_id"], 1);
        assert_eq!(rx_b.recv().await.unwrap().data[0]["note_id"], 1);
    }

    #[tokio::test]
    async fn test_late_listener_gets_no_replay() {
        let broadcaster = EventBroadcaster::new();
        broadcaster.broadcast(event(1));

        let (_id, mut rx) = broadcaster.subscribe();
        assert!(rx.try_recv().is_err());

        broadcaster.broadcast(event(2));
        assert_eq!(rx.recv().await.unwrap().data[0]["note_id"], 2);
    }

    #[tokio::test]
    async fn test_unsubscribed_listener_stops_receiving() {
        let broadcaster = EventBroadcaster::new();
        let (id, mut rx) = broadcaster.subscribe();

        broadcaster.unsubscribe(&id);
        assert_eq!(broadcaster.client_count(), 0);
        assert_eq!(broadcaster.broadcast(event(1)), 0);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_dropped_receiver_does_not_affect_others() {
        let broadcaster = EventBroadcaster::new();
        let (_gone, rx_gone) = broadcaster.subscribe();
        let (_live, mut rx_live) = broadcaster.subscribe();
        drop(rx_gone);

        assert_eq!(broadcaster.broadcast(event(3)), 1);
        assert_eq!(broadcaster.client_count(), 1);
        assert_eq!(rx_live.recv().await.unwrap().data[0]["note_id"], 3);
    }

    #[tokio::test]
    async fn test_stalled_listener_drops_overflow_only() {
        let broadcaster = EventBroadcaster::new();
        let (_stalled, mut rx_stalled) = broadcaster.subscribe();
        let (_live, mut rx_live) = broadcaster.subscribe();

        let total = LISTENER_QUEUE_SIZE as i64 + 10;
        for n in 0..total {
            let delivered = broadcaster.broadcast(event(n));
            assert!(delivered >= 1);
            assert_eq!(rx_live.recv().await.unwrap().data[0]["note_id"], n);
        }

        // Still registered: a full queue is not a disconnect.
        assert_eq!(broadcaster.client_count(), 2);

        let mut queued = 0;
        while let Ok(ev) = rx_stalled.try_recv() {
            assert_eq!(ev.data[0]["note_id"], queued);
            queued += 1;
        }
        assert_eq!(queued, LISTENER_QUEUE_SIZE as i64);

        // Once drained it receives again.
        broadcaster.broadcast(event(total));
        assert_eq!(rx_stalled.recv().await.unwrap().data[0]["note_id"], total);
    }
}
