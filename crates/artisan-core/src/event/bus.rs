//! Broadcast event bus for distributing `WorkspaceEvent` to view subscribers.
//!
//! Built on `tokio::sync::broadcast`. Publishing with no active subscribers
//! is a no-op; a subscriber unsubscribes by dropping its receiver.

use artisan_types::workspace::WorkspaceEvent;
use tokio::sync::broadcast;

/// Multi-consumer bus for workspace state transitions.
///
/// Cloning the bus clones the sender, so the engine and any number of
/// handles can hand out receivers on the same channel.
pub struct EventBus {
    sender: broadcast::Sender<WorkspaceEvent>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Create a new subscriber that will receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<WorkspaceEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: WorkspaceEvent) {
        let _ = self.sender.send(event);
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_subscribe_delivers_event() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(WorkspaceEvent::IdeaProcessingStarted);

        let received = rx.recv().await.unwrap();
        assert_eq!(received, WorkspaceEvent::IdeaProcessingStarted);
    }

    #[tokio::test]
    async fn multiple_subscribers_each_receive_event() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(WorkspaceEvent::RefineCompleted { count: 5 });

        assert_eq!(rx1.recv().await.unwrap(), WorkspaceEvent::RefineCompleted { count: 5 });
        assert_eq!(rx2.recv().await.unwrap(), WorkspaceEvent::RefineCompleted { count: 5 });
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::new(16);
        bus.publish(WorkspaceEvent::Closed);
        assert_eq!(bus.receiver_count(), 0);
    }

    #[test]
    fn dropped_receiver_unsubscribes() {
        let bus = EventBus::new(16);
        let rx = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);
        drop(rx);
        assert_eq!(bus.receiver_count(), 0);
    }

    #[test]
    fn lagged_receiver_reports_lag() {
        let bus = EventBus::new(4);
        let mut rx = bus.subscribe();

        for i in 0..10 {
            bus.publish(WorkspaceEvent::GhostUpdated {
                text: format!("ghost {i}"),
            });
        }

        match rx.try_recv() {
            Err(broadcast::error::TryRecvError::Lagged(n)) => assert!(n > 0),
            other => panic!("expected lag, got {other:?}"),
        }
    }

    #[test]
    fn clone_shares_channel() {
        let bus = EventBus::new(16);
        let bus2 = bus.clone();
        let mut rx = bus.subscribe();

        bus2.publish(WorkspaceEvent::IdeaChanged);

        assert_eq!(rx.try_recv().unwrap(), WorkspaceEvent::IdeaChanged);
    }
}
