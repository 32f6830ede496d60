//! Named-topic publish/subscribe hub.
//!
//! The broker is fully decoupled from the store: it accepts arbitrary
//! events under arbitrary topic names and fans them out to the listeners
//! registered at publish time.

use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Default per-topic broadcast capacity.
const DEFAULT_TOPIC_CAPACITY: usize = 1024;

/// A raw receiver for one topic registration.
///
/// Dropping the receiver deregisters the listener.
pub type TopicReceiver<T> = broadcast::Receiver<T>;

/// A generic named-topic publish/subscribe hub.
///
/// Topics are created implicitly on first subscribe; publishing to a topic
/// nobody listens on is a no-op, not an error. Each topic is a bounded
/// broadcast ring: a listener that falls more than `capacity` events
/// behind observes a lag gap and skips the overwritten events instead of
/// blocking the publisher.
pub struct Broker<T> {
    /// Topic senders indexed by name.
    topics: DashMap<String, broadcast::Sender<T>>,
    /// Per-topic ring capacity.
    capacity: usize,
}

impl<T: Clone + Send + 'static> Broker<T> {
    /// Create a broker with the default per-topic capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TOPIC_CAPACITY)
    }

    /// Create a broker with a specific per-topic capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "topic capacity must be non-zero");
        Self {
            topics: DashMap::new(),
            capacity,
        }
    }

    /// Subscribe to a topic, creating it if it does not exist.
    ///
    /// The receiver only sees events published after registration; there
    /// is no backlog replay. Dropping the receiver unsubscribes it, even
    /// while publishes are in flight.
    pub fn subscribe(&self, topic: &str) -> TopicReceiver<T> {
        let sender = self.topics.entry(topic.to_string()).or_insert_with(|| {
            debug!(topic = %topic, "Creating topic");
            broadcast::channel(self.capacity).0
        });
        let receiver = sender.subscribe();
        debug!(topic = %topic, subscribers = sender.receiver_count(), "Subscribed");
        receiver
    }

    /// Publish an event to every current listener of a topic.
    ///
    /// Returns the number of listeners the event was delivered to; zero
    /// when the topic is unknown or has no listeners.
    pub fn publish(&self, topic: &str, event: T) -> usize {
        let Some(sender) = self.topics.get(topic) else {
            trace!(topic = %topic, "Publish to topic with no listeners");
            return 0;
        };
        let delivered = sender.send(event).unwrap_or_default();
        drop(sender);

        if delivered == 0 {
            // The last listener is gone; drop the idle topic entry so the
            // registry does not grow without bound.
            self.topics.remove_if(topic, |_, s| s.receiver_count() == 0);
        }

        trace!(topic = %topic, recipients = delivered, "Published");
        delivered
    }

    /// Get the number of live topics.
    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Get the number of current listeners on a topic.
    #[must_use]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics
            .get(topic)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }
}

impl<T: Clone + Send + 'static> Default for Broker<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics_created_implicitly() {
        let broker: Broker<u32> = Broker::new();
        assert_eq!(broker.topic_count(), 0);

        let _rx = broker.subscribe("numbers");
        assert_eq!(broker.topic_count(), 1);
        assert_eq!(broker.subscriber_count("numbers"), 1);
    }

    #[test]
    fn test_publish_without_listeners_is_noop() {
        let broker: Broker<u32> = Broker::new();
        assert_eq!(broker.publish("numbers", 7), 0);
    }

    #[test]
    fn test_publish_reaches_every_listener() {
        let broker: Broker<u32> = Broker::new();
        let mut rx1 = broker.subscribe("numbers");
        let mut rx2 = broker.subscribe("numbers");

        assert_eq!(broker.publish("numbers", 7), 2);
        assert_eq!(rx1.try_recv().unwrap(), 7);
        assert_eq!(rx2.try_recv().unwrap(), 7);
    }

    #[test]
    fn test_topics_are_isolated() {
        let broker: Broker<u32> = Broker::new();
        let mut numbers = broker.subscribe("numbers");
        let mut letters = broker.subscribe("letters");

        broker.publish("numbers", 7);

        assert_eq!(numbers.try_recv().unwrap(), 7);
        assert!(letters.try_recv().is_err());
    }

    #[test]
    fn test_no_backlog_replay() {
        let broker: Broker<u32> = Broker::new();
        let _early = broker.subscribe("numbers");
        broker.publish("numbers", 7);

        let mut late = broker.subscribe("numbers");
        assert!(late.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_deregistered() {
        let broker: Broker<u32> = Broker::new();
        let rx1 = broker.subscribe("numbers");
        let mut rx2 = broker.subscribe("numbers");

        drop(rx1);
        assert_eq!(broker.publish("numbers", 7), 1);
        assert_eq!(rx2.try_recv().unwrap(), 7);
    }

    #[test]
    fn test_idle_topic_is_pruned_after_last_drop() {
        let broker: Broker<u32> = Broker::new();
        let rx = broker.subscribe("numbers");
        assert_eq!(broker.topic_count(), 1);

        drop(rx);
        assert_eq!(broker.publish("numbers", 7), 0);
        assert_eq!(broker.topic_count(), 0);
    }
}
