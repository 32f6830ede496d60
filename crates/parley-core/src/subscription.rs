//! Per-subscriber event filtering.
//!
//! All message events share one broker topic; a subscription narrows that
//! stream to the events one listener cares about. Rejected events are
//! silently dropped. Dropping the subscription drops the underlying
//! receiver, which deregisters the broker listener.

use crate::broker::TopicReceiver;
use futures_util::stream::{self, Stream};
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::warn;

/// Predicate deciding whether a subscriber sees an event.
pub type EventPredicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// A topic registration narrowed by a per-event predicate.
pub struct Subscription<T> {
    /// The raw broker registration. Dropped with the subscription.
    receiver: TopicReceiver<T>,
    /// Accept/reject decision per event.
    predicate: EventPredicate<T>,
}

impl<T: Clone + Send + 'static> Subscription<T> {
    /// Wrap a raw topic receiver with an accept/reject predicate.
    #[must_use]
    pub fn new(
        receiver: TopicReceiver<T>,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            receiver,
            predicate: Box::new(predicate),
        }
    }

    /// Receive the next accepted event.
    ///
    /// Suspends until an event passes the predicate. Events overwritten
    /// while this subscriber lagged are skipped. Returns `None` once the
    /// topic's sender side is gone and the buffer is drained.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if (self.predicate)(&event) => return Some(event),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Subscriber lagged; events dropped");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Receive the next accepted event without suspending.
    ///
    /// Returns `None` when no accepted event is currently buffered.
    pub fn try_recv(&mut self) -> Option<T> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if (self.predicate)(&event) => return Some(event),
                Ok(_) => continue,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Subscriber lagged; events dropped");
                    continue;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Convert into a lazy, unbounded stream of accepted events.
    ///
    /// The stream ends when the topic's sender side is gone. Dropping the
    /// stream cancels the underlying registration.
    pub fn into_stream(self) -> impl Stream<Item = T> {
        stream::unfold(self, |mut subscription| async move {
            subscription.recv().await.map(|event| (event, subscription))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::Broker;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_predicate_filters_events() {
        let broker: Broker<u32> = Broker::new();
        let mut evens = Subscription::new(broker.subscribe("numbers"), |n: &u32| n % 2 == 0);

        broker.publish("numbers", 1);
        broker.publish("numbers", 2);
        broker.publish("numbers", 3);
        broker.publish("numbers", 4);

        assert_eq!(evens.recv().await, Some(2));
        assert_eq!(evens.recv().await, Some(4));
        assert!(evens.try_recv().is_none());
    }

    #[test]
    fn test_drop_cancels_broker_registration() {
        let broker: Broker<u32> = Broker::new();
        let subscription = Subscription::new(broker.subscribe("numbers"), |_: &u32| true);

        assert_eq!(broker.subscriber_count("numbers"), 1);
        drop(subscription);
        assert_eq!(broker.subscriber_count("numbers"), 0);
    }

    #[tokio::test]
    async fn test_recv_drains_then_ends_when_sender_is_gone() {
        let broker: Broker<u32> = Broker::new();
        let mut subscription = Subscription::new(broker.subscribe("numbers"), |_: &u32| true);

        broker.publish("numbers", 7);
        drop(broker);

        assert_eq!(subscription.recv().await, Some(7));
        assert_eq!(subscription.recv().await, None);
    }

    #[tokio::test]
    async fn test_lagged_subscriber_skips_overwritten_events() {
        let broker: Broker<u32> = Broker::with_capacity(2);
        let mut subscription = Subscription::new(broker.subscribe("numbers"), |_: &u32| true);

        for n in 1..=5 {
            broker.publish("numbers", n);
        }

        // Only the last two fit the ring; the gap is skipped, not an error.
        assert_eq!(subscription.recv().await, Some(4));
        assert_eq!(subscription.recv().await, Some(5));
    }

    #[tokio::test]
    async fn test_stream_view_yields_accepted_events() {
        let broker: Broker<u32> = Broker::new();
        let subscription = Subscription::new(broker.subscribe("numbers"), |n: &u32| *n > 10);

        broker.publish("numbers", 5);
        broker.publish("numbers", 15);
        drop(broker);

        let collected: Vec<u32> = subscription.into_stream().collect().await;
        assert_eq!(collected, vec![15]);
    }
}
