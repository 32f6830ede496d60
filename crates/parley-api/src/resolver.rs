//! The operation surface composing the store and broker.
//!
//! Mutations pass through one serialization region covering both the
//! store commit and the broker publish, so per-channel delivery order
//! always matches append order.

use crate::config::EngineConfig;
use parking_lot::Mutex;
use parley_core::{
    Broker, Channel, ChannelStore, ChannelSummary, Message, MessageAdded, StoreError,
    Subscription, MESSAGE_ADDED_TOPIC,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// The public operation set of the messaging engine.
///
/// Constructed once at process start and handed to the transport layer;
/// tests build fresh instances for isolation. There is no process-global
/// state.
pub struct Resolver {
    /// Authoritative channel/message state.
    store: Arc<ChannelStore>,
    /// Fan-out hub for change notifications.
    broker: Arc<Broker<MessageAdded>>,
    /// Serializes mutations so publish order matches append order.
    mutation: Mutex<()>,
}

impl Resolver {
    /// Create an engine with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    /// Create an engine from configuration, replaying any seed channels
    /// through the normal mutations.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        let resolver = Self {
            store: Arc::new(ChannelStore::new()),
            broker: Arc::new(Broker::with_capacity(config.broker.capacity)),
            mutation: Mutex::new(()),
        };

        for seed in &config.seed.channels {
            let channel = resolver.add_channel(&seed.name);
            for text in &seed.messages {
                if let Err(error) = resolver.add_message(&channel.id, text) {
                    warn!(%error, channel = %channel.id, "Seed message dropped");
                }
            }
        }

        resolver
    }

    /// List all channels in creation order.
    #[must_use]
    pub fn channels(&self) -> Vec<ChannelSummary> {
        self.store.list_channels()
    }

    /// Fetch one channel with its full message sequence.
    ///
    /// `None` is the not-found result; callers render it as such rather
    /// than treating it as a fault.
    #[must_use]
    pub fn channel(&self, id: &str) -> Option<Channel> {
        self.store.get_channel(id)
    }

    /// Create a new channel.
    ///
    /// Channel creation is not subscribable; no event is published.
    pub fn add_channel(&self, name: &str) -> Channel {
        let _guard = self.mutation.lock();
        self.store.add_channel(name)
    }

    /// Append a message and notify subscribers of its channel.
    ///
    /// The publish happens inside the mutation region, strictly after the
    /// store commit.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ChannelNotFound` for an unknown channel id;
    /// nothing is published in that case.
    pub fn add_message(&self, channel_id: &str, text: &str) -> Result<Message, StoreError> {
        let _guard = self.mutation.lock();
        let message = self.store.add_message(channel_id, text)?;

        let delivered = self.broker.publish(
            MESSAGE_ADDED_TOPIC,
            MessageAdded {
                channel_id: channel_id.to_string(),
                message: message.clone(),
            },
        );
        debug!(
            channel = %channel_id,
            message = %message.id,
            recipients = delivered,
            "Message published"
        );

        Ok(message)
    }

    /// Subscribe to messages appended to one channel.
    ///
    /// Returns a live sequence carrying only that channel's events,
    /// starting with events published after registration. Dropping the
    /// subscription cancels it.
    #[must_use]
    pub fn subscribe_message_added(&self, channel_id: &str) -> Subscription<MessageAdded> {
        let receiver = self.broker.subscribe(MESSAGE_ADDED_TOPIC);
        let channel_id = channel_id.to_string();
        debug!(channel = %channel_id, "Message subscription registered");
        Subscription::new(receiver, move |event: &MessageAdded| {
            event.channel_id == channel_id
        })
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
