//! Authoritative in-memory store of channels and messages.
//!
//! The store owns the channel collection, allocates identifiers, and
//! serializes mutations against readers.

use crate::channel::{Channel, ChannelId, ChannelSummary};
use crate::message::Message;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::debug;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Mutation targeted a channel id that does not exist.
    #[error("Channel not found: {0}")]
    ChannelNotFound(ChannelId),
}

/// The authoritative channel/message store.
///
/// Channels are kept in creation order. Mutations take the write lock and
/// allocate ids inside it, so ids are gapless and ordered with commits,
/// and readers never observe a half-appended message or a partially
/// initialized channel.
///
/// Ids come from one global counter per entity kind, so message ids are
/// unique across channels and safe for client-side cache merging.
pub struct ChannelStore {
    /// Channels in creation order.
    channels: RwLock<Vec<Channel>>,
    /// Next channel id.
    next_channel_id: AtomicU64,
    /// Next message id, global across channels.
    next_message_id: AtomicU64,
}

impl ChannelStore {
    /// Create an empty store. Id counters start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            channels: RwLock::new(Vec::new()),
            next_channel_id: AtomicU64::new(1),
            next_message_id: AtomicU64::new(1),
        }
    }

    /// List all channels in creation order.
    #[must_use]
    pub fn list_channels(&self) -> Vec<ChannelSummary> {
        self.channels.read().iter().map(Channel::summary).collect()
    }

    /// Fetch a channel with its full message sequence.
    ///
    /// Returns `None` when no channel has that id, which callers can tell
    /// apart from a channel with no messages.
    #[must_use]
    pub fn get_channel(&self, id: &str) -> Option<Channel> {
        self.channels.read().iter().find(|c| c.id == id).cloned()
    }

    /// Create a new, empty channel.
    ///
    /// Names are not checked for uniqueness.
    pub fn add_channel(&self, name: impl Into<String>) -> Channel {
        let mut channels = self.channels.write();
        let id = self
            .next_channel_id
            .fetch_add(1, Ordering::Relaxed)
            .to_string();
        let channel = Channel::new(id, name);
        channels.push(channel.clone());
        debug!(channel = %channel.id, name = %channel.name, "Channel created");
        channel
    }

    /// Append a message to a channel.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ChannelNotFound` when no channel has the given
    /// id; no state changes in that case.
    pub fn add_message(
        &self,
        channel_id: &str,
        text: impl Into<String>,
    ) -> Result<Message, StoreError> {
        let mut channels = self.channels.write();
        let channel = channels
            .iter_mut()
            .find(|c| c.id == channel_id)
            .ok_or_else(|| StoreError::ChannelNotFound(channel_id.to_string()))?;

        let id = self
            .next_message_id
            .fetch_add(1, Ordering::Relaxed)
            .to_string();
        let message = Message::new(id, text);
        channel.messages.push(message.clone());
        debug!(channel = %channel_id, message = %message.id, "Message appended");
        Ok(message)
    }

    /// Get the number of channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.read().len()
    }

    /// Get the number of messages in a channel, or `None` if the channel
    /// does not exist.
    #[must_use]
    pub fn message_count(&self, channel_id: &str) -> Option<usize> {
        self.channels
            .read()
            .iter()
            .find(|c| c.id == channel_id)
            .map(Channel::message_count)
    }
}

impl Default for ChannelStore {
    fn default() -> Self {
        Self::new()
    }
}
