//! Message and event types for Parley.

use crate::channel::ChannelId;
use serde::{Deserialize, Serialize};

/// A message identifier.
pub type MessageId = String;

/// The topic carrying all message-added events.
///
/// Every committed append is broadcast under this one topic, whatever its
/// channel; subscribers narrow it with a per-channel filter.
pub const MESSAGE_ADDED_TOPIC: &str = "messageAdded";

/// An immutable text entry appended to exactly one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// Text payload.
    pub text: String,
}

impl Message {
    /// Create a new message.
    #[must_use]
    pub fn new(id: impl Into<MessageId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Broadcast record for a committed message append.
///
/// Exists only transiently during delivery; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAdded {
    /// Channel the message was appended to.
    pub channel_id: ChannelId,
    /// The appended message.
    pub message: Message,
}
