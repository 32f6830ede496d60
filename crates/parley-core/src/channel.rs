//! Channel data model for Parley.
//!
//! A channel is a named container of ordered messages, owned exclusively
//! by the store.

use crate::message::Message;
use serde::{Deserialize, Serialize};

/// A channel identifier.
pub type ChannelId = String;

/// A named container of ordered messages.
///
/// Message order is arrival order; the store only ever appends. Channels
/// are never deleted or re-parented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Unique channel identifier.
    pub id: ChannelId,
    /// Display name. Not required to be unique.
    pub name: String,
    /// Messages in append order.
    pub messages: Vec<Message>,
}

impl Channel {
    /// Create a new, empty channel.
    #[must_use]
    pub fn new(id: impl Into<ChannelId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            messages: Vec::new(),
        }
    }

    /// Get the summary view (id and name, without messages).
    #[must_use]
    pub fn summary(&self) -> ChannelSummary {
        ChannelSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    /// Get the number of messages in the channel.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

/// A channel without its message sequence, as returned by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSummary {
    /// Unique channel identifier.
    pub id: ChannelId,
    /// Display name.
    pub name: String,
}
