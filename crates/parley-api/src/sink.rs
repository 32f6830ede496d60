//! Delivery sinks: where subscription events get pushed.
//!
//! The engine is agnostic to what sits behind a sink: a socket writer, an
//! in-process callback, or a test harness. A sink that fails takes down
//! only its own pump, never the publisher or other listeners.

use async_trait::async_trait;
use parley_core::{MessageAdded, Subscription};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Sink errors.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The receiving side is gone.
    #[error("Sink closed")]
    Closed,

    /// The sink refused the event.
    #[error("Delivery rejected: {0}")]
    Rejected(String),
}

/// A transport-provided push target for subscription events.
#[async_trait]
pub trait DeliverySink: Send {
    /// Push one event to the listener behind this sink.
    async fn deliver(&mut self, event: MessageAdded) -> Result<(), SinkError>;
}

/// An mpsc-backed sink for in-process consumers and tests.
pub struct ChannelSink {
    sender: mpsc::Sender<MessageAdded>,
}

impl ChannelSink {
    /// Create a sink with a bounded buffer, returning the consuming side.
    #[must_use]
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<MessageAdded>) {
        let (sender, receiver) = mpsc::channel(buffer);
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl DeliverySink for ChannelSink {
    async fn deliver(&mut self, event: MessageAdded) -> Result<(), SinkError> {
        self.sender.send(event).await.map_err(|_| SinkError::Closed)
    }
}

/// Forward accepted events from a subscription into a sink.
///
/// Runs until the subscription ends or the sink fails; a failed delivery
/// is logged and ends only this pump. Returns the number of events
/// delivered.
pub async fn pump<S: DeliverySink>(
    mut subscription: Subscription<MessageAdded>,
    sink: &mut S,
) -> usize {
    let mut delivered = 0;
    while let Some(event) = subscription.recv().await {
        let channel_id = event.channel_id.clone();
        if let Err(error) = sink.deliver(event).await {
            warn!(%error, channel = %channel_id, "Dropping listener after failed delivery");
            break;
        }
        delivered += 1;
    }
    debug!(delivered, "Delivery pump finished");
    delivered
}
