//! # parley-core
//!
//! Core engine for the Parley group-messaging backend.
//!
//! This crate provides the fundamental building blocks:
//!
//! - **ChannelStore** - Authoritative in-memory channels and messages
//! - **Broker** - Generic named-topic publish/subscribe hub
//! - **Subscription** - Per-subscriber filtered event sequences
//! - **Channel / Message** - The data model
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  Mutation   │────▶│ ChannelStore │────▶│   Broker    │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                                                 │
//!                                                 ▼
//!                                         ┌──────────────┐
//!                                         │ Subscription │──▶ listener
//!                                         └──────────────┘
//! ```
//!
//! Every committed message append is broadcast under one shared topic;
//! each subscription narrows that stream to a single channel.

pub mod broker;
pub mod channel;
pub mod message;
pub mod store;
pub mod subscription;

pub use broker::{Broker, TopicReceiver};
pub use channel::{Channel, ChannelId, ChannelSummary};
pub use message::{Message, MessageAdded, MessageId, MESSAGE_ADDED_TOPIC};
pub use store::{ChannelStore, StoreError};
pub use subscription::Subscription;
