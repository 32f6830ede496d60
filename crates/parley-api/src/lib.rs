//! # parley-api
//!
//! Operation surface for the Parley messaging engine.
//!
//! This crate is what a query or transport layer binds to:
//!
//! - **Resolver** - The public operation set composing store and broker
//! - **EngineConfig** - TOML/env configuration and seed channels
//! - **DeliverySink** - Where subscription events get pushed
//!
//! The crate does not parse requests or serialize responses; it assumes a
//! surrounding layer invokes these operations with validated inputs.

pub mod config;
pub mod resolver;
pub mod sink;

pub use config::{EngineConfig, SeedChannel};
pub use resolver::Resolver;
pub use sink::{pump, ChannelSink, DeliverySink, SinkError};
