//! # Whisper Protocol
//!
//! A persistent control-channel client for Mumble-compatible voice chat
//! servers. Whisper keeps one TLS session open, authenticates, answers
//! keepalives, tracks the channel and user directory, and reconnects after
//! the session drops.
//!
//! - **Framing**: 2-byte tag, 4-byte length, protobuf payload
//! - **Dispatch**: one typed [`proto::Message`] per tag, unknown tags skipped
//! - **Keepalive**: pings on a fixed interval with running latency statistics
//! - **Actor**: a single engine task fed by [`Task`]s, reporting [`Event`]s
//!
//! ## Feature Flags
//!
//! - `tls` (default): rustls-backed [`transport::TlsConnector`] and [`Client::spawn`]
//! - `config` (default): TOML loading for [`ClientConfig`]
//!
//! ## Modules
//!
//! - [`core`]: Addresses, credentials, constants, and error types
//! - [`proto`]: Control-message schema and the tag dispatch table
//! - [`transport`]: Framing, ping tracking, TLS setup, and the connection state machine
//! - [`client`]: The engine loop and the application-facing handles
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use whisper_protocol::prelude::*;
//!
//! # async fn run() -> Result<(), ClientError> {
//! let config = ClientBuilder::new()
//!     .address(Address::new("voice.example.org", 64738))
//!     .username("bot")
//!     .build();
//!
//! let (client, mut events) = Client::spawn(config)?;
//! client.request_full_tree()?;
//!
//! while let Some(event) = events.recv().await {
//!     match event {
//!         Event::FullTreeSnapshot { channels, users } => {
//!             println!("{} channels, {} users", channels.len(), users.len());
//!             client.stop()?;
//!         }
//!         Event::Disconnected { error } => println!("disconnected: {error:?}"),
//!         _ => {}
//!     }
//! }
//! client.join().await
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod client;
pub mod core;
pub mod proto;
pub mod transport;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::client::{
        Channel, ChannelRef, Client, ClientBuilder, ClientConfig, ClientError, Directory, Event,
        EventReceiver, Task, TaskSender, User, UserRef,
    };
    pub use crate::core::*;
    pub use crate::proto::{Message, MessageKind};
    pub use crate::transport::{Connection, ConnectionState, Connector, Frame, PingTracker};

    #[cfg(feature = "tls")]
    pub use crate::transport::TlsConnector;
}

// Re-export commonly used items at crate root
pub use client::{Client, ClientBuilder, ClientConfig, ClientError, Event, Task};
pub use core::{Address, ConnectionError, Credentials};
