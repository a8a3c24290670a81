//! Whisper client: the engine actor and the handles to talk to it.
//!
//! [`Client::spawn`] starts an engine task that owns the connection and the
//! session [`Directory`]. The application submits [`Task`]s and reads
//! [`Event`]s; those two queues are the only shared state.

#[allow(clippy::module_inception)]
mod client;
mod config;
mod directory;
mod engine;
mod event;
mod task;

pub use client::*;
pub use config::*;
pub use directory::{Channel, Directory, User};
pub use event::Event;
pub use task::{ChannelRef, Task, UserRef};
