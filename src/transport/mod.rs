//! Transport layer for the control channel.
//!
//! - **Framing**: [`Frame`], [`extract_frames`] and [`FrameBuffer`] split the
//!   byte stream into tagged messages
//! - **Keepalive**: [`PingTracker`] schedules pings and keeps latency statistics
//! - **Stream setup**: the [`Connector`] seam and the rustls-backed [`TlsConnector`]
//! - **Session**: [`Connection`] owns the stream and the authentication state machine
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            Engine loop                  │
//! ├─────────────────────────────────────────┤
//! │   Connection  (state, keepalive)        │  ← This module
//! │   FrameBuffer (tag + length framing)    │
//! ├─────────────────────────────────────────┤
//! │            TLS over TCP                 │
//! └─────────────────────────────────────────┘
//! ```

mod connection;
mod frame;
mod media;
mod timing;
mod tls;

pub use connection::*;
pub use frame::*;
pub use media::{MEDIA_RECV_BUFFER_SIZE, MediaSocket};
pub use timing::PingTracker;
pub use tls::Connector;
#[cfg(feature = "tls")]
pub use tls::TlsConnector;

/// In-memory connector and wire helpers shared by the crate's tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::io;

    use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
    use tokio::sync::mpsc;

    use super::{Connector, Frame};
    use crate::core::{Address, ConnectionError, ConnectionResult};
    use crate::core::constants::FRAME_HEADER_SIZE;
    use crate::proto::Message;

    /// Hands the server half of every new duplex pair to the test.
    pub struct DuplexConnector {
        servers: mpsc::UnboundedSender<DuplexStream>,
    }

    impl DuplexConnector {
        pub fn new() -> (Self, mpsc::UnboundedReceiver<DuplexStream>) {
            let (tx, rx) = mpsc::unbounded_channel();
            (Self { servers: tx }, rx)
        }
    }

    impl Connector for DuplexConnector {
        type Stream = DuplexStream;

        async fn connect(&self, _address: &Address) -> ConnectionResult<DuplexStream> {
            let (client, server) = tokio::io::duplex(64 * 1024);
            self.servers.send(server).map_err(|_| {
                ConnectionError::Transport(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "test server gone",
                ))
            })?;
            Ok(client)
        }
    }

    pub async fn read_frame(server: &mut DuplexStream) -> Frame {
        let mut header = [0u8; FRAME_HEADER_SIZE];
        server.read_exact(&mut header).await.unwrap();
        let (tag, len) = super::peek_header(&header).unwrap();
        let mut payload = vec![0u8; len as usize];
        server.read_exact(&mut payload).await.unwrap();
        Frame::new(tag, payload)
    }

    pub async fn write_message(server: &mut DuplexStream, message: Message) {
        server.write_all(&message.to_frame().encode().unwrap()).await.unwrap();
    }
}
