//! Control session lifecycle and authentication state machine.
//!
//! A [`Connection`] owns the control stream, the optional media socket, the
//! receive buffer and the [`PingTracker`] for exactly one session. The
//! engine creates a fresh one per session.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info, warn};

use super::frame::{Frame, FrameBuffer};
use super::media::MediaSocket;
use super::timing::PingTracker;
use super::tls::Connector;
use crate::core::constants::{
    MAX_PAYLOAD_SIZE, PING_INTERVAL, PING_TIMEOUT, PROTOCOL_VERSION, READ_BUFFER_SIZE,
};
use crate::core::{Address, ConnectionError, ConnectionResult, Credentials};
use crate::proto::{Authenticate, MessageKind, Ping, Version};

/// Authentication state of a control session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    /// No stream open.
    #[default]
    NotConnected,
    /// Handshake sent, waiting for `ServerSync`.
    Authenticating,
    /// Server finished sending initial state.
    Connected,
    /// Unrecoverable error; only `close()` leaves this state.
    Failed,
}

impl ConnectionState {
    /// Check if a stream is expected to be open.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Authenticating | Self::Connected)
    }
}

/// Per-session parameters.
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    /// Server address.
    pub address: Address,
    /// Login information.
    pub credentials: Credentials,
    /// Access tokens sent with `Authenticate`.
    pub tokens: Vec<String>,
    /// Open the datagram socket alongside the control stream.
    pub media_enabled: bool,
    /// Interval between keepalives.
    pub ping_interval: Duration,
    /// Silence after which the link is dead.
    pub ping_timeout: Duration,
    /// Bytes read per poll.
    pub read_buffer_size: usize,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            address: Address::default(),
            credentials: Credentials::default(),
            tokens: Vec::new(),
            media_enabled: false,
            ping_interval: PING_INTERVAL,
            ping_timeout: PING_TIMEOUT,
            read_buffer_size: READ_BUFFER_SIZE,
        }
    }
}

/// One control session with a server.
pub struct Connection<C: Connector> {
    connector: Arc<C>,
    options: ConnectionOptions,
    stream: Option<C::Stream>,
    media: Option<MediaSocket>,
    state: ConnectionState,
    buffer: FrameBuffer,
    read_buf: Vec<u8>,
    ping: PingTracker,
}

impl<C: Connector> fmt::Debug for Connection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("address", &self.options.address)
            .field("state", &self.state)
            .field("media", &self.media.is_some())
            .field("pending", &self.buffer.pending_len())
            .field("ping", &self.ping)
            .finish()
    }
}

impl<C: Connector> Connection<C> {
    /// Create a closed connection.
    pub fn new(connector: Arc<C>, options: ConnectionOptions) -> Self {
        let ping = PingTracker::new(options.ping_interval, options.ping_timeout);
        let read_buf = vec![0u8; options.read_buffer_size.max(1)];
        Self {
            connector,
            options,
            stream: None,
            media: None,
            state: ConnectionState::NotConnected,
            buffer: FrameBuffer::new(),
            read_buf,
            ping,
        }
    }

    /// Current state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Session parameters.
    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// Keepalive statistics.
    pub fn ping(&self) -> &PingTracker {
        &self.ping
    }

    /// Datagram socket, when media is enabled and the session is open.
    pub fn media(&self) -> Option<&MediaSocket> {
        self.media.as_ref()
    }

    /// Establish the stream, send `Version` and `Authenticate`, and enter
    /// [`ConnectionState::Authenticating`].
    ///
    /// Authentication completes later, when `ServerSync` arrives. Refused
    /// with [`ConnectionError::AlreadyConnected`] while a session is open,
    /// including one still authenticating; call [`close`](Self::close) first.
    pub async fn open(&mut self) -> ConnectionResult<()> {
        if self.state.is_open() {
            return Err(ConnectionError::AlreadyConnected);
        }

        let address = self.options.address.clone();
        info!(%address, "opening control session");

        self.buffer.clear();
        self.ping.reset();
        self.stream = Some(self.connector.connect(&address).await?);

        if self.options.media_enabled {
            self.media = Some(MediaSocket::open(&address).await?);
        }

        let version = Version::client(PROTOCOL_VERSION);
        self.write_frame(MessageKind::Version, &version).await?;

        let auth = Authenticate::from_info(&self.options.credentials, &self.options.tokens);
        self.write_frame(MessageKind::Authenticate, &auth).await?;

        self.state = ConnectionState::Authenticating;
        debug!("handshake sent, authenticating");
        Ok(())
    }

    /// Shut down both sockets. Errors are logged, never returned.
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(err) = stream.shutdown().await {
                debug!(%err, "error shutting down control stream");
            }
            info!(address = %self.options.address, "control session closed");
        }
        self.media = None;
        self.buffer.clear();
        self.state = ConnectionState::NotConnected;
    }

    /// Serialize and write one message.
    ///
    /// A write failure marks the connection [`ConnectionState::Failed`];
    /// the caller must close it.
    pub async fn send<M: prost::Message>(
        &mut self,
        kind: MessageKind,
        message: &M,
    ) -> ConnectionResult<()> {
        if !self.state.is_open() {
            return Err(ConnectionError::NotConnected);
        }
        self.write_frame(kind, message).await
    }

    /// Send an application message; refused unless authenticated.
    pub async fn send_application<M: prost::Message>(
        &mut self,
        kind: MessageKind,
        message: &M,
    ) -> ConnectionResult<()> {
        if self.state != ConnectionState::Connected {
            return Err(ConnectionError::NotConnected);
        }
        self.write_frame(kind, message).await
    }

    /// Wait up to `timeout` for data and return every frame completed by it.
    ///
    /// A timeout yields an empty list. Frames completed by the same read as
    /// an oversized header are returned first; the next call then fails with
    /// [`ConnectionError::FrameTooLarge`].
    pub async fn poll(&mut self, timeout: Duration) -> ConnectionResult<Vec<Frame>> {
        self.check_pending_header()?;
        let stream = self.stream.as_mut().ok_or(ConnectionError::NotConnected)?;

        let read = match tokio::time::timeout(timeout, stream.read(&mut self.read_buf)).await {
            Ok(read) => read,
            Err(_) => return Ok(Vec::new()),
        };
        let n = match read {
            Ok(0) => {
                self.state = ConnectionState::Failed;
                return Err(ConnectionError::ClosedByPeer);
            }
            Ok(n) => n,
            Err(err) => {
                self.state = ConnectionState::Failed;
                return Err(err.into());
            }
        };

        self.buffer.extend(&self.read_buf[..n]);
        let frames = self.buffer.drain_frames();
        if frames.is_empty() {
            self.check_pending_header()?;
        }

        for frame in &frames {
            debug!(tag = frame.tag, len = frame.payload.len(), "frame received");
        }
        Ok(frames)
    }

    /// Send a keepalive if the interval has elapsed.
    ///
    /// Returns whether one was sent. Closes the connection and fails with
    /// [`ConnectionError::PingTimeout`] once replies have stopped.
    pub async fn send_keepalive_if_due(&mut self) -> ConnectionResult<bool> {
        if !self.ping.is_due() {
            return Ok(false);
        }
        self.send_keepalive().await?;

        if self.ping.has_timed_out() {
            warn!(
                last_reply = self.ping.time_received(),
                last_sent = self.ping.time_sent(),
                "keepalive timed out"
            );
            self.close().await;
            return Err(ConnectionError::PingTimeout);
        }
        Ok(true)
    }

    /// Send a keepalive now, regardless of schedule.
    pub async fn send_keepalive(&mut self) -> ConnectionResult<()> {
        let ping = Ping::from_info(
            self.ping.now(),
            self.ping.average(),
            self.ping.variance(),
            self.ping.sample_count(),
        );
        self.send(MessageKind::Ping, &ping).await?;
        self.ping.mark_sent();
        Ok(())
    }

    /// Feed a keepalive reply into the statistics.
    pub fn record_ping(&mut self) {
        self.ping.record_sample();
    }

    /// Move from `Authenticating` to `Connected`.
    ///
    /// Returns whether the state changed; in any other state this is a no-op.
    pub fn complete_authentication(&mut self) -> bool {
        if self.state == ConnectionState::Authenticating {
            self.state = ConnectionState::Connected;
            info!(address = %self.options.address, "authenticated");
            true
        } else {
            false
        }
    }

    /// Mark the session as unrecoverably broken.
    pub fn mark_failed(&mut self) {
        self.state = ConnectionState::Failed;
    }

    async fn write_frame<M: prost::Message>(
        &mut self,
        kind: MessageKind,
        message: &M,
    ) -> ConnectionResult<()> {
        let stream = self.stream.as_mut().ok_or(ConnectionError::NotConnected)?;
        let bytes = Frame::new(kind.tag(), message.encode_to_vec()).encode()?;

        let written = async {
            stream.write_all(&bytes).await?;
            stream.flush().await
        }
        .await;

        match written {
            Ok(()) => {
                debug!(?kind, len = bytes.len(), "frame sent");
                Ok(())
            }
            Err(err) => {
                self.state = ConnectionState::Failed;
                Err(err.into())
            }
        }
    }

    /// Fail the session if the buffered header declares an oversized payload.
    fn check_pending_header(&mut self) -> ConnectionResult<()> {
        match self.buffer.declared_len() {
            Some(len) if len > MAX_PAYLOAD_SIZE => {
                self.state = ConnectionState::Failed;
                Err(ConnectionError::FrameTooLarge {
                    len,
                    max: MAX_PAYLOAD_SIZE,
                })
            }
            _ => Ok(()),
        }
    }
}
