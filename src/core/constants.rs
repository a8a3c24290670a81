//! Protocol constants for the Mumble control channel.
//!
//! Wire-level values are fixed by the protocol and MUST NOT be changed.
//! Timing values are defaults; [`ClientConfig`](crate::client::ClientConfig)
//! can override them per client.

use std::time::Duration;

// =============================================================================
// ENDPOINT
// =============================================================================

/// Default server port.
pub const DEFAULT_PORT: u16 = 64738;

/// Default server host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default display name when none is configured.
pub const DEFAULT_USERNAME: &str = "Anonymous";

// =============================================================================
// HANDSHAKE
// =============================================================================

/// Protocol version announced in the Version message, as (major, minor, patch).
pub const PROTOCOL_VERSION: (u8, u8, u8) = (1, 2, 4);

/// Client release string announced in the Version message.
pub const CLIENT_RELEASE: &str = concat!("Whisper ", env!("CARGO_PKG_VERSION"));

/// Pack a (major, minor, patch) triple into the 24-bit wire representation.
///
/// The layout is `(major << 16) | (minor << 8) | patch`.
pub const fn pack_version(major: u8, minor: u8, patch: u8) -> u32 {
    ((major as u32) << 16) | ((minor as u32) << 8) | patch as u32
}

/// Split a packed 24-bit version back into (major, minor, patch).
pub const fn unpack_version(packed: u32) -> (u8, u8, u8) {
    (
        ((packed >> 16) & 0xff) as u8,
        ((packed >> 8) & 0xff) as u8,
        (packed & 0xff) as u8,
    )
}

// =============================================================================
// FRAMING
// =============================================================================

/// Frame header size (2-byte type tag + 4-byte payload length, big-endian).
pub const FRAME_HEADER_SIZE: usize = 6;

/// Largest payload accepted from the server.
///
/// Servers cap control messages well below this; anything larger is treated
/// as a broken stream rather than buffered.
pub const MAX_PAYLOAD_SIZE: usize = 8 * 1024 * 1024 - 1;

/// Bytes read from the control socket per poll.
pub const READ_BUFFER_SIZE: usize = 4096;

// =============================================================================
// KEEPALIVE
// =============================================================================

/// Initial latency estimate before any sample arrives (milliseconds).
pub const DEFAULT_PING_AVERAGE_MS: f64 = 40.0;

/// Interval between keepalive pings.
pub const PING_INTERVAL: Duration = Duration::from_secs(10);

/// Silence after which the link is declared dead.
pub const PING_TIMEOUT: Duration = Duration::from_secs(60);

// =============================================================================
// ENGINE LOOP
// =============================================================================

/// Upper bound on a single socket poll.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Pause between inner-loop iterations.
pub const LOOP_INTERVAL: Duration = Duration::from_millis(100);

/// Wait before re-establishing a session after it ended.
pub const RECONNECT_BACKOFF: Duration = Duration::from_secs(1);

/// TCP + TLS connect timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
