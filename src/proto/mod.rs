//! Control message kinds and the tag → decoder dispatch table.
//!
//! The frame layer only knows `(tag, payload)` pairs. This module maps a tag
//! to its [`MessageKind`] and decodes the payload into a typed [`Message`].
//! Unknown tags and malformed payloads surface as [`DispatchError`], which
//! callers log and skip; neither is ever fatal to the connection.

mod schema;

use prost::Message as _;
use thiserror::Error;

use crate::core::constants::{CLIENT_RELEASE, pack_version};
use crate::core::Credentials;
use crate::transport::Frame;

pub use schema::*;
pub use schema::permission_denied::DenyType;
pub use schema::reject::RejectType;

/// Message type identifiers, as carried in the frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum MessageKind {
    /// Version announcement.
    Version = 0,
    /// Tunneled voice packet.
    UdpTunnel = 1,
    /// Authentication request.
    Authenticate = 2,
    /// Keepalive.
    Ping = 3,
    /// Authentication refused.
    Reject = 4,
    /// Initial state complete.
    ServerSync = 5,
    /// Channel removed.
    ChannelRemove = 6,
    /// Channel state.
    ChannelState = 7,
    /// User removed.
    UserRemove = 8,
    /// User state.
    UserState = 9,
    /// Ban list.
    BanList = 10,
    /// Chat message.
    TextMessage = 11,
    /// Permission denied.
    PermissionDenied = 12,
    /// Access control list.
    Acl = 13,
    /// User id/name query.
    QueryUsers = 14,
    /// Voice crypto setup.
    CryptSetup = 15,
    /// Context action added/removed.
    ContextActionModify = 16,
    /// Context action triggered.
    ContextAction = 17,
    /// Registered user list.
    UserList = 18,
    /// Voice target.
    VoiceTarget = 19,
    /// Permission query.
    PermissionQuery = 20,
    /// Codec version.
    CodecVersion = 21,
    /// User statistics.
    UserStats = 22,
    /// Blob request.
    RequestBlob = 23,
    /// Server configuration.
    ServerConfig = 24,
    /// Suggested client configuration.
    SuggestConfig = 25,
}

impl MessageKind {
    /// Every kind, in tag order.
    pub const ALL: [MessageKind; 26] = [
        MessageKind::Version,
        MessageKind::UdpTunnel,
        MessageKind::Authenticate,
        MessageKind::Ping,
        MessageKind::Reject,
        MessageKind::ServerSync,
        MessageKind::ChannelRemove,
        MessageKind::ChannelState,
        MessageKind::UserRemove,
        MessageKind::UserState,
        MessageKind::BanList,
        MessageKind::TextMessage,
        MessageKind::PermissionDenied,
        MessageKind::Acl,
        MessageKind::QueryUsers,
        MessageKind::CryptSetup,
        MessageKind::ContextActionModify,
        MessageKind::ContextAction,
        MessageKind::UserList,
        MessageKind::VoiceTarget,
        MessageKind::PermissionQuery,
        MessageKind::CodecVersion,
        MessageKind::UserStats,
        MessageKind::RequestBlob,
        MessageKind::ServerConfig,
        MessageKind::SuggestConfig,
    ];

    /// Look up a kind by its wire tag.
    pub fn from_tag(tag: u16) -> Option<Self> {
        Self::ALL.get(usize::from(tag)).copied()
    }

    /// Wire tag of this kind.
    pub fn tag(self) -> u16 {
        self as u16
    }
}

/// Errors from the dispatch table. Both are non-fatal.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DispatchError {
    /// The tag is not a known message kind.
    #[error("unknown message tag {0}")]
    UnknownTag(u16),

    /// The payload did not decode as the tagged kind.
    #[error("malformed {kind:?} payload: {source}")]
    Malformed {
        /// Kind named by the frame tag.
        kind: MessageKind,
        /// Schema decode failure.
        source: prost::DecodeError,
    },
}

/// A decoded control message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Version announcement.
    Version(Version),
    /// Tunneled voice packet.
    UdpTunnel(UdpTunnel),
    /// Authentication request.
    Authenticate(Authenticate),
    /// Keepalive.
    Ping(Ping),
    /// Authentication refused.
    Reject(Reject),
    /// Initial state complete.
    ServerSync(ServerSync),
    /// Channel removed.
    ChannelRemove(ChannelRemove),
    /// Channel state.
    ChannelState(ChannelState),
    /// User removed.
    UserRemove(UserRemove),
    /// User state.
    UserState(UserState),
    /// Ban list.
    BanList(BanList),
    /// Chat message.
    TextMessage(TextMessage),
    /// Permission denied.
    PermissionDenied(PermissionDenied),
    /// Access control list.
    Acl(Acl),
    /// User id/name query.
    QueryUsers(QueryUsers),
    /// Voice crypto setup.
    CryptSetup(CryptSetup),
    /// Context action added/removed.
    ContextActionModify(ContextActionModify),
    /// Context action triggered.
    ContextAction(ContextAction),
    /// Registered user list.
    UserList(UserList),
    /// Voice target.
    VoiceTarget(VoiceTarget),
    /// Permission query.
    PermissionQuery(PermissionQuery),
    /// Codec version.
    CodecVersion(CodecVersion),
    /// User statistics.
    UserStats(UserStats),
    /// Blob request.
    RequestBlob(RequestBlob),
    /// Server configuration.
    ServerConfig(ServerConfig),
    /// Suggested client configuration.
    SuggestConfig(SuggestConfig),
}

/// Decode a frame payload according to its tag.
///
/// This is the static dispatch table: one arm per kind.
pub fn decode(tag: u16, payload: &[u8]) -> Result<Message, DispatchError> {
    let kind = MessageKind::from_tag(tag).ok_or(DispatchError::UnknownTag(tag))?;
    let malformed = |source| DispatchError::Malformed { kind, source };

    let message = match kind {
        MessageKind::Version => Message::Version(Version::decode(payload).map_err(malformed)?),
        // Tunneled voice is carried raw, not as a protobuf message.
        MessageKind::UdpTunnel => Message::UdpTunnel(UdpTunnel {
            packet: payload.to_vec(),
        }),
        MessageKind::Authenticate => {
            Message::Authenticate(Authenticate::decode(payload).map_err(malformed)?)
        }
        MessageKind::Ping => Message::Ping(Ping::decode(payload).map_err(malformed)?),
        MessageKind::Reject => Message::Reject(Reject::decode(payload).map_err(malformed)?),
        MessageKind::ServerSync => {
            Message::ServerSync(ServerSync::decode(payload).map_err(malformed)?)
        }
        MessageKind::ChannelRemove => {
            Message::ChannelRemove(ChannelRemove::decode(payload).map_err(malformed)?)
        }
        MessageKind::ChannelState => {
            Message::ChannelState(ChannelState::decode(payload).map_err(malformed)?)
        }
        MessageKind::UserRemove => {
            Message::UserRemove(UserRemove::decode(payload).map_err(malformed)?)
        }
        MessageKind::UserState => {
            Message::UserState(UserState::decode(payload).map_err(malformed)?)
        }
        MessageKind::BanList => Message::BanList(BanList::decode(payload).map_err(malformed)?),
        MessageKind::TextMessage => {
            Message::TextMessage(TextMessage::decode(payload).map_err(malformed)?)
        }
        MessageKind::PermissionDenied => {
            Message::PermissionDenied(PermissionDenied::decode(payload).map_err(malformed)?)
        }
        MessageKind::Acl => Message::Acl(Acl::decode(payload).map_err(malformed)?),
        MessageKind::QueryUsers => {
            Message::QueryUsers(QueryUsers::decode(payload).map_err(malformed)?)
        }
        MessageKind::CryptSetup => {
            Message::CryptSetup(CryptSetup::decode(payload).map_err(malformed)?)
        }
        MessageKind::ContextActionModify => Message::ContextActionModify(
            ContextActionModify::decode(payload).map_err(malformed)?,
        ),
        MessageKind::ContextAction => {
            Message::ContextAction(ContextAction::decode(payload).map_err(malformed)?)
        }
        MessageKind::UserList => {
            Message::UserList(UserList::decode(payload).map_err(malformed)?)
        }
        MessageKind::VoiceTarget => {
            Message::VoiceTarget(VoiceTarget::decode(payload).map_err(malformed)?)
        }
        MessageKind::PermissionQuery => {
            Message::PermissionQuery(PermissionQuery::decode(payload).map_err(malformed)?)
        }
        MessageKind::CodecVersion => {
            Message::CodecVersion(CodecVersion::decode(payload).map_err(malformed)?)
        }
        MessageKind::UserStats => {
            Message::UserStats(UserStats::decode(payload).map_err(malformed)?)
        }
        MessageKind::RequestBlob => {
            Message::RequestBlob(RequestBlob::decode(payload).map_err(malformed)?)
        }
        MessageKind::ServerConfig => {
            Message::ServerConfig(ServerConfig::decode(payload).map_err(malformed)?)
        }
        MessageKind::SuggestConfig => {
            Message::SuggestConfig(SuggestConfig::decode(payload).map_err(malformed)?)
        }
    };

    Ok(message)
}

/// Decode a whole frame. See [`decode`].
pub fn decode_frame(frame: &Frame) -> Result<Message, DispatchError> {
    decode(frame.tag, &frame.payload)
}

impl Message {
    /// Kind of this message.
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Version(_) => MessageKind::Version,
            Message::UdpTunnel(_) => MessageKind::UdpTunnel,
            Message::Authenticate(_) => MessageKind::Authenticate,
            Message::Ping(_) => MessageKind::Ping,
            Message::Reject(_) => MessageKind::Reject,
            Message::ServerSync(_) => MessageKind::ServerSync,
            Message::ChannelRemove(_) => MessageKind::ChannelRemove,
            Message::ChannelState(_) => MessageKind::ChannelState,
            Message::UserRemove(_) => MessageKind::UserRemove,
            Message::UserState(_) => MessageKind::UserState,
            Message::BanList(_) => MessageKind::BanList,
            Message::TextMessage(_) => MessageKind::TextMessage,
            Message::PermissionDenied(_) => MessageKind::PermissionDenied,
            Message::Acl(_) => MessageKind::Acl,
            Message::QueryUsers(_) => MessageKind::QueryUsers,
            Message::CryptSetup(_) => MessageKind::CryptSetup,
            Message::ContextActionModify(_) => MessageKind::ContextActionModify,
            Message::ContextAction(_) => MessageKind::ContextAction,
            Message::UserList(_) => MessageKind::UserList,
            Message::VoiceTarget(_) => MessageKind::VoiceTarget,
            Message::PermissionQuery(_) => MessageKind::PermissionQuery,
            Message::CodecVersion(_) => MessageKind::CodecVersion,
            Message::UserStats(_) => MessageKind::UserStats,
            Message::RequestBlob(_) => MessageKind::RequestBlob,
            Message::ServerConfig(_) => MessageKind::ServerConfig,
            Message::SuggestConfig(_) => MessageKind::SuggestConfig,
        }
    }

    /// Serialize the payload (without frame header).
    pub fn encode_to_vec(&self) -> Vec<u8> {
        match self {
            Message::Version(m) => m.encode_to_vec(),
            Message::UdpTunnel(m) => m.packet.clone(),
            Message::Authenticate(m) => m.encode_to_vec(),
            Message::Ping(m) => m.encode_to_vec(),
            Message::Reject(m) => m.encode_to_vec(),
            Message::ServerSync(m) => m.encode_to_vec(),
            Message::ChannelRemove(m) => m.encode_to_vec(),
            Message::ChannelState(m) => m.encode_to_vec(),
            Message::UserRemove(m) => m.encode_to_vec(),
            Message::UserState(m) => m.encode_to_vec(),
            Message::BanList(m) => m.encode_to_vec(),
            Message::TextMessage(m) => m.encode_to_vec(),
            Message::PermissionDenied(m) => m.encode_to_vec(),
            Message::Acl(m) => m.encode_to_vec(),
            Message::QueryUsers(m) => m.encode_to_vec(),
            Message::CryptSetup(m) => m.encode_to_vec(),
            Message::ContextActionModify(m) => m.encode_to_vec(),
            Message::ContextAction(m) => m.encode_to_vec(),
            Message::UserList(m) => m.encode_to_vec(),
            Message::VoiceTarget(m) => m.encode_to_vec(),
            Message::PermissionQuery(m) => m.encode_to_vec(),
            Message::CodecVersion(m) => m.encode_to_vec(),
            Message::UserStats(m) => m.encode_to_vec(),
            Message::RequestBlob(m) => m.encode_to_vec(),
            Message::ServerConfig(m) => m.encode_to_vec(),
            Message::SuggestConfig(m) => m.encode_to_vec(),
        }
    }

    /// Wrap this message in a frame.
    pub fn to_frame(&self) -> Frame {
        Frame::new(self.kind().tag(), self.encode_to_vec())
    }
}

// =============================================================================
// OUTBOUND CONSTRUCTORS
// =============================================================================

impl Version {
    /// Build a version announcement, packing `version` into 24 bits.
    pub fn from_info(
        release: impl Into<String>,
        version: (u8, u8, u8),
        os: impl Into<String>,
        os_version: impl Into<String>,
    ) -> Self {
        let (major, minor, patch) = version;
        Self {
            version: Some(pack_version(major, minor, patch)),
            release: Some(release.into()),
            os: Some(os.into()),
            os_version: Some(os_version.into()),
        }
    }

    /// The announcement this client sends on connect.
    pub fn client(version: (u8, u8, u8)) -> Self {
        Self::from_info(
            CLIENT_RELEASE,
            version,
            std::env::consts::OS,
            std::env::consts::ARCH,
        )
    }
}

impl Authenticate {
    /// Build an authentication request from credentials and access tokens.
    pub fn from_info(credentials: &Credentials, tokens: &[String]) -> Self {
        Self {
            username: Some(credentials.name().to_string()),
            password: Some(credentials.password().to_string()),
            tokens: tokens.to_vec(),
            celt_versions: Vec::new(),
            opus: Some(true),
        }
    }
}

impl Ping {
    /// Build a keepalive carrying our TCP latency statistics.
    pub fn from_info(timestamp: u64, average: f64, variance: f64, samples: u32) -> Self {
        Self {
            timestamp: Some(timestamp),
            tcp_packets: Some(samples),
            tcp_ping_avg: Some(average as f32),
            tcp_ping_var: Some(variance as f32),
            ..Default::default()
        }
    }
}

impl Reject {
    /// Rejection category, if the server sent a known one.
    pub fn reject_type(&self) -> Option<RejectType> {
        self.r#type.and_then(|value| RejectType::try_from(value).ok())
    }
}

impl From<UserState> for Message {
    fn from(message: UserState) -> Self {
        Message::UserState(message)
    }
}

impl From<TextMessage> for Message {
    fn from(message: TextMessage) -> Self {
        Message::TextMessage(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_are_dense() {
        for (index, kind) in MessageKind::ALL.iter().enumerate() {
            assert_eq!(usize::from(kind.tag()), index);
            assert_eq!(MessageKind::from_tag(kind.tag()), Some(*kind));
        }
        assert_eq!(MessageKind::from_tag(26), None);
        assert_eq!(MessageKind::from_tag(u16::MAX), None);
    }

    #[test]
    fn test_decode_every_kind_from_empty_or_minimal_payload() {
        // Kinds with only optional/repeated fields decode from an empty payload.
        let empty_ok = [
            MessageKind::Version,
            MessageKind::Authenticate,
            MessageKind::Ping,
            MessageKind::Reject,
            MessageKind::ServerSync,
            MessageKind::ChannelState,
            MessageKind::UserState,
            MessageKind::BanList,
            MessageKind::PermissionDenied,
            MessageKind::QueryUsers,
            MessageKind::CryptSetup,
            MessageKind::UserList,
            MessageKind::VoiceTarget,
            MessageKind::PermissionQuery,
            MessageKind::UserStats,
            MessageKind::RequestBlob,
            MessageKind::ServerConfig,
            MessageKind::SuggestConfig,
        ];
        for kind in empty_ok {
            let message = decode(kind.tag(), &[]).unwrap();
            assert_eq!(message.kind(), kind);
        }
    }

    #[test]
    fn test_decode_unknown_tag() {
        assert_eq!(decode(99, b"whatever"), Err(DispatchError::UnknownTag(99)));
    }

    #[test]
    fn test_decode_malformed_payload() {
        // Field 1, wire type 2 (length-delimited), length 10 but only 1 byte follows.
        let err = decode(MessageKind::ServerSync.tag(), &[0x0a, 0x0a, 0x00]).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Malformed {
                kind: MessageKind::ServerSync,
                ..
            }
        ));
    }

    #[test]
    fn test_udp_tunnel_is_opaque() {
        let voice = hex::decode("80051240aabbcc").unwrap();
        let message = decode(MessageKind::UdpTunnel.tag(), &voice).unwrap();
        assert_eq!(
            message,
            Message::UdpTunnel(UdpTunnel {
                packet: voice.clone()
            })
        );

        let frame = message.to_frame();
        assert_eq!(frame.tag, 1);
        assert_eq!(frame.payload, voice);

        // Not a valid protobuf encoding either.
        let other = decode(1, &[0x20, 0x01, 0x02, 0x03, 0x04]).unwrap();
        assert_eq!(other.encode_to_vec(), vec![0x20, 0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_decode_text_message() {
        let sent = TextMessage {
            actor: Some(3),
            channel_id: vec![0],
            message: "hello".into(),
            ..Default::default()
        };
        let frame = Message::from(sent.clone()).to_frame();
        assert_eq!(frame.tag, 11);
        assert_eq!(decode_frame(&frame).unwrap(), Message::TextMessage(sent));
    }

    #[test]
    fn test_version_packing() {
        let version = Version::from_info("Whisper test", (1, 2, 4), "linux", "x86_64");
        assert_eq!(version.version, Some(0x0001_0204));
        assert_eq!(version.release(), "Whisper test");
    }

    #[test]
    fn test_authenticate_from_credentials() {
        let creds = Credentials::new("alice", "secret");
        let auth = Authenticate::from_info(&creds, &["red".to_string()]);
        assert_eq!(auth.username(), "alice");
        assert_eq!(auth.password(), "secret");
        assert_eq!(auth.tokens, vec!["red".to_string()]);
        assert_eq!(auth.opus, Some(true));
    }

    #[test]
    fn test_ping_from_info() {
        let ping = Ping::from_info(1234, 40.0, 2.5, 3);
        assert_eq!(ping.timestamp, Some(1234));
        assert_eq!(ping.tcp_ping_avg, Some(40.0));
        assert_eq!(ping.tcp_ping_var, Some(2.5));
        assert_eq!(ping.tcp_packets, Some(3));
    }

    #[test]
    fn test_reject_type() {
        let reject = Reject {
            r#type: Some(RejectType::ServerFull as i32),
            reason: Some("full".into()),
        };
        assert_eq!(reject.reject_type(), Some(RejectType::ServerFull));

        let unknown = Reject {
            r#type: Some(42),
            reason: None,
        };
        assert_eq!(unknown.reject_type(), None);
    }
}
