//! Control-channel message schema.
//!
//! Hand-maintained prost definitions of the protocol's proto2 messages.
//! Field tags and types follow the upstream `Mumble.proto`; nested types live
//! in snake_case modules the way prost-build lays them out.

/// Client/server version announcement.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Version {
    /// Packed `(major << 16) | (minor << 8) | patch`.
    #[prost(uint32, optional, tag = "1")]
    pub version: Option<u32>,
    /// Release name.
    #[prost(string, optional, tag = "2")]
    pub release: Option<String>,
    /// Operating system.
    #[prost(string, optional, tag = "3")]
    pub os: Option<String>,
    /// Operating system version.
    #[prost(string, optional, tag = "4")]
    pub os_version: Option<String>,
}

/// Voice packet tunneled over the control channel.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UdpTunnel {
    /// Raw voice packet. The frame payload is this field's bytes verbatim.
    #[prost(bytes = "vec", required, tag = "1")]
    pub packet: Vec<u8>,
}

/// Client authentication request.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Authenticate {
    /// Display name.
    #[prost(string, optional, tag = "1")]
    pub username: Option<String>,
    /// Server or user password.
    #[prost(string, optional, tag = "2")]
    pub password: Option<String>,
    /// Access tokens for password-protected channels.
    #[prost(string, repeated, tag = "3")]
    pub tokens: Vec<String>,
    /// Supported CELT bitstream versions.
    #[prost(int32, repeated, tag = "4")]
    pub celt_versions: Vec<i32>,
    /// Whether the client supports Opus.
    #[prost(bool, optional, tag = "5")]
    pub opus: Option<bool>,
}

/// Keepalive carrying the sender's latency statistics.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Ping {
    /// Sender timestamp, echoed back by the peer.
    #[prost(uint64, optional, tag = "1")]
    pub timestamp: Option<u64>,
    /// Good UDP packets received.
    #[prost(uint32, optional, tag = "2")]
    pub good: Option<u32>,
    /// Late UDP packets received.
    #[prost(uint32, optional, tag = "3")]
    pub late: Option<u32>,
    /// Lost UDP packets.
    #[prost(uint32, optional, tag = "4")]
    pub lost: Option<u32>,
    /// Crypt resyncs.
    #[prost(uint32, optional, tag = "5")]
    pub resync: Option<u32>,
    /// UDP ping samples taken.
    #[prost(uint32, optional, tag = "6")]
    pub udp_packets: Option<u32>,
    /// TCP ping samples taken.
    #[prost(uint32, optional, tag = "7")]
    pub tcp_packets: Option<u32>,
    /// Mean UDP round-trip time.
    #[prost(float, optional, tag = "8")]
    pub udp_ping_avg: Option<f32>,
    /// UDP round-trip variance.
    #[prost(float, optional, tag = "9")]
    pub udp_ping_var: Option<f32>,
    /// Mean TCP round-trip time.
    #[prost(float, optional, tag = "10")]
    pub tcp_ping_avg: Option<f32>,
    /// TCP round-trip variance.
    #[prost(float, optional, tag = "11")]
    pub tcp_ping_var: Option<f32>,
}

/// Server refusal of an authentication attempt.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Reject {
    /// Rejection category.
    #[prost(enumeration = "reject::RejectType", optional, tag = "1")]
    pub r#type: Option<i32>,
    /// Human-readable reason.
    #[prost(string, optional, tag = "2")]
    pub reason: Option<String>,
}

/// Nested types for [`Reject`].
pub mod reject {
    /// Why the server refused the connection.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum RejectType {
        /// No reason given.
        None = 0,
        /// Client version is incompatible.
        WrongVersion = 1,
        /// Username is not acceptable.
        InvalidUsername = 2,
        /// Wrong password for a registered user.
        WrongUserPw = 3,
        /// Wrong server password.
        WrongServerPw = 4,
        /// Username already connected.
        UsernameInUse = 5,
        /// Server is full.
        ServerFull = 6,
        /// A certificate is required.
        NoCertificate = 7,
        /// External authenticator failed.
        AuthenticatorFail = 8,
    }
}

/// Sent once the server has transmitted the initial state; completes authentication.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServerSync {
    /// Our session id.
    #[prost(uint32, optional, tag = "1")]
    pub session: Option<u32>,
    /// Maximum allowed bandwidth.
    #[prost(uint32, optional, tag = "2")]
    pub max_bandwidth: Option<u32>,
    /// Welcome text.
    #[prost(string, optional, tag = "3")]
    pub welcome_text: Option<String>,
    /// Permissions in the root channel.
    #[prost(uint64, optional, tag = "4")]
    pub permissions: Option<u64>,
}

/// A channel was removed.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChannelRemove {
    /// Removed channel id.
    #[prost(uint32, required, tag = "1")]
    pub channel_id: u32,
}

/// Channel state or delta.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChannelState {
    /// Channel id.
    #[prost(uint32, optional, tag = "1")]
    pub channel_id: Option<u32>,
    /// Parent channel id.
    #[prost(uint32, optional, tag = "2")]
    pub parent: Option<u32>,
    /// Channel name.
    #[prost(string, optional, tag = "3")]
    pub name: Option<String>,
    /// Full set of linked channels.
    #[prost(uint32, repeated, tag = "4")]
    pub links: Vec<u32>,
    /// Channel description.
    #[prost(string, optional, tag = "5")]
    pub description: Option<String>,
    /// Links to add.
    #[prost(uint32, repeated, tag = "6")]
    pub links_add: Vec<u32>,
    /// Links to remove.
    #[prost(uint32, repeated, tag = "7")]
    pub links_remove: Vec<u32>,
    /// Temporary channel flag.
    #[prost(bool, optional, tag = "8")]
    pub temporary: Option<bool>,
    /// Sort position.
    #[prost(int32, optional, tag = "9")]
    pub position: Option<i32>,
    /// Hash of a description too large to send inline.
    #[prost(bytes = "vec", optional, tag = "10")]
    pub description_hash: Option<Vec<u8>>,
    /// Maximum users allowed.
    #[prost(uint32, optional, tag = "11")]
    pub max_users: Option<u32>,
}

/// A user left or was kicked/banned.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserRemove {
    /// Session of the removed user.
    #[prost(uint32, required, tag = "1")]
    pub session: u32,
    /// Session of the user who performed the kick/ban.
    #[prost(uint32, optional, tag = "2")]
    pub actor: Option<u32>,
    /// Kick/ban reason.
    #[prost(string, optional, tag = "3")]
    pub reason: Option<String>,
    /// True for a ban.
    #[prost(bool, optional, tag = "4")]
    pub ban: Option<bool>,
}

/// User state or delta.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserState {
    /// Session id.
    #[prost(uint32, optional, tag = "1")]
    pub session: Option<u32>,
    /// Session of the user who caused the change.
    #[prost(uint32, optional, tag = "2")]
    pub actor: Option<u32>,
    /// Display name.
    #[prost(string, optional, tag = "3")]
    pub name: Option<String>,
    /// Registered user id.
    #[prost(uint32, optional, tag = "4")]
    pub user_id: Option<u32>,
    /// Current channel.
    #[prost(uint32, optional, tag = "5")]
    pub channel_id: Option<u32>,
    /// Muted by an admin.
    #[prost(bool, optional, tag = "6")]
    pub mute: Option<bool>,
    /// Deafened by an admin.
    #[prost(bool, optional, tag = "7")]
    pub deaf: Option<bool>,
    /// Suppressed by the server.
    #[prost(bool, optional, tag = "8")]
    pub suppress: Option<bool>,
    /// Self-muted.
    #[prost(bool, optional, tag = "9")]
    pub self_mute: Option<bool>,
    /// Self-deafened.
    #[prost(bool, optional, tag = "10")]
    pub self_deaf: Option<bool>,
    /// Avatar image.
    #[prost(bytes = "vec", optional, tag = "11")]
    pub texture: Option<Vec<u8>>,
    /// Positional audio plugin context.
    #[prost(bytes = "vec", optional, tag = "12")]
    pub plugin_context: Option<Vec<u8>>,
    /// Positional audio plugin identity.
    #[prost(string, optional, tag = "13")]
    pub plugin_identity: Option<String>,
    /// User comment.
    #[prost(string, optional, tag = "14")]
    pub comment: Option<String>,
    /// Certificate hash.
    #[prost(string, optional, tag = "15")]
    pub hash: Option<String>,
    /// Hash of a comment too large to send inline.
    #[prost(bytes = "vec", optional, tag = "16")]
    pub comment_hash: Option<Vec<u8>>,
    /// Hash of a texture too large to send inline.
    #[prost(bytes = "vec", optional, tag = "17")]
    pub texture_hash: Option<Vec<u8>>,
    /// Priority speaker flag.
    #[prost(bool, optional, tag = "18")]
    pub priority_speaker: Option<bool>,
    /// Recording flag.
    #[prost(bool, optional, tag = "19")]
    pub recording: Option<bool>,
}

/// Server ban list.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BanList {
    /// Ban entries.
    #[prost(message, repeated, tag = "1")]
    pub bans: Vec<ban_list::BanEntry>,
    /// True when this is a request for the list.
    #[prost(bool, optional, tag = "2")]
    pub query: Option<bool>,
}

/// Nested types for [`BanList`].
pub mod ban_list {
    /// A single ban.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct BanEntry {
        /// Banned address bytes.
        #[prost(bytes = "vec", required, tag = "1")]
        pub address: Vec<u8>,
        /// Prefix length.
        #[prost(uint32, required, tag = "2")]
        pub mask: u32,
        /// Name of the banned user.
        #[prost(string, optional, tag = "3")]
        pub name: Option<String>,
        /// Certificate hash of the banned user.
        #[prost(string, optional, tag = "4")]
        pub hash: Option<String>,
        /// Ban reason.
        #[prost(string, optional, tag = "5")]
        pub reason: Option<String>,
        /// Ban start time.
        #[prost(string, optional, tag = "6")]
        pub start: Option<String>,
        /// Ban duration in seconds.
        #[prost(uint32, optional, tag = "7")]
        pub duration: Option<u32>,
    }
}

/// Chat message to users, channels or channel trees.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TextMessage {
    /// Sender session.
    #[prost(uint32, optional, tag = "1")]
    pub actor: Option<u32>,
    /// Target sessions.
    #[prost(uint32, repeated, tag = "2")]
    pub session: Vec<u32>,
    /// Target channels.
    #[prost(uint32, repeated, tag = "3")]
    pub channel_id: Vec<u32>,
    /// Target channel trees.
    #[prost(uint32, repeated, tag = "4")]
    pub tree_id: Vec<u32>,
    /// Message body.
    #[prost(string, required, tag = "5")]
    pub message: String,
}

/// An action was denied.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PermissionDenied {
    /// Denied permission bit.
    #[prost(uint32, optional, tag = "1")]
    pub permission: Option<u32>,
    /// Channel the check applied to.
    #[prost(uint32, optional, tag = "2")]
    pub channel_id: Option<u32>,
    /// Session the check applied to.
    #[prost(uint32, optional, tag = "3")]
    pub session: Option<u32>,
    /// Free-form reason.
    #[prost(string, optional, tag = "4")]
    pub reason: Option<String>,
    /// Denial category.
    #[prost(enumeration = "permission_denied::DenyType", optional, tag = "5")]
    pub r#type: Option<i32>,
    /// Offending name, for name-related denials.
    #[prost(string, optional, tag = "6")]
    pub name: Option<String>,
}

/// Nested types for [`PermissionDenied`].
pub mod permission_denied {
    /// Denial category.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum DenyType {
        /// Operator-supplied text.
        Text = 0,
        /// Missing permission.
        Permission = 1,
        /// Not allowed for SuperUser.
        SuperUser = 2,
        /// Invalid channel name.
        ChannelName = 3,
        /// Text message too long.
        TextTooLong = 4,
        /// Repeated message filter.
        H9k = 5,
        /// Not allowed in a temporary channel.
        TemporaryChannel = 6,
        /// A certificate is required.
        MissingCertificate = 7,
        /// Invalid username.
        UserName = 8,
        /// Channel is full.
        ChannelFull = 9,
        /// Channel nesting limit reached.
        NestingLimit = 10,
        /// Channel count limit reached.
        ChannelCountLimit = 11,
    }
}

/// Channel access control list.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Acl {
    /// Channel id.
    #[prost(uint32, required, tag = "1")]
    pub channel_id: u32,
    /// Inherit ACLs from the parent.
    #[prost(bool, optional, tag = "2")]
    pub inherit_acls: Option<bool>,
    /// Channel groups.
    #[prost(message, repeated, tag = "3")]
    pub groups: Vec<acl::ChanGroup>,
    /// ACL entries.
    #[prost(message, repeated, tag = "4")]
    pub acls: Vec<acl::ChanAcl>,
    /// True when this is a request.
    #[prost(bool, optional, tag = "5")]
    pub query: Option<bool>,
}

/// Nested types for [`Acl`].
pub mod acl {
    /// Channel group definition.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ChanGroup {
        /// Group name.
        #[prost(string, required, tag = "1")]
        pub name: String,
        /// Inherited from a parent channel.
        #[prost(bool, optional, tag = "2")]
        pub inherited: Option<bool>,
        /// Inherits parent members.
        #[prost(bool, optional, tag = "3")]
        pub inherit: Option<bool>,
        /// Can be inherited by children.
        #[prost(bool, optional, tag = "4")]
        pub inheritable: Option<bool>,
        /// Added user ids.
        #[prost(uint32, repeated, tag = "5")]
        pub add: Vec<u32>,
        /// Removed user ids.
        #[prost(uint32, repeated, tag = "6")]
        pub remove: Vec<u32>,
        /// Members inherited from parents.
        #[prost(uint32, repeated, tag = "7")]
        pub inherited_members: Vec<u32>,
    }

    /// Single ACL entry.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ChanAcl {
        /// Applies to this channel.
        #[prost(bool, optional, tag = "1")]
        pub apply_here: Option<bool>,
        /// Applies to subchannels.
        #[prost(bool, optional, tag = "2")]
        pub apply_subs: Option<bool>,
        /// Inherited from a parent.
        #[prost(bool, optional, tag = "3")]
        pub inherited: Option<bool>,
        /// Target user id.
        #[prost(uint32, optional, tag = "4")]
        pub user_id: Option<u32>,
        /// Target group.
        #[prost(string, optional, tag = "5")]
        pub group: Option<String>,
        /// Granted permission bits.
        #[prost(uint32, optional, tag = "6")]
        pub grant: Option<u32>,
        /// Denied permission bits.
        #[prost(uint32, optional, tag = "7")]
        pub deny: Option<u32>,
    }
}

/// Registered user id/name resolution.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryUsers {
    /// User ids.
    #[prost(uint32, repeated, tag = "1")]
    pub ids: Vec<u32>,
    /// User names.
    #[prost(string, repeated, tag = "2")]
    pub names: Vec<String>,
}

/// Voice crypto parameters.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptSetup {
    /// Shared key.
    #[prost(bytes = "vec", optional, tag = "1")]
    pub key: Option<Vec<u8>>,
    /// Client nonce.
    #[prost(bytes = "vec", optional, tag = "2")]
    pub client_nonce: Option<Vec<u8>>,
    /// Server nonce.
    #[prost(bytes = "vec", optional, tag = "3")]
    pub server_nonce: Option<Vec<u8>>,
}

/// Adds or removes a server-defined context menu action.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContextActionModify {
    /// Action identifier.
    #[prost(string, required, tag = "1")]
    pub action: String,
    /// Menu text.
    #[prost(string, optional, tag = "2")]
    pub text: Option<String>,
    /// Bitmask of [`context_action_modify::Context`] values.
    #[prost(uint32, optional, tag = "3")]
    pub context: Option<u32>,
    /// Add or remove.
    #[prost(enumeration = "context_action_modify::Operation", optional, tag = "4")]
    pub operation: Option<i32>,
}

/// Nested types for [`ContextActionModify`].
pub mod context_action_modify {
    /// Where the action appears.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Context {
        /// Server menu.
        Server = 1,
        /// Channel menu.
        Channel = 2,
        /// User menu.
        User = 4,
    }

    /// Add or remove the action.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Operation {
        /// Add the action.
        Add = 0,
        /// Remove the action.
        Remove = 1,
    }
}

/// A context menu action was triggered.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContextAction {
    /// Target session.
    #[prost(uint32, optional, tag = "1")]
    pub session: Option<u32>,
    /// Target channel.
    #[prost(uint32, optional, tag = "2")]
    pub channel_id: Option<u32>,
    /// Action identifier.
    #[prost(string, required, tag = "3")]
    pub action: String,
}

/// Registered user list.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserList {
    /// Registered users.
    #[prost(message, repeated, tag = "1")]
    pub users: Vec<user_list::User>,
}

/// Nested types for [`UserList`].
pub mod user_list {
    /// Registered user entry.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct User {
        /// Registered user id.
        #[prost(uint32, required, tag = "1")]
        pub user_id: u32,
        /// Name.
        #[prost(string, optional, tag = "2")]
        pub name: Option<String>,
        /// Last seen timestamp.
        #[prost(string, optional, tag = "3")]
        pub last_seen: Option<String>,
        /// Last channel.
        #[prost(uint32, optional, tag = "4")]
        pub last_channel: Option<u32>,
    }
}

/// Whisper/shout target registration.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VoiceTarget {
    /// Target slot id.
    #[prost(uint32, optional, tag = "1")]
    pub id: Option<u32>,
    /// Targets in this slot.
    #[prost(message, repeated, tag = "2")]
    pub targets: Vec<voice_target::Target>,
}

/// Nested types for [`VoiceTarget`].
pub mod voice_target {
    /// A single voice target.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Target {
        /// Target sessions.
        #[prost(uint32, repeated, tag = "1")]
        pub session: Vec<u32>,
        /// Target channel.
        #[prost(uint32, optional, tag = "2")]
        pub channel_id: Option<u32>,
        /// Restrict to a group.
        #[prost(string, optional, tag = "3")]
        pub group: Option<String>,
        /// Include linked channels.
        #[prost(bool, optional, tag = "4")]
        pub links: Option<bool>,
        /// Include subchannels.
        #[prost(bool, optional, tag = "5")]
        pub children: Option<bool>,
    }
}

/// Permission bits for a channel.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PermissionQuery {
    /// Channel id.
    #[prost(uint32, optional, tag = "1")]
    pub channel_id: Option<u32>,
    /// Permission bits.
    #[prost(uint32, optional, tag = "2")]
    pub permissions: Option<u32>,
    /// Drop all cached permissions.
    #[prost(bool, optional, tag = "3")]
    pub flush: Option<bool>,
}

/// Codec negotiation result.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CodecVersion {
    /// Alpha CELT version.
    #[prost(int32, required, tag = "1")]
    pub alpha: i32,
    /// Beta CELT version.
    #[prost(int32, required, tag = "2")]
    pub beta: i32,
    /// Prefer the alpha codec.
    #[prost(bool, required, tag = "3")]
    pub prefer_alpha: bool,
    /// Opus enabled.
    #[prost(bool, optional, tag = "4")]
    pub opus: Option<bool>,
}

/// Per-user connection statistics.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserStats {
    /// Session id.
    #[prost(uint32, optional, tag = "1")]
    pub session: Option<u32>,
    /// Only statistics, no certificates.
    #[prost(bool, optional, tag = "2")]
    pub stats_only: Option<bool>,
    /// DER certificate chain.
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub certificates: Vec<Vec<u8>>,
    /// Packet statistics seen by the client.
    #[prost(message, optional, tag = "4")]
    pub from_client: Option<user_stats::Stats>,
    /// Packet statistics seen by the server.
    #[prost(message, optional, tag = "5")]
    pub from_server: Option<user_stats::Stats>,
    /// UDP ping samples.
    #[prost(uint32, optional, tag = "6")]
    pub udp_packets: Option<u32>,
    /// TCP ping samples.
    #[prost(uint32, optional, tag = "7")]
    pub tcp_packets: Option<u32>,
    /// Mean UDP round-trip time.
    #[prost(float, optional, tag = "8")]
    pub udp_ping_avg: Option<f32>,
    /// UDP round-trip variance.
    #[prost(float, optional, tag = "9")]
    pub udp_ping_var: Option<f32>,
    /// Mean TCP round-trip time.
    #[prost(float, optional, tag = "10")]
    pub tcp_ping_avg: Option<f32>,
    /// TCP round-trip variance.
    #[prost(float, optional, tag = "11")]
    pub tcp_ping_var: Option<f32>,
    /// Client version.
    #[prost(message, optional, tag = "12")]
    pub version: Option<Version>,
    /// CELT versions.
    #[prost(int32, repeated, tag = "13")]
    pub celt_versions: Vec<i32>,
    /// Client address bytes.
    #[prost(bytes = "vec", optional, tag = "14")]
    pub address: Option<Vec<u8>>,
    /// Bandwidth in use.
    #[prost(uint32, optional, tag = "15")]
    pub bandwidth: Option<u32>,
    /// Seconds online.
    #[prost(uint32, optional, tag = "16")]
    pub onlinesecs: Option<u32>,
    /// Seconds idle.
    #[prost(uint32, optional, tag = "17")]
    pub idlesecs: Option<u32>,
    /// Certificate is trusted.
    #[prost(bool, optional, tag = "18")]
    pub strong_certificate: Option<bool>,
    /// Opus supported.
    #[prost(bool, optional, tag = "19")]
    pub opus: Option<bool>,
}

/// Nested types for [`UserStats`].
pub mod user_stats {
    /// Voice packet counters.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Stats {
        /// Good packets.
        #[prost(uint32, optional, tag = "1")]
        pub good: Option<u32>,
        /// Late packets.
        #[prost(uint32, optional, tag = "2")]
        pub late: Option<u32>,
        /// Lost packets.
        #[prost(uint32, optional, tag = "3")]
        pub lost: Option<u32>,
        /// Crypt resyncs.
        #[prost(uint32, optional, tag = "4")]
        pub resync: Option<u32>,
    }
}

/// Request for large blobs (textures, comments, descriptions).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestBlob {
    /// Sessions whose texture is wanted.
    #[prost(uint32, repeated, tag = "1")]
    pub session_texture: Vec<u32>,
    /// Sessions whose comment is wanted.
    #[prost(uint32, repeated, tag = "2")]
    pub session_comment: Vec<u32>,
    /// Channels whose description is wanted.
    #[prost(uint32, repeated, tag = "3")]
    pub channel_description: Vec<u32>,
}

/// Server-wide limits and settings.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServerConfig {
    /// Maximum bandwidth per user.
    #[prost(uint32, optional, tag = "1")]
    pub max_bandwidth: Option<u32>,
    /// Welcome text.
    #[prost(string, optional, tag = "2")]
    pub welcome_text: Option<String>,
    /// HTML allowed in messages.
    #[prost(bool, optional, tag = "3")]
    pub allow_html: Option<bool>,
    /// Maximum text message length.
    #[prost(uint32, optional, tag = "4")]
    pub message_length: Option<u32>,
    /// Maximum image message length.
    #[prost(uint32, optional, tag = "5")]
    pub image_message_length: Option<u32>,
    /// Maximum users per server.
    #[prost(uint32, optional, tag = "6")]
    pub max_users: Option<u32>,
}

/// Settings the server recommends to clients.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SuggestConfig {
    /// Suggested minimum client version.
    #[prost(uint32, optional, tag = "1")]
    pub version: Option<u32>,
    /// Suggest positional audio.
    #[prost(bool, optional, tag = "2")]
    pub positional: Option<bool>,
    /// Suggest push-to-talk.
    #[prost(bool, optional, tag = "3")]
    pub push_to_talk: Option<bool>,
}
