//! Notifications delivered from the engine to the application.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::directory::{Channel, User};
use crate::core::ConnectionError;
use crate::proto::*;

/// Something the engine observed. Delivered in wire order.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum Event {
    Version(Version),
    UdpTunnel(UdpTunnel),
    Authenticate(Authenticate),
    Reject(Reject),
    /// Initial state complete; the session is now `Connected`.
    ServerSync(ServerSync),
    ChannelRemove(ChannelRemove),
    ChannelState(ChannelState),
    UserRemove(UserRemove),
    UserState(UserState),
    BanList(BanList),
    TextMessage(TextMessage),
    PermissionDenied(PermissionDenied),
    Acl(Acl),
    QueryUsers(QueryUsers),
    CryptSetup(CryptSetup),
    ContextActionModify(ContextActionModify),
    ContextAction(ContextAction),
    UserList(UserList),
    VoiceTarget(VoiceTarget),
    PermissionQuery(PermissionQuery),
    CodecVersion(CodecVersion),
    UserStats(UserStats),
    RequestBlob(RequestBlob),
    ServerConfig(ServerConfig),
    SuggestConfig(SuggestConfig),

    /// Answer to [`Task::RequestFullTree`](super::Task::RequestFullTree).
    FullTreeSnapshot {
        /// Channels by id.
        channels: BTreeMap<u32, Channel>,
        /// Users by session id.
        users: BTreeMap<u32, User>,
    },

    /// The session ended. `error` is `None` after a requested stop.
    Disconnected {
        /// Why the session ended.
        error: Option<Arc<ConnectionError>>,
    },
}

impl Event {
    /// The event surfaced for a decoded message; keepalives produce none.
    pub fn from_message(message: Message) -> Option<Self> {
        let event = match message {
            Message::Ping(_) => return None,
            Message::Version(m) => Event::Version(m),
            Message::UdpTunnel(m) => Event::UdpTunnel(m),
            Message::Authenticate(m) => Event::Authenticate(m),
            Message::Reject(m) => Event::Reject(m),
            Message::ServerSync(m) => Event::ServerSync(m),
            Message::ChannelRemove(m) => Event::ChannelRemove(m),
            Message::ChannelState(m) => Event::ChannelState(m),
            Message::UserRemove(m) => Event::UserRemove(m),
            Message::UserState(m) => Event::UserState(m),
            Message::BanList(m) => Event::BanList(m),
            Message::TextMessage(m) => Event::TextMessage(m),
            Message::PermissionDenied(m) => Event::PermissionDenied(m),
            Message::Acl(m) => Event::Acl(m),
            Message::QueryUsers(m) => Event::QueryUsers(m),
            Message::CryptSetup(m) => Event::CryptSetup(m),
            Message::ContextActionModify(m) => Event::ContextActionModify(m),
            Message::ContextAction(m) => Event::ContextAction(m),
            Message::UserList(m) => Event::UserList(m),
            Message::VoiceTarget(m) => Event::VoiceTarget(m),
            Message::PermissionQuery(m) => Event::PermissionQuery(m),
            Message::CodecVersion(m) => Event::CodecVersion(m),
            Message::UserStats(m) => Event::UserStats(m),
            Message::RequestBlob(m) => Event::RequestBlob(m),
            Message::ServerConfig(m) => Event::ServerConfig(m),
            Message::SuggestConfig(m) => Event::SuggestConfig(m),
        };
        Some(event)
    }

    /// Check if this is the terminal event of a session.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Event::Disconnected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_is_silent() {
        assert!(Event::from_message(Message::Ping(Ping::default())).is_none());
    }

    #[test]
    fn test_message_becomes_event() {
        let event = Event::from_message(Message::ServerSync(ServerSync {
            session: Some(3),
            ..Default::default()
        }));
        assert!(matches!(
            event,
            Some(Event::ServerSync(ServerSync {
                session: Some(3),
                ..
            }))
        ));
    }

    #[test]
    fn test_disconnect_flag() {
        assert!(Event::Disconnected { error: None }.is_disconnect());
        assert!(
            !Event::FullTreeSnapshot {
                channels: BTreeMap::new(),
                users: BTreeMap::new(),
            }
            .is_disconnect()
        );
    }
}
