//! Commands submitted by the application to the engine.

use std::fmt;

/// A user, by session id or by display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserRef {
    /// Server-assigned session id.
    Session(u32),
    /// Display name.
    Name(String),
}

impl From<u32> for UserRef {
    fn from(session: u32) -> Self {
        UserRef::Session(session)
    }
}

impl From<&str> for UserRef {
    fn from(name: &str) -> Self {
        UserRef::Name(name.to_string())
    }
}

impl From<String> for UserRef {
    fn from(name: String) -> Self {
        UserRef::Name(name)
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRef::Session(session) => write!(f, "session {session}"),
            UserRef::Name(name) => write!(f, "user {name:?}"),
        }
    }
}

/// A channel, by id or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChannelRef {
    /// Server-assigned channel id.
    Id(u32),
    /// Channel name.
    Name(String),
}

impl From<u32> for ChannelRef {
    fn from(id: u32) -> Self {
        ChannelRef::Id(id)
    }
}

impl From<&str> for ChannelRef {
    fn from(name: &str) -> Self {
        ChannelRef::Name(name.to_string())
    }
}

impl From<String> for ChannelRef {
    fn from(name: String) -> Self {
        ChannelRef::Name(name)
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelRef::Id(id) => write!(f, "channel {id}"),
            ChannelRef::Name(name) => write!(f, "channel {name:?}"),
        }
    }
}

/// A command for the engine. Consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Leave the idle hold and start connecting.
    Start,
    /// Same as [`Task::Start`].
    Connect,
    /// Shut the engine down.
    Stop,
    /// Emit a [`FullTreeSnapshot`](super::Event::FullTreeSnapshot) of the directory.
    RequestFullTree,
    /// Send a chat message to our current channel.
    SendMessage(String),
    /// Send a chat message to one user.
    SendPrivateMessage(String, UserRef),
    /// Move a user to another channel.
    MoveUser(UserRef, ChannelRef),
}

impl Task {
    /// Check if this task can only be carried out over a live session.
    ///
    /// Such tasks are dropped when no session is open.
    pub fn needs_connection(&self) -> bool {
        matches!(
            self,
            Task::SendMessage(_) | Task::SendPrivateMessage(..) | Task::MoveUser(..)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_connection() {
        assert!(!Task::Start.needs_connection());
        assert!(!Task::Stop.needs_connection());
        assert!(!Task::RequestFullTree.needs_connection());
        assert!(Task::SendMessage("hi".into()).needs_connection());
        assert!(Task::SendPrivateMessage("hi".into(), 3.into()).needs_connection());
        assert!(Task::MoveUser("bob".into(), 1.into()).needs_connection());
    }

    #[test]
    fn test_reference_conversions() {
        assert_eq!(UserRef::from(7), UserRef::Session(7));
        assert_eq!(UserRef::from("bob"), UserRef::Name("bob".into()));
        assert_eq!(ChannelRef::from(0), ChannelRef::Id(0));
        assert_eq!(ChannelRef::from("Lobby".to_string()), ChannelRef::Name("Lobby".into()));
        assert_eq!(ChannelRef::Id(4).to_string(), "channel 4");
        assert_eq!(UserRef::Name("bob".into()).to_string(), "user \"bob\"");
    }
}
