//! In-memory channel and user directory for one session.
//!
//! Entries are created on first reference and updated in place by state
//! deltas. Only the engine mutates the directory; the application sees
//! snapshots.

use std::collections::{BTreeMap, BTreeSet};

use crate::proto::{ChannelState, UserState};

/// Last known state of a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Channel {
    /// Channel id.
    pub id: u32,
    /// Parent channel id; `None` for the root.
    pub parent: Option<u32>,
    /// Display name.
    pub name: String,
    /// Description text.
    pub description: String,
    /// Ids of linked channels.
    pub links: BTreeSet<u32>,
    /// Temporary channels vanish when empty.
    pub temporary: bool,
    /// Sort position.
    pub position: i32,
    /// User limit (0 = unlimited).
    pub max_users: u32,
}

/// Last known state of a connected user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// Session id.
    pub session: u32,
    /// Display name.
    pub name: String,
    /// Registered user id, if registered.
    pub user_id: Option<u32>,
    /// Current channel.
    pub channel_id: u32,
    /// Muted by an admin.
    pub mute: bool,
    /// Deafened by an admin.
    pub deaf: bool,
    /// Suppressed by the server.
    pub suppress: bool,
    /// Muted themselves.
    pub self_mute: bool,
    /// Deafened themselves.
    pub self_deaf: bool,
    /// Comment text.
    pub comment: String,
    /// Certificate hash.
    pub hash: String,
    /// Priority speaker flag.
    pub priority_speaker: bool,
    /// Currently recording.
    pub recording: bool,
}

fn merge<T>(target: &mut T, value: &Option<T>)
where
    T: Clone,
{
    if let Some(value) = value {
        *target = value.clone();
    }
}

impl Channel {
    /// Fold a state delta into this entry.
    pub fn apply(&mut self, delta: &ChannelState) {
        if delta.parent.is_some() {
            self.parent = delta.parent;
        }
        merge(&mut self.name, &delta.name);
        merge(&mut self.description, &delta.description);
        merge(&mut self.temporary, &delta.temporary);
        merge(&mut self.position, &delta.position);
        merge(&mut self.max_users, &delta.max_users);

        if !delta.links.is_empty() {
            self.links = delta.links.iter().copied().collect();
        }
        self.links.extend(delta.links_add.iter().copied());
        for id in &delta.links_remove {
            self.links.remove(id);
        }
    }
}

impl User {
    /// Fold a state delta into this entry.
    pub fn apply(&mut self, delta: &UserState) {
        merge(&mut self.name, &delta.name);
        if delta.user_id.is_some() {
            self.user_id = delta.user_id;
        }
        merge(&mut self.channel_id, &delta.channel_id);
        merge(&mut self.mute, &delta.mute);
        merge(&mut self.deaf, &delta.deaf);
        merge(&mut self.suppress, &delta.suppress);
        merge(&mut self.self_mute, &delta.self_mute);
        merge(&mut self.self_deaf, &delta.self_deaf);
        merge(&mut self.comment, &delta.comment);
        merge(&mut self.hash, &delta.hash);
        merge(&mut self.priority_speaker, &delta.priority_speaker);
        merge(&mut self.recording, &delta.recording);
    }
}

/// Channels keyed by id and users keyed by session id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    channels: BTreeMap<u32, Channel>,
    users: BTreeMap<u32, User>,
}

impl Directory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a channel, creating an empty entry if unknown.
    pub fn channel_mut_or_default(&mut self, id: u32) -> &mut Channel {
        self.channels.entry(id).or_insert_with(|| Channel {
            id,
            ..Default::default()
        })
    }

    /// Get a user, creating an empty entry if unknown.
    pub fn user_mut_or_default(&mut self, session: u32) -> &mut User {
        self.users.entry(session).or_insert_with(|| User {
            session,
            ..Default::default()
        })
    }

    /// Upsert a channel from a state delta. Deltas without an id are ignored.
    pub fn apply_channel_state(&mut self, delta: &ChannelState) -> Option<&Channel> {
        let id = delta.channel_id?;
        let channel = self.channel_mut_or_default(id);
        channel.apply(delta);
        Some(channel)
    }

    /// Upsert a user from a state delta. Deltas without a session are ignored.
    pub fn apply_user_state(&mut self, delta: &UserState) -> Option<&User> {
        let session = delta.session?;
        let user = self.user_mut_or_default(session);
        user.apply(delta);
        Some(user)
    }

    /// Remove a channel. Returns the removed entry; absence is not an error.
    pub fn remove_channel(&mut self, id: u32) -> Option<Channel> {
        self.channels.remove(&id)
    }

    /// Remove a user. Returns the removed entry; absence is not an error.
    pub fn remove_user(&mut self, session: u32) -> Option<User> {
        self.users.remove(&session)
    }

    /// Look up a channel by id.
    pub fn channel(&self, id: u32) -> Option<&Channel> {
        self.channels.get(&id)
    }

    /// Look up a user by session id.
    pub fn user(&self, session: u32) -> Option<&User> {
        self.users.get(&session)
    }

    /// Find a channel by exact name.
    pub fn channel_by_name(&self, name: &str) -> Option<&Channel> {
        self.channels.values().find(|channel| channel.name == name)
    }

    /// Find a user by exact name.
    pub fn user_by_name(&self, name: &str) -> Option<&User> {
        self.users.values().find(|user| user.name == name)
    }

    /// Channels in id order.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    /// Users in session order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Copy out the current channel and user maps.
    pub fn snapshot(&self) -> (BTreeMap<u32, Channel>, BTreeMap<u32, User>) {
        (self.channels.clone(), self.users.clone())
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.channels.clear();
        self.users.clear();
    }

    /// Check if the directory holds no entries.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty() && self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_state(session: u32) -> UserState {
        UserState {
            session: Some(session),
            ..Default::default()
        }
    }

    #[test]
    fn test_user_upsert_and_remove() {
        let mut dir = Directory::new();

        dir.apply_user_state(&UserState {
            name: Some("alice".into()),
            channel_id: Some(0),
            ..user_state(42)
        });
        dir.apply_user_state(&UserState {
            channel_id: Some(3),
            self_mute: Some(true),
            ..user_state(42)
        });

        assert_eq!(dir.users().count(), 1);
        let user = dir.user(42).unwrap();
        assert_eq!(user.name, "alice");
        assert_eq!(user.channel_id, 3);
        assert!(user.self_mute);

        assert!(dir.remove_user(42).is_some());
        assert!(dir.user(42).is_none());
        assert!(dir.remove_user(42).is_none());
    }

    #[test]
    fn test_create_on_touch() {
        let mut dir = Directory::new();
        dir.channel_mut_or_default(9).name = "Music".into();
        assert_eq!(dir.channel(9).unwrap().id, 9);
        assert_eq!(dir.user_mut_or_default(5).session, 5);
        assert_eq!(dir.user(5).unwrap().name, "");
    }

    #[test]
    fn test_delta_without_id_is_ignored() {
        let mut dir = Directory::new();
        assert!(dir.apply_user_state(&UserState::default()).is_none());
        assert!(dir.apply_channel_state(&ChannelState::default()).is_none());
        assert!(dir.is_empty());
    }

    #[test]
    fn test_channel_links() {
        let mut dir = Directory::new();
        dir.apply_channel_state(&ChannelState {
            channel_id: Some(1),
            parent: Some(0),
            name: Some("Games".into()),
            links: vec![2, 3],
            ..Default::default()
        });
        dir.apply_channel_state(&ChannelState {
            channel_id: Some(1),
            links_add: vec![4],
            links_remove: vec![2],
            ..Default::default()
        });

        let channel = dir.channel(1).unwrap();
        assert_eq!(channel.parent, Some(0));
        assert_eq!(channel.name, "Games");
        assert_eq!(channel.links.iter().copied().collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn test_name_lookup_and_snapshot() {
        let mut dir = Directory::new();
        dir.apply_channel_state(&ChannelState {
            channel_id: Some(0),
            name: Some("Root".into()),
            ..Default::default()
        });
        dir.apply_user_state(&UserState {
            name: Some("bob".into()),
            ..user_state(8)
        });

        assert_eq!(dir.channel_by_name("Root").map(|c| c.id), Some(0));
        assert_eq!(dir.user_by_name("bob").map(|u| u.session), Some(8));
        assert!(dir.user_by_name("carol").is_none());

        let (channels, users) = dir.snapshot();
        assert_eq!(channels.len(), 1);
        assert_eq!(users.len(), 1);

        dir.clear();
        assert!(dir.is_empty());
        assert_eq!(users[&8].name, "bob");
    }

    #[test]
    fn test_remove_unknown_channel_is_noop() {
        let mut dir = Directory::new();
        assert!(dir.remove_channel(123).is_none());
    }
}
