//! The engine loop: one task owning the connection and the directory.
//!
//! ```text
//!   Task inbox ──► drain ──► Connection.send ──► wire
//!                   │
//!   wire ──► Connection.poll ──► decode ──► apply ──► Directory
//!                                             └─────► Event outbox
//! ```
//!
//! The outer loop runs one session at a time and reconnects after a fixed
//! backoff. Only [`ConnectionError`]s that are not recoverable end the loop.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, error, info, warn};

use super::config::ClientConfig;
use super::directory::Directory;
use super::event::Event;
use super::task::{ChannelRef, Task, UserRef};
use crate::core::{ConnectionError, ConnectionResult};
use crate::proto::{self, DispatchError, Message, MessageKind, TextMessage, UserState};
use crate::transport::{Connection, ConnectionState, Connector, Frame};

/// The actor behind a [`Client`](super::Client).
pub(crate) struct Engine<C: Connector> {
    config: ClientConfig,
    connector: Arc<C>,
    tasks: mpsc::UnboundedReceiver<Task>,
    events: mpsc::UnboundedSender<Event>,
    directory: Directory,
    /// Our session id, from `ServerSync`.
    own_session: Option<u32>,
    stopped: bool,
    /// Waiting for `Start`/`Connect` before opening a session.
    held: bool,
}

impl<C: Connector> Engine<C> {
    pub(crate) fn new(
        config: ClientConfig,
        connector: C,
        tasks: mpsc::UnboundedReceiver<Task>,
        events: mpsc::UnboundedSender<Event>,
    ) -> Self {
        let held = !config.auto_connect;
        Self {
            config,
            connector: Arc::new(connector),
            tasks,
            events,
            directory: Directory::new(),
            own_session: None,
            stopped: false,
            held,
        }
    }

    /// Run until stopped or until an unrecoverable error.
    ///
    /// A panic inside the loop is caught, logged, and reported as a final
    /// [`Event::Disconnected`] carrying [`ConnectionError::Panicked`]. The
    /// session's stream is dropped during unwinding.
    pub(crate) async fn run(mut self) -> Result<(), Arc<ConnectionError>> {
        info!("engine started");
        let outcome = AssertUnwindSafe(self.run_sessions()).catch_unwind().await;
        let result = match outcome {
            Ok(result) => result,
            Err(panic) => {
                let err = Arc::new(ConnectionError::Panicked(panic_message(&*panic)));
                self.emit(Event::Disconnected {
                    error: Some(err.clone()),
                });
                Err(err)
            }
        };
        match &result {
            Ok(()) => info!("engine stopped"),
            Err(err) => error!(%err, "engine terminated"),
        }
        result
    }

    async fn run_sessions(&mut self) -> Result<(), Arc<ConnectionError>> {
        while !self.stopped {
            self.drain_tasks(None).await.map_err(Arc::new)?;
            if self.stopped {
                break;
            }
            if self.held {
                self.wait_for_task().await;
                continue;
            }

            let mut conn = Connection::new(self.connector.clone(), self.config.connection_options());
            let outcome = self.run_session(&mut conn).await;
            conn.close().await;

            match outcome {
                Ok(()) => self.emit(Event::Disconnected { error: None }),
                Err(err) if !err.is_recoverable() => {
                    let err = Arc::new(err);
                    self.emit(Event::Disconnected {
                        error: Some(err.clone()),
                    });
                    return Err(err);
                }
                Err(err) => {
                    warn!(%err, "session ended");
                    if err.is_rejection() && self.config.hold_after_reject {
                        info!("holding after rejection until started again");
                        self.held = true;
                    }
                    self.emit(Event::Disconnected {
                        error: Some(Arc::new(err)),
                    });
                }
            }

            if !self.stopped {
                tokio::time::sleep(self.config.reconnect_backoff()).await;
            }
        }
        Ok(())
    }

    async fn run_session(&mut self, conn: &mut Connection<C>) -> ConnectionResult<()> {
        self.directory.clear();
        self.own_session = None;
        conn.open().await?;

        while !self.stopped {
            self.drain_tasks(Some(&mut *conn)).await?;
            if self.stopped {
                break;
            }

            conn.send_keepalive_if_due().await?;

            for frame in conn.poll(self.config.poll_timeout()).await? {
                self.apply_frame(conn, frame).await?;
            }

            tokio::time::sleep(self.config.loop_interval()).await;
        }
        Ok(())
    }

    /// Handle every queued task. A closed inbox counts as `Stop`.
    async fn drain_tasks(&mut self, mut conn: Option<&mut Connection<C>>) -> ConnectionResult<()> {
        loop {
            match self.tasks.try_recv() {
                Ok(task) => self.handle_task(task, conn.as_mut().map(|c| &mut **c)).await?,
                Err(TryRecvError::Empty) => return Ok(()),
                Err(TryRecvError::Disconnected) => {
                    debug!("task inbox closed");
                    self.stopped = true;
                    return Ok(());
                }
            }
        }
    }

    /// Block until one task arrives while held.
    async fn wait_for_task(&mut self) {
        match self.tasks.recv().await {
            Some(task) => {
                if let Err(err) = self.handle_task(task, None).await {
                    debug!(%err, "task failed without a session");
                }
            }
            None => self.stopped = true,
        }
    }

    async fn handle_task(
        &mut self,
        task: Task,
        conn: Option<&mut Connection<C>>,
    ) -> ConnectionResult<()> {
        if task.needs_connection() {
            return match conn {
                Some(conn) if conn.state() == ConnectionState::Connected => {
                    match self.send_task(conn, task).await {
                        Err(ConnectionError::FrameTooLarge { len, max }) => {
                            warn!(len, max, "outbound message too large, dropping");
                            Ok(())
                        }
                        result => result,
                    }
                }
                _ => {
                    debug!(?task, "no session, dropping task");
                    Ok(())
                }
            };
        }

        match task {
            Task::Start | Task::Connect => {
                if self.held {
                    debug!("released from hold");
                }
                self.held = false;
                Ok(())
            }
            Task::Stop => {
                debug!("stop requested");
                self.stopped = true;
                Ok(())
            }
            Task::RequestFullTree => {
                let (channels, users) = self.directory.snapshot();
                self.emit(Event::FullTreeSnapshot { channels, users });
                Ok(())
            }
            Task::SendMessage(_) | Task::SendPrivateMessage(..) | Task::MoveUser(..) => Ok(()),
        }
    }

    async fn send_task(&mut self, conn: &mut Connection<C>, task: Task) -> ConnectionResult<()> {
        match task {
            Task::SendMessage(text) => {
                let Some(channel) = self.own_channel() else {
                    warn!("own channel unknown, dropping message");
                    return Ok(());
                };
                let message = TextMessage {
                    channel_id: vec![channel],
                    message: text,
                    ..Default::default()
                };
                conn.send_application(MessageKind::TextMessage, &message).await
            }
            Task::SendPrivateMessage(text, target) => {
                let Some(session) = self.resolve_user(&target) else {
                    warn!(%target, "unknown recipient, dropping message");
                    return Ok(());
                };
                let message = TextMessage {
                    session: vec![session],
                    message: text,
                    ..Default::default()
                };
                conn.send_application(MessageKind::TextMessage, &message).await
            }
            Task::MoveUser(user, channel) => {
                let (Some(session), Some(channel_id)) =
                    (self.resolve_user(&user), self.resolve_channel(&channel))
                else {
                    warn!(%user, %channel, "cannot resolve move, dropping");
                    return Ok(());
                };
                let message = UserState {
                    session: Some(session),
                    channel_id: Some(channel_id),
                    ..Default::default()
                };
                conn.send_application(MessageKind::UserState, &message).await
            }
            Task::Start | Task::Connect | Task::Stop | Task::RequestFullTree => Ok(()),
        }
    }

    async fn apply_frame(&mut self, conn: &mut Connection<C>, frame: Frame) -> ConnectionResult<()> {
        match proto::decode_frame(&frame) {
            Ok(message) => self.apply(conn, message).await,
            Err(DispatchError::UnknownTag(tag)) => {
                warn!(tag, "unknown message tag, skipping frame");
                Ok(())
            }
            Err(err) => {
                warn!(%err, "undecodable frame, skipping");
                Ok(())
            }
        }
    }

    /// Apply the side effects of one message, then surface it.
    async fn apply(&mut self, conn: &mut Connection<C>, message: Message) -> ConnectionResult<()> {
        let mut rejection = None;

        match &message {
            Message::Ping(_) => conn.record_ping(),
            Message::ChannelState(state) => {
                self.directory.apply_channel_state(state);
            }
            Message::UserState(state) => {
                self.directory.apply_user_state(state);
            }
            Message::ChannelRemove(remove) => {
                self.directory.remove_channel(remove.channel_id);
            }
            Message::UserRemove(remove) => {
                self.directory.remove_user(remove.session);
            }
            Message::ServerSync(sync) => {
                if conn.complete_authentication() {
                    self.own_session = sync.session;
                }
            }
            Message::CryptSetup(_) => conn.send_keepalive().await?,
            Message::Reject(reject) => {
                conn.mark_failed();
                rejection = Some(ConnectionError::Rejected {
                    kind: reject.reject_type(),
                    reason: reject.reason().to_string(),
                });
            }
            _ => {}
        }

        if let Some(event) = Event::from_message(message) {
            self.emit(event);
        }
        match rejection {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn own_channel(&self) -> Option<u32> {
        let session = self.own_session?;
        self.directory.user(session).map(|user| user.channel_id)
    }

    fn resolve_user(&self, user: &UserRef) -> Option<u32> {
        match user {
            UserRef::Session(session) => Some(*session),
            UserRef::Name(name) => self.directory.user_by_name(name).map(|u| u.session),
        }
    }

    fn resolve_channel(&self, channel: &ChannelRef) -> Option<u32> {
        match channel {
            ChannelRef::Id(id) => Some(*id),
            ChannelRef::Name(name) => self.directory.channel_by_name(name).map(|c| c.id),
        }
    }

    fn emit(&self, event: Event) {
        if self.events.send(event).is_err() {
            debug!("event receiver dropped");
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<String>()
        .map(|s| s.as_str())
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic")
        .to_string()
}
