//! Application-facing handles to a running engine.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;

use super::config::ClientConfig;
use super::engine::Engine;
use super::event::Event;
use super::task::{ChannelRef, Task, UserRef};
use crate::core::ConnectionError;
use crate::transport::Connector;
#[cfg(feature = "tls")]
use crate::transport::TlsConnector;

/// Errors surfaced by the client handles.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The engine is no longer running.
    #[error("client disconnected")]
    Disconnected,

    /// The engine panicked or its task was cancelled.
    #[error("engine crashed: {0}")]
    EngineCrashed(String),

    /// The engine could not start or stopped on an unrecoverable error.
    #[error(transparent)]
    Connection(Arc<ConnectionError>),
}

impl From<ConnectionError> for ClientError {
    fn from(err: ConnectionError) -> Self {
        ClientError::Connection(Arc::new(err))
    }
}

/// Cloneable handle for submitting tasks.
#[derive(Debug, Clone)]
pub struct TaskSender {
    tx: mpsc::UnboundedSender<Task>,
}

impl TaskSender {
    /// Queue a task. Never blocks.
    pub fn send(&self, task: Task) -> Result<(), ClientError> {
        self.tx.send(task).map_err(|_| ClientError::Disconnected)
    }

    /// Check if the engine has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving end of the event outbox.
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventReceiver {
    /// Wait for the next event.
    ///
    /// Returns `None` once the engine has stopped and every event was read.
    pub async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Take the next event if one is queued.
    pub fn try_recv(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}

/// A running client: the engine task plus its command inbox.
///
/// # Example
///
/// ```no_run
/// use whisper_protocol::prelude::*;
///
/// # async fn run() -> Result<(), ClientError> {
/// let config = ClientBuilder::new()
///     .server("voice.example.org:64738")
///     .map_err(|_| ClientError::Disconnected)?
///     .username("alice")
///     .accept_invalid_certs(true)
///     .build();
///
/// let (client, mut events) = Client::spawn(config)?;
///
/// while let Some(event) = events.recv().await {
///     if let Event::ServerSync(_) = event {
///         client.send_message("hello")?;
///         client.stop()?;
///     }
/// }
/// client.join().await
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    tasks: TaskSender,
    handle: JoinHandle<Result<(), Arc<ConnectionError>>>,
}

impl Client {
    /// Spawn an engine connecting over TLS.
    ///
    /// Must be called from within a tokio runtime.
    #[cfg(feature = "tls")]
    pub fn spawn(config: ClientConfig) -> Result<(Self, EventReceiver), ClientError> {
        let connector = TlsConnector::new(&config.credentials(), config.accept_invalid_certs)?
            .with_connect_timeout(config.connect_timeout());
        Ok(Self::spawn_with_connector(config, connector))
    }

    /// Spawn an engine using a custom [`Connector`].
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_with_connector<C: Connector>(
        config: ClientConfig,
        connector: C,
    ) -> (Self, EventReceiver) {
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let span = tracing::info_span!(
            "whisper",
            user = %config.username,
            server = %config.address,
        );
        let engine = Engine::new(config, connector, task_rx, event_tx);
        let handle = tokio::spawn(engine.run().instrument(span));

        let client = Self {
            tasks: TaskSender { tx: task_tx },
            handle,
        };
        (client, EventReceiver { rx: event_rx })
    }

    /// Queue a task.
    pub fn submit(&self, task: Task) -> Result<(), ClientError> {
        self.tasks.send(task)
    }

    /// A cloneable sender for use from other tasks.
    pub fn sender(&self) -> TaskSender {
        self.tasks.clone()
    }

    /// Leave the idle hold and connect.
    pub fn start(&self) -> Result<(), ClientError> {
        self.submit(Task::Start)
    }

    /// Ask the engine to shut down.
    pub fn stop(&self) -> Result<(), ClientError> {
        self.submit(Task::Stop)
    }

    /// Request a [`Event::FullTreeSnapshot`].
    pub fn request_full_tree(&self) -> Result<(), ClientError> {
        self.submit(Task::RequestFullTree)
    }

    /// Send a chat message to our channel.
    pub fn send_message(&self, text: impl Into<String>) -> Result<(), ClientError> {
        self.submit(Task::SendMessage(text.into()))
    }

    /// Send a chat message to one user.
    pub fn send_private_message(
        &self,
        text: impl Into<String>,
        target: impl Into<UserRef>,
    ) -> Result<(), ClientError> {
        self.submit(Task::SendPrivateMessage(text.into(), target.into()))
    }

    /// Move a user to a channel.
    pub fn move_user(
        &self,
        user: impl Into<UserRef>,
        channel: impl Into<ChannelRef>,
    ) -> Result<(), ClientError> {
        self.submit(Task::MoveUser(user.into(), channel.into()))
    }

    /// Check if the engine has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the engine to exit.
    pub async fn join(self) -> Result<(), ClientError> {
        match self.handle.await {
            Ok(Err(err)) => match &*err {
                ConnectionError::Panicked(message) => {
                    Err(ClientError::EngineCrashed(message.clone()))
                }
                _ => Err(ClientError::Connection(err)),
            },
            Ok(Ok(())) => Ok(()),
            Err(err) if err.is_panic() => {
                let panic = err.into_panic();
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(ClientError::EngineCrashed(message))
            }
            Err(err) => Err(ClientError::EngineCrashed(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;
    use crate::client::ClientBuilder;
    use crate::core::{Address, ConnectionResult};
    use crate::transport::testing::DuplexConnector;

    fn config() -> ClientConfig {
        ClientBuilder::new()
            .auto_connect(false)
            .loop_timing(Duration::from_millis(5), Duration::from_millis(1))
            .build()
    }

    #[tokio::test]
    async fn test_stop_and_join() {
        let (connector, _servers) = DuplexConnector::new();
        let (client, mut events) = Client::spawn_with_connector(config(), connector);

        client.request_full_tree().unwrap();
        assert!(matches!(
            timeout(Duration::from_secs(5), events.recv()).await.unwrap(),
            Some(Event::FullTreeSnapshot { .. })
        ));

        let sender = client.sender();
        client.stop().unwrap();
        timeout(Duration::from_secs(5), client.join())
            .await
            .unwrap()
            .unwrap();

        assert!(sender.is_closed());
        assert!(matches!(
            sender.send(Task::Start),
            Err(ClientError::Disconnected)
        ));
        assert!(events.recv().await.is_none());
    }

    struct PanicConnector;

    impl Connector for PanicConnector {
        type Stream = tokio::io::DuplexStream;

        async fn connect(&self, _address: &Address) -> ConnectionResult<Self::Stream> {
            panic!("connector exploded")
        }
    }

    #[tokio::test]
    async fn test_engine_panic_is_reported() {
        let config = ClientBuilder::new().build();
        let (client, mut events) = Client::spawn_with_connector(config, PanicConnector);
        assert!(matches!(
            timeout(Duration::from_secs(5), events.recv()).await.unwrap(),
            Some(Event::Disconnected { error: Some(_) })
        ));
        match timeout(Duration::from_secs(5), client.join()).await.unwrap() {
            Err(ClientError::EngineCrashed(message)) => assert!(message.contains("exploded")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fatal_error_is_reported() {
        struct Refuse;
        impl Connector for Refuse {
            type Stream = tokio::io::DuplexStream;
            async fn connect(&self, address: &Address) -> ConnectionResult<Self::Stream> {
                Err(ConnectionError::InvalidServerName(address.host().into()))
            }
        }

        let (client, _events) = Client::spawn_with_connector(ClientBuilder::new().build(), Refuse);
        let err = timeout(Duration::from_secs(5), client.join())
            .await
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, ClientError::Connection(_)));
        assert!(err.to_string().contains("invalid server name"));
    }

    #[cfg(feature = "tls")]
    #[tokio::test]
    async fn test_spawn_tls_client() {
        let (client, _events) = Client::spawn(config()).unwrap();
        assert!(!client.is_finished());
        client.stop().unwrap();
        timeout(Duration::from_secs(5), client.join())
            .await
            .unwrap()
            .unwrap();
    }
}
