//! Zenoh command publishing
//!
//! [`TransportContext`] owns the zenoh session, opened once per process
//! and torn down when the last handle drops. [`CommandPublisher`] binds
//! one outbound channel to the arm's command topic at construction and
//! sends one document per [`CommandPublisher::publish`] call,
//! fire-and-forget: no acknowledgment, no retry, at most one
//! transmission per call.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use zenoh::{pubsub::Publisher, Session};

use crate::{ArmCommand, InitError, TransportError};

/// Process-wide transport handle wrapping the zenoh session.
///
/// Constructed explicitly and passed to publisher construction rather
/// than accessed as ambient global state. Cloning shares the session.
#[derive(Clone)]
pub struct TransportContext {
    session: Arc<Session>,
}

impl TransportContext {
    /// Open a zenoh session.
    ///
    /// `endpoint` selects the router/interface to connect to; `None`
    /// means use ambient zenoh configuration (config file or
    /// multicast scouting defaults).
    pub async fn connect(endpoint: Option<&str>) -> Result<Self, InitError> {
        let mut config = zenoh::Config::default();
        if let Some(endpoint) = endpoint {
            let parsed = endpoint.parse().map_err(|e| InitError::Endpoint {
                endpoint: endpoint.to_string(),
                reason: format!("{}", e),
            })?;
            config
                .connect
                .endpoints
                .set(vec![parsed])
                .map_err(|e| InitError::Endpoint {
                    endpoint: endpoint.to_string(),
                    reason: format!("{:?}", e),
                })?;
        }

        info!("Opening zenoh session for arm command publishing");
        let session = zenoh::open(config)
            .await
            .map_err(|e| InitError::SessionOpen(format!("{}", e)))?;

        Ok(Self {
            session: Arc::new(session),
        })
    }

    /// Bind a command publisher to `topic` for its whole lifetime.
    pub async fn command_publisher(&self, topic: &str) -> Result<CommandPublisher, InitError> {
        let publisher = self
            .session
            .declare_publisher(topic.to_string())
            .await
            .map_err(|e| InitError::PublisherBind {
                topic: topic.to_string(),
                reason: format!("{}", e),
            })?;

        info!("Command publisher bound to topic '{}'", topic);

        let sink = ZenohSink {
            publisher: Arc::new(publisher),
            _session: Arc::clone(&self.session), // Keep session alive
        };

        Ok(CommandPublisher {
            topic: topic.to_string(),
            sink: Box::new(sink),
        })
    }
}

/// One-way payload sink between document serialization and the wire.
///
/// The production implementation is zenoh-backed; tests substitute
/// in-memory sinks to observe payloads and inject send failures.
#[async_trait]
pub trait CommandSink: Send + Sync {
    /// Transmit one serialized document; no acknowledgment returned.
    async fn send(&self, payload: Vec<u8>) -> Result<(), TransportError>;
}

struct ZenohSink {
    publisher: Arc<Publisher<'static>>,
    _session: Arc<Session>,
}

#[async_trait]
impl CommandSink for ZenohSink {
    async fn send(&self, payload: Vec<u8>) -> Result<(), TransportError> {
        self.publisher
            .put(payload)
            .await
            .map_err(|e| TransportError::SendFailed(format!("{}", e)))
    }
}

/// Outbound command channel bound to a single topic.
///
/// Holds no command history and is not a queue: each command a caller
/// wants on the wire needs its own `publish` call. The handle may be
/// shared across tasks; concurrent sends are supported by the
/// underlying zenoh publisher.
pub struct CommandPublisher {
    topic: String,
    sink: Box<dyn CommandSink>,
}

impl CommandPublisher {
    /// Build a publisher on top of an arbitrary sink.
    ///
    /// The zenoh-backed path is [`TransportContext::command_publisher`];
    /// this constructor exists for embedding and tests.
    pub fn with_sink(topic: impl Into<String>, sink: Box<dyn CommandSink>) -> Self {
        Self {
            topic: topic.into(),
            sink,
        }
    }

    /// Serialize a command document and send it once.
    ///
    /// Returns as soon as the transport accepts the payload. No
    /// delivery acknowledgment exists at this layer; a send failure is
    /// reported, never retried.
    pub async fn publish(&self, command: &ArmCommand) -> Result<(), TransportError> {
        let payload = serde_json::to_vec(command)
            .map_err(|e| TransportError::SendFailed(format!("serialization failed: {}", e)))?;

        self.sink.send(payload).await?;
        debug!("Published funcode={} command to '{}'", command.function_code, self.topic);
        Ok(())
    }

    /// Forward a pre-built document verbatim, bypassing all validation.
    ///
    /// The line is sent byte-for-byte as given; nothing checks that it
    /// is valid JSON or a well-formed command. Callers own the
    /// consequences on the arm side. The validated path is
    /// [`CommandPublisher::publish`].
    pub async fn publish_raw(&self, document: &str) -> Result<(), TransportError> {
        self.sink.send(document.as_bytes().to_vec()).await?;
        debug!("Forwarded raw document ({} bytes) to '{}'", document.len(), self.topic);
        Ok(())
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}
