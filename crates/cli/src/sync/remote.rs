// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote store client.
//!
//! Provides a trait-based seam over the hosted database:
//! - [`WebSocketRemote`] for production, speaking the `uc_core::protocol` messages
//! - Mock implementations for unit testing
//!
//! A client performs exactly one attempt per call. Retrying is the sync
//! engine's job.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::debug;

use uc_core::protocol::{ClientMessage, ServerMessage};
use uc_core::RemotePath;

/// Error type for remote store operations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// No remote is configured.
    #[error("no remote configured")]
    NotConfigured,

    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connection closed unexpectedly.
    #[error("connection closed")]
    ConnectionClosed,

    /// No answer within the request timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The server refused the write.
    #[error("rejected by remote: {0}")]
    Rejected(String),

    /// Send failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Receive failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Result type for remote store operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Boxed future returned by [`RemoteStore::write`].
pub type RemoteFuture<'a> = Pin<Box<dyn Future<Output = RemoteResult<()>> + Send + 'a>>;

/// A hierarchical remote key-value store.
///
/// This trait abstracts over the actual service, allowing for easy testing
/// with mock implementations.
pub trait RemoteStore: Send + Sync {
    /// Set the value at `path`. One attempt, no retry.
    fn write<'a>(&'a self, path: &'a RemotePath, data: &'a Value) -> RemoteFuture<'a>;
}

/// Stand-in used when no remote is configured. Every write fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unconfigured;

impl RemoteStore for Unconfigured {
    fn write<'a>(&'a self, _path: &'a RemotePath, _data: &'a Value) -> RemoteFuture<'a> {
        Box::pin(async { Err(RemoteError::NotConfigured) })
    }
}

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Remote store client over WebSocket.
///
/// Every request opens its own connection and closes it after the reply.
pub struct WebSocketRemote {
    url: String,
    timeout: Duration,
    next_id: AtomicU64,
}

impl WebSocketRemote {
    /// Create a client for `url` with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        WebSocketRemote {
            url: url.into(),
            timeout,
            next_id: AtomicU64::new(1),
        }
    }

    /// URL this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Read the value at `path`.
    pub async fn read(&self, path: &RemotePath) -> RemoteResult<Value> {
        let id = self.next_id();
        match self.request(ClientMessage::get(id, path.clone())).await? {
            ServerMessage::Value { value, .. } => Ok(value),
            ServerMessage::Error { message, .. } => Err(RemoteError::Rejected(message)),
            other => Err(unexpected(&other)),
        }
    }

    /// Round-trip a ping.
    pub async fn ping(&self) -> RemoteResult<()> {
        let id = self.next_id();
        match self.request(ClientMessage::ping(id)).await? {
            ServerMessage::Pong { .. } => Ok(()),
            other => Err(unexpected(&other)),
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Connect, send one request and wait for the reply carrying its id.
    async fn request(&self, msg: ClientMessage) -> RemoteResult<ServerMessage> {
        tokio::time::timeout(self.timeout, async {
            let mut ws = connect(&self.url).await?;
            let reply = exchange(&mut ws, &msg).await;
            let _ = ws.close(None).await;
            reply
        })
        .await
        .unwrap_or(Err(RemoteError::Timeout(self.timeout)))
    }
}

impl RemoteStore for WebSocketRemote {
    fn write<'a>(&'a self, path: &'a RemotePath, data: &'a Value) -> RemoteFuture<'a> {
        Box::pin(async move {
            let id = self.next_id();
            let reply = self
                .request(ClientMessage::set(id, path.clone(), data.clone()))
                .await?;
            match reply {
                ServerMessage::Ack { .. } => {
                    debug!(%path, "remote write acknowledged");
                    Ok(())
                }
                ServerMessage::Error { message, .. } => Err(RemoteError::Rejected(message)),
                other => Err(unexpected(&other)),
            }
        })
    }
}

async fn connect(url: &str) -> RemoteResult<Socket> {
    let (ws, _) = tokio_tungstenite::connect_async(url)
        .await
        .map_err(|e| RemoteError::ConnectionFailed(e.to_string()))?;
    debug!(url, "connected to remote");
    Ok(ws)
}

async fn exchange(ws: &mut Socket, msg: &ClientMessage) -> RemoteResult<ServerMessage> {
    let json = msg
        .to_json()
        .map_err(|e| RemoteError::SerializationError(e.to_string()))?;
    ws.send(Message::Text(json.into()))
        .await
        .map_err(|e| RemoteError::SendFailed(e.to_string()))?;

    let id = msg.id();
    loop {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => {
                let reply = ServerMessage::from_json(&text)
                    .map_err(|e| RemoteError::SerializationError(e.to_string()))?;
                match reply.request_id() {
                    Some(reply_id) if reply_id == id => return Ok(reply),
                    // Unsolicited server error, e.g. a malformed earlier frame
                    None => {
                        if let ServerMessage::Error { message, .. } = reply {
                            return Err(RemoteError::Rejected(message));
                        }
                    }
                    Some(_) => continue,
                }
            }
            Some(Ok(Message::Close(_))) | None => return Err(RemoteError::ConnectionClosed),
            Some(Ok(_)) => continue,
            Some(Err(e)) => return Err(RemoteError::ReceiveFailed(e.to_string())),
        }
    }
}

fn unexpected(msg: &ServerMessage) -> RemoteError {
    RemoteError::ReceiveFailed(format!("unexpected reply: {:?}", msg))
}
