// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket protocol messages between a client and the remote store.
//!
//! The protocol is request/response:
//! - Client sends `set`, `get`, or `ping`, each carrying a client-chosen `id`
//! - Server answers with `ack`, `value`, `pong`, or `error` echoing that `id`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::path::RemotePath;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Replace the value at `path`. A `null` value deletes it.
    Set {
        id: u64,
        path: RemotePath,
        value: Value,
    },

    /// Read the value at `path`.
    Get { id: u64, path: RemotePath },

    /// Ping message for keepalive.
    Ping {
        /// Client-chosen ID echoed in Pong.
        id: u64,
    },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The `set` with this id was applied.
    Ack { id: u64 },

    /// Response to `get`. `null` when nothing is stored at the path.
    Value { id: u64, value: Value },

    /// Pong response to client Ping.
    Pong {
        /// Echoed from the Ping message.
        id: u64,
    },

    /// Error message.
    Error {
        /// Request the error belongs to, absent when the request was unreadable.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
        /// Human-readable error description.
        message: String,
    },
}

impl ClientMessage {
    /// Creates a Set message.
    pub fn set(id: u64, path: RemotePath, value: Value) -> Self {
        ClientMessage::Set { id, path, value }
    }

    /// Creates a Get message.
    pub fn get(id: u64, path: RemotePath) -> Self {
        ClientMessage::Get { id, path }
    }

    /// Creates a Ping message.
    pub fn ping(id: u64) -> Self {
        ClientMessage::Ping { id }
    }

    /// Returns the request id.
    pub fn id(&self) -> u64 {
        match self {
            ClientMessage::Set { id, .. }
            | ClientMessage::Get { id, .. }
            | ClientMessage::Ping { id } => *id,
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ServerMessage {
    /// Creates an Ack message.
    pub fn ack(id: u64) -> Self {
        ServerMessage::Ack { id }
    }

    /// Creates a Value message.
    pub fn value(id: u64, value: Value) -> Self {
        ServerMessage::Value { id, value }
    }

    /// Creates a Pong message.
    pub fn pong(id: u64) -> Self {
        ServerMessage::Pong { id }
    }

    /// Creates an Error message.
    pub fn error(id: Option<u64>, message: impl Into<String>) -> Self {
        ServerMessage::Error {
            id,
            message: message.into(),
        }
    }

    /// Returns the id of the request this message answers, if any.
    pub fn request_id(&self) -> Option<u64> {
        match self {
            ServerMessage::Ack { id }
            | ServerMessage::Value { id, .. }
            | ServerMessage::Pong { id } => Some(*id),
            ServerMessage::Error { id, .. } => *id,
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
