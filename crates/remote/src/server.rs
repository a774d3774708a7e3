// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket server implementation.
//!
//! Each connection is served independently; every request gets exactly one
//! reply carrying the request id.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use uc_core::protocol::{ClientMessage, ServerMessage};

use crate::state::ServerState;

/// Run the WebSocket server on the given address.
pub async fn run(addr: SocketAddr, state: ServerState) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on: {}", listener.local_addr()?);
    serve(listener, state).await?;
    Ok(())
}

/// Accept connections from an already bound listener.
pub(crate) async fn serve(listener: TcpListener, state: ServerState) -> std::io::Result<()> {
    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let state = state.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }
}

/// Handle a single WebSocket connection.
pub(crate) async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: ServerState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    info!("New WebSocket connection from: {}", peer_addr);

    let (mut ws_sink, mut ws_stream) = ws_stream.split();

    loop {
        match ws_stream.next().await {
            Some(Ok(Message::Text(text))) => {
                let response = handle_client_message(&text, &state).await;
                let json = response.to_json()?;
                ws_sink.send(Message::Text(json.into())).await?;
            }
            Some(Ok(Message::Close(_))) => {
                info!("Client {} disconnected", peer_addr);
                break;
            }
            Some(Ok(Message::Ping(data))) => {
                ws_sink.send(Message::Pong(data)).await?;
            }
            Some(Ok(_)) => {
                // Ignore other message types (Binary, Pong, Frame)
            }
            Some(Err(e)) => {
                warn!("WebSocket error from {}: {}", peer_addr, e);
                break;
            }
            None => {
                info!("Client {} stream ended", peer_addr);
                break;
            }
        }
    }

    info!("Connection closed: {}", peer_addr);
    Ok(())
}

/// Process a client message and return its reply.
pub(crate) async fn handle_client_message(text: &str, state: &ServerState) -> ServerMessage {
    let msg = match ClientMessage::from_json(text) {
        Ok(msg) => msg,
        Err(e) => {
            // Echo the id when there is one so the client is not left waiting
            let id = serde_json::from_str::<Value>(text)
                .ok()
                .and_then(|v| v.get("id").and_then(Value::as_u64));
            warn!("Invalid message: {}", e);
            return ServerMessage::error(id, format!("invalid message: {}", e));
        }
    };
    debug!("Received message: {:?}", msg);

    match msg {
        ClientMessage::Set { id, path, value } => match state.set(&path, value).await {
            Ok(()) => ServerMessage::ack(id),
            Err(e) => {
                warn!(%path, "set refused: {}", e);
                ServerMessage::error(Some(id), e.to_string())
            }
        },

        ClientMessage::Get { id, path } => ServerMessage::value(id, state.get(&path).await),

        ClientMessage::Ping { id } => {
            debug!("Ping received: {}", id);
            ServerMessage::pong(id)
        }
    }
}
