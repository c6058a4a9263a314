//! Transport adapter layer for Feltlink.
//!
//! Provides the [`Transport`] and [`Connection`] traits that abstract over
//! the duplex channel to the game server. The client core never touches a
//! socket directly; it asks a `Transport` to dial an [`Endpoint`] and then
//! speaks raw frames through the resulting `Connection`.
//!
//! # Feature Flags
//!
//! - `websocket` (default) — WebSocket transport via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketTransport};

use std::fmt;

/// Where to dial: host, port, and the named channel on the server.
///
/// This is the `(host, port, channelName)` triple of the client's connect
/// operation. Which transport implementation interprets it is decided by
/// the `Transport` type the client is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Server hostname or IP.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Channel name; for WebSocket transports this becomes the URL path.
    pub channel: String,
}

impl Endpoint {
    /// Creates an endpoint from its parts.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            channel: channel.into(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.host, self.port, self.channel)
    }
}

/// Opaque identifier for a connection attempt.
///
/// A fresh id is assigned per dial, so log lines from a replaced
/// connection are distinguishable from its successor's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Dials outbound connections to the game server.
pub trait Transport: Send + Sync + 'static {
    /// The connection type produced by this transport.
    type Connection: Connection;
    /// The error type for transport operations.
    type Error: std::error::Error + Send + Sync;

    /// Opens a connection to the given endpoint.
    fn dial(
        &self,
        endpoint: &Endpoint,
    ) -> impl std::future::Future<Output = Result<Self::Connection, Self::Error>>
    + Send;
}

/// A single established connection that can send and receive frames.
pub trait Connection: Send + Sync + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync;

    /// Sends one frame to the server.
    fn send(
        &self,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<(), Self::Error>> + Send;

    /// Receives the next frame from the server.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    fn recv(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>, Self::Error>>
    + Send;

    /// Closes the connection.
    fn close(
        &self,
    ) -> impl std::future::Future<Output = Result<(), Self::Error>> + Send;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_display_includes_channel() {
        let ep = Endpoint::new("play.example.com", 9191, "socket");
        assert_eq!(ep.to_string(), "play.example.com:9191/socket");
    }

    #[test]
    fn test_connection_id_new_and_into_inner() {
        let id = ConnectionId::new(42);
        assert_eq!(id.into_inner(), 42);
    }

    #[test]
    fn test_connection_id_display() {
        let id = ConnectionId::new(7);
        assert_eq!(id.to_string(), "conn-7");
    }

    #[test]
    fn test_connection_id_equality() {
        let a = ConnectionId::new(1);
        let b = ConnectionId::new(1);
        let c = ConnectionId::new(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
