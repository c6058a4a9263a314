//! # Feltlink
//!
//! The session/connection layer of a real-time poker client.
//!
//! Feltlink keeps one logical session alive against a game-server
//! backend over a persistent message-oriented connection. It owns the
//! connection state machine, an unbounded fixed-interval reconnect
//! policy, login sequencing, and class-based dispatch of inbound
//! messages to either the lobby sink or the single open table session.
//! Everything presentational sits behind the [`LobbySink`],
//! [`ClientView`] and [`TableSession`] traits.
//!
//! ```text
//! feltlink (this crate)   Connector I/O task + Client event loop
//!     ↕
//! feltlink-session        connection state machine, retry policy
//!     ↕
//! feltlink-protocol       class-tagged messages, envelope, codec
//!     ↕
//! feltlink-transport      Transport/Connection traits, WebSocket
//! ```
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use feltlink::prelude::*;
//!
//! let (client, handle) =
//!     ClientBuilder::new(Endpoint::new("play.example.com", 9191, "socket"))
//!         .build(WebSocketTransport, JsonCodec, sink, view, tables);
//!
//! tokio::spawn(client.run());
//!
//! // Once the view's show_login hook fires:
//! handle.login("alice", "hunter2", 0);
//! ```

mod client;
mod connector;
mod sink;
mod table;

pub use client::{Client, ClientBuilder, ClientConfig, ClientHandle};
pub use connector::{Connector, ConnectorEvent, ConnectorHandle};
pub use sink::{ClientView, LobbySink};
pub use table::{TableSession, TableSessionFactory};

/// Common imports for building on Feltlink.
pub mod prelude {
    pub use crate::{
        Client, ClientBuilder, ClientHandle, ClientView, ConnectorHandle,
        LobbySink, TableSession, TableSessionFactory,
    };
    pub use feltlink_protocol::{
        Codec, Envelope, JsonCodec, Limit, LobbyMessage, LobbyType,
        LoginStatus, Payload, PlayerId, SubscribeRequest, SystemMessage,
        TableId, TablePacket, TableSnapshot, TableUpdate, TournamentId,
        TournamentSnapshot, TournamentStatus, TournamentUpdate,
    };
    pub use feltlink_session::{
        ConnectionStatus, PlayerIdentity, SessionConfig,
    };
    pub use feltlink_transport::{Endpoint, WebSocketTransport};
}
