//! Wire protocol for Feltlink.
//!
//! This crate defines the "language" spoken between the poker client and
//! the game server:
//!
//! - **Types** ([`Envelope`], [`LobbyMessage`], [`SystemMessage`], etc.)
//!   — the message structures that travel on the wire. Every inbound unit
//!   is a typed message identified by a stable class identifier plus a
//!   field payload.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those messages are
//!   converted to and from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw frames) and the session
//! layer (connection state, dispatch). It knows nothing about connections
//! or tables; it only knows how to name and serialize messages.
//!
//! ```text
//! Transport (frames) → Protocol (Envelope) → Session (dispatch)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    Envelope, Limit, LobbyMessage, LobbyType, LoginStatus, Payload,
    PlayerId, SubscribeRequest, SystemMessage, TableId, TablePacket,
    TableSnapshot, TableUpdate, TournamentId, TournamentSnapshot,
    TournamentStatus, TournamentUpdate,
};
