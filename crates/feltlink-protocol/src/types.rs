//! Core protocol types for Feltlink's wire format.
//!
//! Every type here travels on the wire between the poker client and the
//! game server. Each message is identified by a stable class identifier
//! (the serde tag) which uniquely determines how its fields are
//! interpreted. Class identifiers this build does not recognize decode to
//! [`LobbyMessage::Unknown`] instead of failing; forward compatibility is
//! a property of the protocol, not a policy bolted on elsewhere.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player.
///
/// Newtype over `u64`; `#[serde(transparent)]` keeps the wire shape a
/// plain number, so `PlayerId(42)` is just `42` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for a cash-game table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub u64);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T-{}", self.0)
    }
}

/// A unique identifier for a tournament (sit-and-go or scheduled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentId(pub u64);

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MTT-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Lobby feeds
// ---------------------------------------------------------------------------

/// Which lobby feed a subscription targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LobbyType {
    /// Ring-game tables with per-hand blinds.
    Cash,
    /// Single-table tournaments that start when full.
    SitAndGo,
    /// Scheduled multi-table tournaments.
    Tournament,
}

impl LobbyType {
    /// The canonical routing path for this feed on the lobby tree.
    pub fn default_path(self) -> &'static str {
        match self {
            LobbyType::Cash => "/",
            LobbyType::SitAndGo => "/sitandgo",
            LobbyType::Tournament => "/scheduled",
        }
    }
}

/// Asks the server to start streaming a lobby feed.
///
/// Fire-and-forget and idempotent from the wire's perspective: the server
/// replaces any feed already streaming for the same path rather than
/// duplicating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    /// Feed kind.
    pub lobby_type: LobbyType,
    /// Which game's lobby tree to read.
    pub game_id: u32,
    /// Routing path within the tree, e.g. `"/scheduled"`.
    pub path: String,
}

// ---------------------------------------------------------------------------
// Lobby records
// ---------------------------------------------------------------------------

/// Betting structure of a cash table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Limit {
    #[serde(rename = "NL")]
    NoLimit,
    #[serde(rename = "PL")]
    PotLimit,
    #[serde(rename = "FL")]
    FixedLimit,
}

/// Full state of one cash table as listed in the lobby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub table_id: TableId,
    pub name: String,
    /// Declared seat capacity.
    pub capacity: u32,
    /// Players currently seated.
    pub seated: u32,
    pub limit: Limit,
    /// Display amounts as sent by the server.
    pub small_blind: f64,
    pub big_blind: f64,
    /// ISO currency code.
    pub currency: String,
}

/// Delta update for one cash table already in the lobby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableUpdate {
    pub table_id: TableId,
    pub seated: u32,
}

/// Lifecycle state of a tournament as listed in the lobby.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStatus {
    Announced,
    Registering,
    Running,
    Finished,
    Cancelled,
}

/// Full state of one tournament as listed in the lobby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub tournament_id: TournamentId,
    pub name: String,
    /// Maximum number of entrants.
    pub capacity: u32,
    /// Players currently registered.
    pub registered: u32,
    pub status: TournamentStatus,
    pub buy_in: f64,
    pub currency: String,
}

/// Delta update for one tournament already in the lobby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentUpdate {
    pub tournament_id: TournamentId,
    pub registered: u32,
    pub status: TournamentStatus,
}

// ---------------------------------------------------------------------------
// LobbyMessage — lobby-class messages, dispatched by class identifier
// ---------------------------------------------------------------------------

/// Server → client lobby traffic.
///
/// `#[serde(tag = "class")]` puts the class identifier inline:
/// `{ "class": "TableRemoved", "table_id": 9 }`. The [`Unknown`] variant
/// absorbs every class identifier this build does not recognize, so a
/// newer server never breaks an older client; dispatch treats it as a
/// no-op.
///
/// [`Unknown`]: LobbyMessage::Unknown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum LobbyMessage {
    /// Full listing for the subscribed table feed.
    TableSnapshotList { snapshots: Vec<TableSnapshot> },

    /// Delta updates for tables already listed.
    TableUpdateList { updates: Vec<TableUpdate> },

    /// A table was closed and should be dropped from the listing.
    TableRemoved { table_id: TableId },

    /// Full listing for the subscribed tournament feed.
    TournamentSnapshotList { snapshots: Vec<TournamentSnapshot> },

    /// Delta updates for tournaments already listed.
    TournamentUpdateList { updates: Vec<TournamentUpdate> },

    /// Any lobby class this build does not recognize.
    #[serde(other)]
    Unknown,
}

// ---------------------------------------------------------------------------
// System messages — login, table watching, subscriptions
// ---------------------------------------------------------------------------

/// Result code of a login attempt.
///
/// The wire carries a status string; `"OK"` is the only value this layer
/// acts on, so everything else maps to [`LoginStatus::Rejected`] and is
/// left for the caller to re-prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    Ok,
    Rejected,
}

impl LoginStatus {
    /// Whether the login was accepted.
    pub fn is_ok(self) -> bool {
        matches!(self, LoginStatus::Ok)
    }
}

impl Serialize for LoginStatus {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            LoginStatus::Ok => "OK",
            LoginStatus::Rejected => "REJECTED",
        })
    }
}

impl<'de> Deserialize<'de> for LoginStatus {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let status = String::deserialize(deserializer)?;
        Ok(if status == "OK" {
            LoginStatus::Ok
        } else {
            LoginStatus::Rejected
        })
    }
}

/// Protocol-level messages that are not lobby or table traffic.
///
/// `#[serde(tag = "type")]`: `{ "type": "Login", "username": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SystemMessage {
    /// Client → server: authenticate over an established connection.
    Login {
        username: String,
        password: String,
        /// Operator-defined login flags; 0 for a plain login.
        flags: u32,
    },

    /// Server → client: outcome of a login attempt. Player identity is
    /// only meaningful when `status` is `"OK"`.
    LoginResponse {
        status: LoginStatus,
        player_id: PlayerId,
        screen_name: String,
    },

    /// Client → server: start receiving packets for a table as an
    /// observer. Fire-and-forget.
    WatchTable { table_id: TableId },

    /// Client → server: replace the streamed lobby feed.
    Subscribe(SubscribeRequest),
}

// ---------------------------------------------------------------------------
// Envelope — the top-level wire format
// ---------------------------------------------------------------------------

/// Game packets for an open table, opaque to the session layer.
///
/// The session layer forwards these to the active table session without
/// interpreting them; only table-side game logic knows the encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TablePacket(pub Vec<u8>);

/// The content of an envelope: which subsystem a message belongs to.
///
/// `#[serde(tag = "scope", content = "body")]` produces
/// `{ "scope": "Lobby", "body": { "class": ... } }`. The two-level shape
/// lets the connector route without looking inside lobby or table
/// payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "body")]
pub enum Payload {
    /// Login and subscription plumbing.
    System(SystemMessage),
    /// Lobby-class traffic, dispatched by class identifier.
    Lobby(LobbyMessage),
    /// Table-class traffic for the open table.
    Table(TablePacket),
}

/// The top-level message wrapper. Every frame on the wire is one envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Auto-incrementing sequence number; each direction keeps its own
    /// counter. Ordering itself is guaranteed by the transport.
    pub seq: u64,

    /// The actual message content.
    pub payload: Payload,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The backend fixes exact JSON shapes for these types; a serde
    //! attribute mismatch means the client silently drops live traffic,
    //! so the shape tests here are as load-bearing as the round trips.

    use super::*;

    // =====================================================================
    // Identity types
    // =====================================================================

    #[test]
    fn test_player_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&PlayerId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_table_id_deserializes_from_plain_number() {
        let id: TableId = serde_json::from_str("9").unwrap();
        assert_eq!(id, TableId(9));
    }

    #[test]
    fn test_identity_display() {
        assert_eq!(PlayerId(7).to_string(), "P-7");
        assert_eq!(TableId(3).to_string(), "T-3");
        assert_eq!(TournamentId(12).to_string(), "MTT-12");
    }

    // =====================================================================
    // Lobby feeds
    // =====================================================================

    #[test]
    fn test_lobby_type_default_paths() {
        assert_eq!(LobbyType::Cash.default_path(), "/");
        assert_eq!(LobbyType::SitAndGo.default_path(), "/sitandgo");
        assert_eq!(LobbyType::Tournament.default_path(), "/scheduled");
    }

    #[test]
    fn test_lobby_type_serializes_as_screaming_snake() {
        let json = serde_json::to_string(&LobbyType::Cash).unwrap();
        assert_eq!(json, "\"CASH\"");
        let json = serde_json::to_string(&LobbyType::SitAndGo).unwrap();
        assert_eq!(json, "\"SIT_AND_GO\"");
    }

    #[test]
    fn test_subscribe_request_round_trip() {
        let req = SubscribeRequest {
            lobby_type: LobbyType::Tournament,
            game_id: 1,
            path: "/scheduled".into(),
        };
        let bytes = serde_json::to_vec(&req).unwrap();
        let decoded: SubscribeRequest =
            serde_json::from_slice(&bytes).unwrap();
        assert_eq!(req, decoded);
    }

    // =====================================================================
    // Lobby records
    // =====================================================================

    #[test]
    fn test_limit_uses_short_wire_codes() {
        assert_eq!(
            serde_json::to_string(&Limit::NoLimit).unwrap(),
            "\"NL\""
        );
        let limit: Limit = serde_json::from_str("\"FL\"").unwrap();
        assert_eq!(limit, Limit::FixedLimit);
    }

    #[test]
    fn test_tournament_status_screaming_snake() {
        let status: TournamentStatus =
            serde_json::from_str("\"REGISTERING\"").unwrap();
        assert_eq!(status, TournamentStatus::Registering);
    }

    #[test]
    fn test_table_snapshot_round_trip() {
        let snapshot = TableSnapshot {
            table_id: TableId(4),
            name: "Rio 10".into(),
            capacity: 6,
            seated: 4,
            limit: Limit::NoLimit,
            small_blind: 0.5,
            big_blind: 1.0,
            currency: "EUR".into(),
        };
        let bytes = serde_json::to_vec(&snapshot).unwrap();
        let decoded: TableSnapshot =
            serde_json::from_slice(&bytes).unwrap();
        assert_eq!(snapshot, decoded);
    }

    // =====================================================================
    // LobbyMessage — class identifier dispatch
    // =====================================================================

    #[test]
    fn test_lobby_message_tags_with_class() {
        let msg = LobbyMessage::TableRemoved {
            table_id: TableId(9),
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["class"], "TableRemoved");
        assert_eq!(json["table_id"], 9);
    }

    #[test]
    fn test_lobby_message_snapshot_list_round_trip() {
        let msg = LobbyMessage::TournamentSnapshotList {
            snapshots: vec![TournamentSnapshot {
                tournament_id: TournamentId(2),
                name: "Nightly 100".into(),
                capacity: 200,
                registered: 18,
                status: TournamentStatus::Registering,
                buy_in: 100.0,
                currency: "EUR".into(),
            }],
        };
        let bytes = serde_json::to_vec(&msg).unwrap();
        let decoded: LobbyMessage = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(msg, decoded);
    }

    #[test]
    fn test_unknown_lobby_class_decodes_to_unknown() {
        // A class identifier from a newer server. Must decode, not error,
        // and must not be mistaken for a known class.
        let json = r#"{"class": "HandStrengthHint", "strength": 0.93}"#;
        let msg: LobbyMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg, LobbyMessage::Unknown);
    }

    #[test]
    fn test_empty_update_list_round_trip() {
        let msg = LobbyMessage::TableUpdateList { updates: vec![] };
        let bytes = serde_json::to_vec(&msg).unwrap();
        let decoded: LobbyMessage = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(msg, decoded);
    }

    // =====================================================================
    // System messages
    // =====================================================================

    #[test]
    fn test_login_json_format() {
        let msg = SystemMessage::Login {
            username: "alice".into(),
            password: "hunter2".into(),
            flags: 0,
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["type"], "Login");
        assert_eq!(json["username"], "alice");
        assert_eq!(json["flags"], 0);
    }

    #[test]
    fn test_login_response_ok_json_format() {
        let json = r#"{
            "type": "LoginResponse",
            "status": "OK",
            "player_id": 42,
            "screen_name": "Alice"
        }"#;
        let msg: SystemMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg,
            SystemMessage::LoginResponse {
                status: LoginStatus::Ok,
                player_id: PlayerId(42),
                screen_name: "Alice".into(),
            }
        );
    }

    #[test]
    fn test_any_non_ok_login_status_is_rejected() {
        for status in ["ERROR", "INVALID_CREDENTIALS", "BANNED", ""] {
            let json = format!("\"{status}\"");
            let decoded: LoginStatus =
                serde_json::from_str(&json).unwrap();
            assert_eq!(decoded, LoginStatus::Rejected, "status {status:?}");
            assert!(!decoded.is_ok());
        }
    }

    #[test]
    fn test_subscribe_flattens_request_fields() {
        let msg = SystemMessage::Subscribe(SubscribeRequest {
            lobby_type: LobbyType::Cash,
            game_id: 1,
            path: "/".into(),
        });
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["type"], "Subscribe");
        assert_eq!(json["lobby_type"], "CASH");
        assert_eq!(json["path"], "/");
    }

    #[test]
    fn test_watch_table_round_trip() {
        let msg = SystemMessage::WatchTable {
            table_id: TableId(31),
        };
        let bytes = serde_json::to_vec(&msg).unwrap();
        let decoded: SystemMessage =
            serde_json::from_slice(&bytes).unwrap();
        assert_eq!(msg, decoded);
    }

    // =====================================================================
    // Envelope
    // =====================================================================

    #[test]
    fn test_payload_scope_body_shape() {
        let payload = Payload::Lobby(LobbyMessage::TableUpdateList {
            updates: vec![],
        });
        let json: serde_json::Value =
            serde_json::to_value(&payload).unwrap();

        assert_eq!(json["scope"], "Lobby");
        assert_eq!(json["body"]["class"], "TableUpdateList");
    }

    #[test]
    fn test_table_packet_is_opaque_bytes() {
        let payload = Payload::Table(TablePacket(vec![1, 2, 3]));
        let json: serde_json::Value =
            serde_json::to_value(&payload).unwrap();

        assert_eq!(json["scope"], "Table");
        assert_eq!(json["body"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_envelope_round_trip() {
        let envelope = Envelope {
            seq: 42,
            payload: Payload::System(SystemMessage::WatchTable {
                table_id: TableId(8),
            }),
        };
        let bytes = serde_json::to_vec(&envelope).unwrap();
        let decoded: Envelope = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(envelope, decoded);
    }

    // =====================================================================
    // Error cases — malformed input
    // =====================================================================

    #[test]
    fn test_decode_garbage_returns_error() {
        let garbage = b"not json at all";
        let result: Result<Envelope, _> = serde_json::from_slice(garbage);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_wrong_shape_returns_error() {
        // Valid JSON but missing required fields.
        let wrong = r#"{"name": "hello"}"#;
        let result: Result<Envelope, _> = serde_json::from_str(wrong);
        assert!(result.is_err());
    }
}
