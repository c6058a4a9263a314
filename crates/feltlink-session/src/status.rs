//! The connection status vocabulary shared with the connector.

use std::fmt;

/// Status of the connection to the game server.
///
/// The numeric codes are fixed by the backend protocol and exposed via
/// [`code`](ConnectionStatus::code) / [`from_code`](ConnectionStatus::from_code).
/// The session state takes the value of the last status processed, so
/// this one vocabulary serves as both event and state.
///
/// `Reconnecting`, `Reconnected`, `Fail` and `Cancelled` are carried in
/// the vocabulary but drive no transition logic; they are reserved
/// extension points for future reconnect policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
    Reconnecting,
    Reconnected,
    Fail,
    Cancelled,
}

impl ConnectionStatus {
    /// The backend's numeric code for this status.
    pub fn code(self) -> u8 {
        match self {
            ConnectionStatus::Connecting => 1,
            ConnectionStatus::Connected => 2,
            ConnectionStatus::Disconnected => 3,
            ConnectionStatus::Reconnecting => 4,
            ConnectionStatus::Reconnected => 5,
            ConnectionStatus::Fail => 6,
            ConnectionStatus::Cancelled => 7,
        }
    }

    /// Looks up a status by its numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ConnectionStatus::Connecting),
            2 => Some(ConnectionStatus::Connected),
            3 => Some(ConnectionStatus::Disconnected),
            4 => Some(ConnectionStatus::Reconnecting),
            5 => Some(ConnectionStatus::Reconnected),
            6 => Some(ConnectionStatus::Fail),
            7 => Some(ConnectionStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Reconnecting => "reconnecting",
            ConnectionStatus::Reconnected => "reconnected",
            ConnectionStatus::Fail => "fail",
            ConnectionStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}
