//! Session types: the record of the client's one logical session.

use std::time::Duration;

use feltlink_protocol::PlayerId;

use crate::ConnectionStatus;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session behavior.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Fixed delay between a disconnect and the next reconnect attempt.
    ///
    /// Retries are unconditional and unbounded at this interval: no
    /// backoff growth, no cap. The user, not this layer, decides when to
    /// abandon the session.
    ///
    /// Default: 500 ms.
    pub retry_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_millis(500),
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerIdentity
// ---------------------------------------------------------------------------

/// Who is logged in, as confirmed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub player_id: PlayerId,
    pub screen_name: String,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The client's one logical session with the game server.
///
/// Singleton per running client, constructed explicitly at startup and
/// passed by reference to whatever needs it; there is no module-level
/// global. The connector it is paired with is replaced wholesale on
/// every reconnect attempt, never mutated in place.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) state: ConnectionStatus,
    pub(crate) retry_count: u32,
    pub(crate) player: Option<PlayerIdentity>,
    pub(crate) config: SessionConfig,
}

impl Session {
    /// Creates a session in the initial `Connecting` state.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            state: ConnectionStatus::Connecting,
            retry_count: 0,
            player: None,
            config,
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionStatus {
        self.state
    }

    /// Number of reconnect attempts since the last successful connect.
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// The logged-in player, once a login has been accepted.
    pub fn player(&self) -> Option<&PlayerIdentity> {
        self.player.as_ref()
    }

    /// The configured retry policy.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
