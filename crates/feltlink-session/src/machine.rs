//! The connection state machine: transitions and the effects they demand.
//!
//! Transitions mutate the [`Session`] and return a list of
//! [`SessionAction`]s for the owner to execute. The split keeps the
//! machine free of I/O: the client's event loop owns connectors, timers
//! and UI surfaces, and this module owns only the decisions.
//!
//! ```text
//!            connect()
//!   (start) ──────────→ Connecting ──status──→ Connected
//!                           ↑                      │
//!                     retry fires             status=Disconnected
//!                           │                      │
//!                           └──── 500 ms delay ────┘   (unbounded)
//! ```

use std::time::Duration;

use feltlink_protocol::{LoginStatus, PlayerId};

use crate::{ConnectionStatus, PlayerIdentity, Session};

/// An effect the session owner must carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Surface a connection status line to the user.
    ShowStatus(String),

    /// The connection is up; the UI should offer the login form.
    PromptLogin,

    /// Login accepted; switch from the login surface to the lobby.
    EnterLobby(PlayerIdentity),

    /// Issue the default cash-game lobby subscription.
    SubscribeCashGames,

    /// Arm the one-shot reconnect timer. The owner keeps a single timer
    /// slot: arming replaces any pending timer, so at most one deferred
    /// reconnect exists no matter how many disconnects are observed.
    ScheduleRetry { attempt: u32, delay: Duration },
}

impl Session {
    /// A connection attempt is being initiated.
    ///
    /// Called by the owner right before it constructs a fresh connector,
    /// both at startup and when the retry timer fires.
    pub fn on_connect(&mut self) -> Vec<SessionAction> {
        self.state = ConnectionStatus::Connecting;
        vec![SessionAction::ShowStatus("Initializing".into())]
    }

    /// A status event arrived from the connector.
    ///
    /// The session state always takes the value of the status; which
    /// actions fire depends on it. `Reconnecting`, `Reconnected`, `Fail`
    /// and `Cancelled` are pass-through: recorded, no actions.
    pub fn on_status(
        &mut self,
        status: ConnectionStatus,
    ) -> Vec<SessionAction> {
        tracing::debug!(from = %self.state, to = %status, "connection status");
        self.state = status;

        match status {
            ConnectionStatus::Connected => {
                self.retry_count = 0;
                vec![
                    SessionAction::ShowStatus("Connected".into()),
                    SessionAction::PromptLogin,
                ]
            }
            ConnectionStatus::Disconnected => {
                self.retry_count += 1;
                let attempt = self.retry_count;
                tracing::info!(attempt, "disconnected, scheduling reconnect");
                vec![
                    SessionAction::ShowStatus(format!(
                        "Disconnected, retrying (count {attempt})"
                    )),
                    SessionAction::ScheduleRetry {
                        attempt,
                        delay: self.config.retry_delay,
                    },
                ]
            }
            ConnectionStatus::Connecting => {
                vec![SessionAction::ShowStatus("Connecting".into())]
            }
            ConnectionStatus::Reconnecting
            | ConnectionStatus::Reconnected
            | ConnectionStatus::Fail
            | ConnectionStatus::Cancelled => Vec::new(),
        }
    }

    /// A login result arrived from the connector.
    ///
    /// Only an `"OK"` status does anything: the identity is recorded,
    /// the UI moves to the lobby, and the default cash-game feed is
    /// subscribed. Every other status is a no-op here; re-prompting is
    /// the caller's business.
    pub fn on_login(
        &mut self,
        status: LoginStatus,
        player_id: PlayerId,
        screen_name: String,
    ) -> Vec<SessionAction> {
        if !status.is_ok() {
            tracing::debug!(%player_id, "login rejected");
            return Vec::new();
        }

        let identity = PlayerIdentity {
            player_id,
            screen_name,
        };
        tracing::info!(%player_id, name = %identity.screen_name, "logged in");
        self.player = Some(identity.clone());

        vec![
            SessionAction::EnterLobby(identity),
            SessionAction::SubscribeCashGames,
        ]
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for the state machine.
    //!
    //! The machine is pure, so every property here is checked by feeding
    //! an event sequence into a fresh `Session` and inspecting the state
    //! and the returned actions. No mocks, no runtime.

    use super::*;
    use crate::SessionConfig;

    fn session() -> Session {
        Session::new(SessionConfig::default())
    }

    /// Drains the retry action out of an action list, if present.
    fn retry_of(actions: &[SessionAction]) -> Option<(u32, Duration)> {
        actions.iter().find_map(|a| match a {
            SessionAction::ScheduleRetry { attempt, delay } => {
                Some((*attempt, *delay))
            }
            _ => None,
        })
    }

    // =====================================================================
    // on_connect()
    // =====================================================================

    #[test]
    fn test_new_session_starts_connecting() {
        let session = session();
        assert_eq!(session.state(), ConnectionStatus::Connecting);
        assert_eq!(session.retry_count(), 0);
        assert!(session.player().is_none());
    }

    #[test]
    fn test_on_connect_shows_initializing() {
        let mut session = session();
        let actions = session.on_connect();

        assert_eq!(session.state(), ConnectionStatus::Connecting);
        assert_eq!(
            actions,
            vec![SessionAction::ShowStatus("Initializing".into())]
        );
    }

    // =====================================================================
    // on_status() — the transition table
    // =====================================================================

    #[test]
    fn test_connected_resets_retries_and_prompts_login() {
        let mut session = session();
        session.on_status(ConnectionStatus::Disconnected);
        session.on_status(ConnectionStatus::Disconnected);
        assert_eq!(session.retry_count(), 2);

        let actions = session.on_status(ConnectionStatus::Connected);

        assert_eq!(session.state(), ConnectionStatus::Connected);
        assert_eq!(session.retry_count(), 0, "counter resets on connect");
        assert_eq!(
            actions,
            vec![
                SessionAction::ShowStatus("Connected".into()),
                SessionAction::PromptLogin,
            ]
        );
    }

    #[test]
    fn test_disconnected_increments_counter_by_exactly_one() {
        let mut session = session();

        for expected in 1..=5u32 {
            let actions =
                session.on_status(ConnectionStatus::Disconnected);
            assert_eq!(session.retry_count(), expected);

            let (attempt, delay) =
                retry_of(&actions).expect("disconnect schedules a retry");
            assert_eq!(attempt, expected);
            assert_eq!(delay, Duration::from_millis(500));
        }
    }

    #[test]
    fn test_disconnected_schedules_exactly_one_retry() {
        let mut session = session();
        let actions = session.on_status(ConnectionStatus::Disconnected);

        let retries = actions
            .iter()
            .filter(|a| {
                matches!(a, SessionAction::ScheduleRetry { .. })
            })
            .count();
        assert_eq!(retries, 1);
    }

    #[test]
    fn test_disconnected_status_message_carries_count() {
        let mut session = session();
        session.on_status(ConnectionStatus::Disconnected);
        let actions = session.on_status(ConnectionStatus::Disconnected);

        assert_eq!(
            actions[0],
            SessionAction::ShowStatus(
                "Disconnected, retrying (count 2)".into()
            )
        );
    }

    #[test]
    fn test_connecting_status_only_shows_text() {
        let mut session = session();
        let actions = session.on_status(ConnectionStatus::Connecting);

        assert_eq!(session.state(), ConnectionStatus::Connecting);
        assert_eq!(
            actions,
            vec![SessionAction::ShowStatus("Connecting".into())]
        );
    }

    #[test]
    fn test_reserved_statuses_pass_through_without_actions() {
        for status in [
            ConnectionStatus::Reconnecting,
            ConnectionStatus::Reconnected,
            ConnectionStatus::Fail,
            ConnectionStatus::Cancelled,
        ] {
            let mut session = session();
            let actions = session.on_status(status);

            assert_eq!(session.state(), status, "state takes the value");
            assert!(actions.is_empty(), "{status} drives no actions");
        }
    }

    #[test]
    fn test_state_is_a_function_of_the_event_sequence() {
        // Same sequence, two fresh sessions: identical outcomes.
        let sequence = [
            ConnectionStatus::Connecting,
            ConnectionStatus::Connected,
            ConnectionStatus::Disconnected,
            ConnectionStatus::Connecting,
            ConnectionStatus::Connected,
            ConnectionStatus::Reconnecting,
        ];

        let mut a = session();
        let mut b = session();
        for status in sequence {
            a.on_status(status);
            b.on_status(status);
        }

        assert_eq!(a.state(), b.state());
        assert_eq!(a.state(), ConnectionStatus::Reconnecting);
        assert_eq!(a.retry_count(), b.retry_count());
        assert_eq!(a.retry_count(), 0, "reset by the second connect");
    }

    // =====================================================================
    // on_login()
    // =====================================================================

    #[test]
    fn test_login_ok_records_identity_and_subscribes_cash() {
        use feltlink_protocol::{LoginStatus, PlayerId};

        let mut session = session();
        session.on_status(ConnectionStatus::Connected);

        let actions = session.on_login(
            LoginStatus::Ok,
            PlayerId(42),
            "Alice".into(),
        );

        let identity = PlayerIdentity {
            player_id: PlayerId(42),
            screen_name: "Alice".into(),
        };
        assert_eq!(session.player(), Some(&identity));
        assert_eq!(
            actions,
            vec![
                SessionAction::EnterLobby(identity),
                SessionAction::SubscribeCashGames,
            ]
        );
    }

    #[test]
    fn test_login_rejected_changes_nothing() {
        use feltlink_protocol::{LoginStatus, PlayerId};

        let mut session = session();
        session.on_status(ConnectionStatus::Connected);
        let state_before = session.state();
        let retries_before = session.retry_count();

        let actions = session.on_login(
            LoginStatus::Rejected,
            PlayerId(42),
            "Alice".into(),
        );

        assert!(actions.is_empty(), "no subscription on rejected login");
        assert!(session.player().is_none());
        assert_eq!(session.state(), state_before);
        assert_eq!(session.retry_count(), retries_before);
    }

    #[test]
    fn test_login_does_not_touch_connection_state() {
        use feltlink_protocol::{LoginStatus, PlayerId};

        let mut session = session();
        session.on_status(ConnectionStatus::Connected);
        session.on_login(LoginStatus::Ok, PlayerId(1), "Bo".into());

        assert_eq!(session.state(), ConnectionStatus::Connected);
    }
}
