//! The connector: one connection attempt, from dial to disconnect.
//!
//! Each `Connector` owns a spawned I/O task that dials the endpoint,
//! then pumps frames in both directions: outbound messages are encoded
//! and sent, inbound frames are decoded and routed onto the event
//! channel. The client is the channel's only reader, so all dispatch
//! stays on one logical thread of control.
//!
//! A connector is never reused across attempts. The client replaces it
//! wholesale on every reconnect, and dropping the old one aborts its
//! I/O task, so a replaced connector cannot emit stale events.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use feltlink_protocol::{
    Codec, Envelope, LobbyMessage, LoginStatus, Payload, PlayerId,
    SystemMessage, TableId, TablePacket,
};
use feltlink_session::ConnectionStatus;
use feltlink_transport::{Connection, Endpoint, Transport};

/// Typed events pushed by the connector's I/O task.
///
/// This is the single-consumer channel replacing per-callback wiring:
/// packet, login and status callbacks all become variants read by the
/// client's event loop.
#[derive(Debug)]
pub enum ConnectorEvent {
    /// Connection lifecycle change.
    Status(ConnectionStatus),
    /// Lobby-class message, to be dispatched by class identifier.
    Lobby(LobbyMessage),
    /// Table-class packet for the open table.
    Table(TablePacket),
    /// Result of a login attempt.
    Login {
        status: LoginStatus,
        player_id: PlayerId,
        screen_name: String,
    },
}

/// Cheap cloneable sender for outbound protocol objects.
///
/// Every operation is fire-and-forget: messages queue until the dial
/// completes and are dropped if the connection is gone. Callers never
/// observe a failure; delivery problems surface as status events on the
/// event channel instead.
#[derive(Debug, Clone)]
pub struct ConnectorHandle {
    outbound: mpsc::UnboundedSender<SystemMessage>,
}

impl ConnectorHandle {
    /// Sends a login request over the connection.
    pub fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
        flags: u32,
    ) {
        self.send_protocol_object(SystemMessage::Login {
            username: username.into(),
            password: password.into(),
            flags,
        });
    }

    /// Asks the server to stream packets for a table as an observer.
    pub fn watch_table(&self, table_id: TableId) {
        tracing::debug!(%table_id, "watching table");
        self.send_protocol_object(SystemMessage::WatchTable { table_id });
    }

    /// Serializes and transmits one outbound protocol object.
    pub fn send_protocol_object(&self, message: SystemMessage) {
        let _ = self.outbound.send(message);
    }
}

/// One connection attempt: an I/O task plus the handle to feed it.
pub struct Connector {
    handle: ConnectorHandle,
    io: JoinHandle<()>,
}

impl Connector {
    /// Spawns the I/O task and starts dialing.
    ///
    /// Non-blocking and infallible from the caller's point of view:
    /// success and failure are both reported as [`ConnectorEvent::Status`]
    /// events on `events`.
    pub fn connect<T: Transport, C: Codec>(
        transport: Arc<T>,
        codec: Arc<C>,
        endpoint: Endpoint,
        events: mpsc::UnboundedSender<ConnectorEvent>,
    ) -> Self {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let io = tokio::spawn(io_task(
            transport,
            codec,
            endpoint,
            events,
            outbound_rx,
        ));
        Self {
            handle: ConnectorHandle {
                outbound: outbound_tx,
            },
            io,
        }
    }

    /// A cloneable handle for sending through this connector.
    pub fn handle(&self) -> ConnectorHandle {
        self.handle.clone()
    }

    /// Sends a login request. See [`ConnectorHandle::login`].
    pub fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
        flags: u32,
    ) {
        self.handle.login(username, password, flags);
    }

    /// Sends a table-watch request. See [`ConnectorHandle::watch_table`].
    pub fn watch_table(&self, table_id: TableId) {
        self.handle.watch_table(table_id);
    }

    /// Sends one outbound protocol object.
    /// See [`ConnectorHandle::send_protocol_object`].
    pub fn send_protocol_object(&self, message: SystemMessage) {
        self.handle.send_protocol_object(message);
    }
}

impl Drop for Connector {
    fn drop(&mut self) {
        self.io.abort();
    }
}

/// The connector's I/O task: dial, then pump frames until the
/// connection ends. Every exit path emits a `Disconnected` status.
async fn io_task<T: Transport, C: Codec>(
    transport: Arc<T>,
    codec: Arc<C>,
    endpoint: Endpoint,
    events: mpsc::UnboundedSender<ConnectorEvent>,
    mut outbound: mpsc::UnboundedReceiver<SystemMessage>,
) {
    let _ = events.send(ConnectorEvent::Status(
        ConnectionStatus::Connecting,
    ));

    let conn = match transport.dial(&endpoint).await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!(%endpoint, error = %e, "dial failed");
            let _ = events.send(ConnectorEvent::Status(
                ConnectionStatus::Disconnected,
            ));
            return;
        }
    };
    tracing::info!(id = %conn.id(), %endpoint, "connected");
    let _ = events.send(ConnectorEvent::Status(
        ConnectionStatus::Connected,
    ));

    let mut seq: u64 = 0;

    loop {
        tokio::select! {
            message = outbound.recv() => {
                let Some(message) = message else {
                    // Connector dropped without aborting us yet.
                    let _ = conn.close().await;
                    break;
                };
                seq += 1;
                let envelope = Envelope {
                    seq,
                    payload: Payload::System(message),
                };
                let bytes = match codec.encode(&envelope) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::error!(error = %e, "encode failed, dropping message");
                        continue;
                    }
                };
                if let Err(e) = conn.send(&bytes).await {
                    tracing::warn!(error = %e, "send failed");
                    let _ = events.send(ConnectorEvent::Status(
                        ConnectionStatus::Disconnected,
                    ));
                    break;
                }
            }

            frame = conn.recv() => match frame {
                Ok(Some(data)) => match codec.decode::<Envelope>(&data) {
                    Ok(envelope) => route(envelope, &events),
                    Err(e) => {
                        tracing::debug!(error = %e, "dropping undecodable frame");
                    }
                },
                Ok(None) => {
                    tracing::info!("connection closed by server");
                    let _ = events.send(ConnectorEvent::Status(
                        ConnectionStatus::Disconnected,
                    ));
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "receive failed");
                    let _ = events.send(ConnectorEvent::Status(
                        ConnectionStatus::Disconnected,
                    ));
                    break;
                }
            }
        }
    }
}

/// Routes one decoded envelope onto the event channel.
fn route(
    envelope: Envelope,
    events: &mpsc::UnboundedSender<ConnectorEvent>,
) {
    let event = match envelope.payload {
        Payload::Table(packet) => ConnectorEvent::Table(packet),
        Payload::Lobby(message) => ConnectorEvent::Lobby(message),
        Payload::System(SystemMessage::LoginResponse {
            status,
            player_id,
            screen_name,
        }) => ConnectorEvent::Login {
            status,
            player_id,
            screen_name,
        },
        Payload::System(other) => {
            tracing::debug!(?other, "unexpected client-bound system message");
            return;
        }
    };
    let _ = events.send(event);
}
