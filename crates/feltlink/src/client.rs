//! The client: the session manager actor that owns everything.
//!
//! One `Client` owns one [`Session`], at most one [`Connector`] and at
//! most one open table session. Its `run` loop is the single consumer
//! of connector events and handle commands, so no other synchronization
//! exists anywhere in the layer: both the connector and the table
//! session are replaced by whole-value assignment from this loop, never
//! mutated elsewhere.
//!
//! ```text
//!   ClientHandle ──commands──┐
//!                            ▼
//!   Connector ───events──→ run loop ──→ Session (state machine)
//!                            │              │ actions
//!                            │              ▼
//!                            ├──→ LobbySink / ClientView
//!                            ├──→ active TableSession
//!                            └──→ retry timer (single slot)
//! ```

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Sleep;

use feltlink_protocol::{
    Codec, LobbyMessage, LobbyType, SubscribeRequest, SystemMessage,
    TableId,
};
use feltlink_session::{Session, SessionAction, SessionConfig};
use feltlink_transport::{Endpoint, Transport};

use crate::connector::{Connector, ConnectorEvent};
use crate::sink::{ClientView, LobbySink};
use crate::table::{TableSession, TableSessionFactory};

// ---------------------------------------------------------------------------
// Configuration and builder
// ---------------------------------------------------------------------------

/// Static client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Where to dial.
    pub endpoint: Endpoint,
    /// Which game's lobby tree subscriptions target.
    pub game_id: u32,
}

/// Builds a [`Client`] and its [`ClientHandle`].
///
/// ```rust,no_run
/// use feltlink::prelude::*;
///
/// # struct MySink; struct MyView; struct MyTables;
/// # impl LobbySink for MySink {
/// #     fn handle_table_snapshot_list(&mut self, _: Vec<TableSnapshot>) {}
/// #     fn handle_table_update_list(&mut self, _: Vec<TableUpdate>) {}
/// #     fn handle_table_removed(&mut self, _: TableId) {}
/// #     fn handle_tournament_snapshot_list(&mut self, _: Vec<TournamentSnapshot>) {}
/// #     fn handle_tournament_updates(&mut self, _: Vec<TournamentUpdate>) {}
/// # }
/// # impl ClientView for MyView {
/// #     fn show_connect_status(&mut self, _: &str) {}
/// #     fn show_login(&mut self) {}
/// #     fn show_lobby(&mut self, _: &PlayerIdentity) {}
/// #     fn show_table(&mut self) {}
/// #     fn reset_lobby(&mut self) {}
/// # }
/// # impl TableSessionFactory for MyTables {
/// #     fn create(&mut self, _: ConnectorHandle) -> Box<dyn TableSession> { unimplemented!() }
/// # }
/// # async fn demo() {
/// let (client, handle) = ClientBuilder::new(Endpoint::new("play.example.com", 9191, "socket"))
///     .build(WebSocketTransport, JsonCodec, MySink, MyView, MyTables);
/// tokio::spawn(client.run());
/// handle.login("alice", "hunter2", 0);
/// # }
/// ```
pub struct ClientBuilder {
    endpoint: Endpoint,
    game_id: u32,
    session: SessionConfig,
}

impl ClientBuilder {
    /// Starts a builder for a client dialing the given endpoint.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            game_id: 1,
            session: SessionConfig::default(),
        }
    }

    /// Sets the lobby tree's game id (default: 1).
    pub fn game_id(mut self, game_id: u32) -> Self {
        self.game_id = game_id;
        self
    }

    /// Overrides the fixed reconnect delay (default: 500 ms).
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.session.retry_delay = delay;
        self
    }

    /// Assembles the client with its transport, codec and collaborators.
    pub fn build<T: Transport, C: Codec>(
        self,
        transport: T,
        codec: C,
        lobby: impl LobbySink,
        view: impl ClientView,
        tables: impl TableSessionFactory,
    ) -> (Client<T, C>, ClientHandle) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();

        let state = ClientState {
            transport: Arc::new(transport),
            codec: Arc::new(codec),
            config: ClientConfig {
                endpoint: self.endpoint,
                game_id: self.game_id,
            },
            session: Session::new(self.session),
            connector: None,
            table: None,
            lobby: Box::new(lobby),
            view: Box::new(view),
            tables: Box::new(tables),
            events_tx,
        };

        (
            Client {
                state,
                events: events_rx,
                commands: commands_rx,
            },
            ClientHandle {
                commands: commands_tx,
            },
        )
    }
}

// ---------------------------------------------------------------------------
// Handle and commands
// ---------------------------------------------------------------------------

/// Commands sent to the client's run loop.
enum ClientCommand {
    Login {
        username: String,
        password: String,
        flags: u32,
    },
    OpenTable {
        table_id: TableId,
        capacity: u32,
    },
    WatchTable {
        table_id: TableId,
    },
    Subscribe(LobbyType),
    Shutdown,
}

/// Cloneable handle for driving a running [`Client`].
///
/// Every operation is fire-and-forget and infallible: results, where
/// they exist, come back through the collaborator traits. Dropping all
/// handles shuts the client down.
#[derive(Clone)]
pub struct ClientHandle {
    commands: mpsc::UnboundedSender<ClientCommand>,
}

impl ClientHandle {
    /// Attempts a login over the established connection.
    pub fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
        flags: u32,
    ) {
        let _ = self.commands.send(ClientCommand::Login {
            username: username.into(),
            password: password.into(),
            flags,
        });
    }

    /// Opens a table, replacing any table currently open.
    pub fn open_table(&self, table_id: TableId, capacity: u32) {
        let _ = self
            .commands
            .send(ClientCommand::OpenTable { table_id, capacity });
    }

    /// Asks the server to stream a table's packets as an observer.
    pub fn watch_table(&self, table_id: TableId) {
        let _ = self.commands.send(ClientCommand::WatchTable { table_id });
    }

    /// Subscribes to the cash-game lobby feed (path `"/"`).
    pub fn subscribe_to_cash_games(&self) {
        let _ = self
            .commands
            .send(ClientCommand::Subscribe(LobbyType::Cash));
    }

    /// Subscribes to the sit-and-go lobby feed (path `"/sitandgo"`).
    pub fn subscribe_to_sit_and_gos(&self) {
        let _ = self
            .commands
            .send(ClientCommand::Subscribe(LobbyType::SitAndGo));
    }

    /// Subscribes to the scheduled tournament feed (path `"/scheduled"`).
    pub fn subscribe_to_tournaments(&self) {
        let _ = self
            .commands
            .send(ClientCommand::Subscribe(LobbyType::Tournament));
    }

    /// Stops the client's run loop.
    pub fn shutdown(&self) {
        let _ = self.commands.send(ClientCommand::Shutdown);
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// The currently open table and its session.
struct ActiveTable {
    table_id: TableId,
    session: Box<dyn TableSession>,
}

/// Everything the run loop mutates, minus the channel receivers.
///
/// The receivers stay out so the select arms can borrow them while the
/// handlers borrow this struct.
struct ClientState<T: Transport, C: Codec> {
    transport: Arc<T>,
    codec: Arc<C>,
    config: ClientConfig,
    session: Session,
    connector: Option<Connector>,
    table: Option<ActiveTable>,
    lobby: Box<dyn LobbySink>,
    view: Box<dyn ClientView>,
    tables: Box<dyn TableSessionFactory>,
    events_tx: mpsc::UnboundedSender<ConnectorEvent>,
}

/// The session manager. Construct with [`ClientBuilder`], then await
/// [`run`](Client::run) (usually in a spawned task).
pub struct Client<T: Transport, C: Codec> {
    state: ClientState<T, C>,
    events: mpsc::UnboundedReceiver<ConnectorEvent>,
    commands: mpsc::UnboundedReceiver<ClientCommand>,
}

impl<T: Transport, C: Codec> Client<T, C> {
    /// Runs the session until shutdown.
    ///
    /// Connects immediately, then processes connector events, handle
    /// commands and the reconnect timer until [`ClientHandle::shutdown`]
    /// is called or every handle is dropped.
    pub async fn run(self) {
        let Client {
            mut state,
            mut events,
            mut commands,
        } = self;

        state.connect();

        // The single retry slot. Arming it replaces any pending timer,
        // and connecting clears it, so at most one deferred reconnect
        // attempt exists at any time.
        let mut retry: Option<Pin<Box<Sleep>>> = None;

        loop {
            tokio::select! {
                () = next_retry(&mut retry) => {
                    retry = None;
                    state.connect();
                }

                Some(event) = events.recv() => {
                    if let Some(delay) = state.handle_event(event) {
                        retry =
                            Some(Box::pin(tokio::time::sleep(delay)));
                    }
                }

                command = commands.recv() => match command {
                    Some(command) => {
                        if state.handle_command(command) {
                            break;
                        }
                    }
                    // Every handle dropped: the client is being
                    // disposed of.
                    None => break,
                },
            }
        }

        tracing::info!("client stopped");
    }
}

/// Resolves when the armed retry timer fires; pends forever while the
/// slot is empty.
async fn next_retry(slot: &mut Option<Pin<Box<Sleep>>>) {
    match slot {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}

impl<T: Transport, C: Codec> ClientState<T, C> {
    /// Starts a connection attempt with a freshly constructed connector.
    fn connect(&mut self) {
        let actions = self.session.on_connect();
        self.execute(actions);

        let connector = Connector::connect(
            Arc::clone(&self.transport),
            Arc::clone(&self.codec),
            self.config.endpoint.clone(),
            self.events_tx.clone(),
        );
        // Whole-value replacement; dropping the previous connector
        // aborts its I/O task.
        self.connector = Some(connector);
    }

    /// Processes one connector event. Returns the delay to arm the
    /// retry timer with, when the state machine asks for one.
    fn handle_event(&mut self, event: ConnectorEvent) -> Option<Duration> {
        match event {
            ConnectorEvent::Status(status) => {
                let actions = self.session.on_status(status);
                self.execute(actions)
            }
            ConnectorEvent::Login {
                status,
                player_id,
                screen_name,
            } => {
                let actions =
                    self.session.on_login(status, player_id, screen_name);
                self.execute(actions)
            }
            ConnectorEvent::Lobby(message) => {
                self.dispatch_lobby(message);
                None
            }
            ConnectorEvent::Table(packet) => {
                match &mut self.table {
                    Some(active) => active.session.handle_packet(packet),
                    None => {
                        tracing::debug!(
                            "dropping table packet, no table open"
                        );
                    }
                }
                None
            }
        }
    }

    /// Carries out the effects of a state machine transition.
    fn execute(&mut self, actions: Vec<SessionAction>) -> Option<Duration> {
        let mut retry = None;
        for action in actions {
            match action {
                SessionAction::ShowStatus(text) => {
                    self.view.show_connect_status(&text);
                }
                SessionAction::PromptLogin => self.view.show_login(),
                SessionAction::EnterLobby(identity) => {
                    self.view.show_lobby(&identity);
                }
                SessionAction::SubscribeCashGames => {
                    self.subscribe(LobbyType::Cash);
                }
                SessionAction::ScheduleRetry { attempt, delay } => {
                    tracing::debug!(attempt, ?delay, "arming retry timer");
                    retry = Some(delay);
                }
            }
        }
        retry
    }

    /// Dispatches one lobby-class message by its class identifier.
    ///
    /// Unrecognized classes already decoded to `Unknown` in the
    /// protocol layer; here they are a traced no-op, by policy.
    fn dispatch_lobby(&mut self, message: LobbyMessage) {
        match message {
            LobbyMessage::TableSnapshotList { snapshots } => {
                self.lobby.handle_table_snapshot_list(snapshots);
            }
            LobbyMessage::TableUpdateList { updates } => {
                self.lobby.handle_table_update_list(updates);
            }
            LobbyMessage::TableRemoved { table_id } => {
                self.lobby.handle_table_removed(table_id);
            }
            LobbyMessage::TournamentSnapshotList { snapshots } => {
                self.lobby.handle_tournament_snapshot_list(snapshots);
            }
            LobbyMessage::TournamentUpdateList { updates } => {
                self.lobby.handle_tournament_updates(updates);
            }
            LobbyMessage::Unknown => {
                tracing::trace!("ignoring lobby message with unknown class");
            }
        }
    }

    /// Processes one handle command. Returns `true` on shutdown.
    fn handle_command(&mut self, command: ClientCommand) -> bool {
        match command {
            ClientCommand::Login {
                username,
                password,
                flags,
            } => match &self.connector {
                Some(connector) => {
                    connector.login(username, password, flags);
                }
                None => tracing::debug!("login with no connector"),
            },
            ClientCommand::OpenTable { table_id, capacity } => {
                self.open_table(table_id, capacity);
            }
            ClientCommand::WatchTable { table_id } => {
                if let Some(connector) = &self.connector {
                    connector.watch_table(table_id);
                }
            }
            ClientCommand::Subscribe(lobby_type) => {
                self.subscribe(lobby_type);
            }
            ClientCommand::Shutdown => return true,
        }
        false
    }

    /// Opens a table: switch the surface, build the session, fire the
    /// open hook. Replaces any table already open; the replaced session
    /// is dropped and stops receiving packets immediately.
    fn open_table(&mut self, table_id: TableId, capacity: u32) {
        tracing::info!(%table_id, capacity, "opening table");
        self.view.show_table();

        let Some(connector) = &self.connector else {
            tracing::warn!(%table_id, "open_table with no connector");
            return;
        };

        let mut session = self.tables.create(connector.handle());
        session.on_open_table(table_id, capacity);

        if let Some(previous) =
            self.table.replace(ActiveTable { table_id, session })
        {
            tracing::debug!(
                table = %previous.table_id,
                "table session replaced"
            );
        }
    }

    /// Resets the lobby surface and re-subscribes to a feed.
    fn subscribe(&mut self, lobby_type: LobbyType) {
        self.view.reset_lobby();

        let request = SubscribeRequest {
            lobby_type,
            game_id: self.config.game_id,
            path: lobby_type.default_path().into(),
        };
        tracing::debug!(?lobby_type, path = %request.path, "subscribing");

        if let Some(connector) = &self.connector {
            connector
                .send_protocol_object(SystemMessage::Subscribe(request));
        }
    }
}
