//! A terminal lobby browser: connect, log in, print the feeds.
//!
//! Usage: `lobby-cli [host] [port] [username] [password]`
//!
//! Logs in whenever the session signals ready-for-login (so it also
//! re-authenticates after every reconnect) and prints lobby batches as
//! they arrive. Set `RUST_LOG=feltlink=debug` to watch the connection
//! layer work.

use feltlink::prelude::*;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Stdout collaborators
// ---------------------------------------------------------------------------

struct StdoutView {
    ready: mpsc::UnboundedSender<()>,
}

impl ClientView for StdoutView {
    fn show_connect_status(&mut self, status: &str) {
        println!("[conn] {status}");
    }

    fn show_login(&mut self) {
        let _ = self.ready.send(());
    }

    fn show_lobby(&mut self, player: &PlayerIdentity) {
        println!(
            "[lobby] logged in as {} ({})",
            player.screen_name, player.player_id
        );
    }

    fn show_table(&mut self) {
        println!("[table] switched to table view");
    }

    fn reset_lobby(&mut self) {
        println!("[lobby] --- feed reset ---");
    }
}

struct StdoutLobby;

impl LobbySink for StdoutLobby {
    fn handle_table_snapshot_list(&mut self, snapshots: Vec<TableSnapshot>) {
        for t in snapshots {
            println!(
                "[lobby] {} {:24} {}/{} seats  blinds {}/{} {}",
                t.table_id,
                t.name,
                t.seated,
                t.capacity,
                t.small_blind,
                t.big_blind,
                t.currency
            );
        }
    }

    fn handle_table_update_list(&mut self, updates: Vec<TableUpdate>) {
        for u in updates {
            println!("[lobby] {} now {} seated", u.table_id, u.seated);
        }
    }

    fn handle_table_removed(&mut self, table_id: TableId) {
        println!("[lobby] {table_id} removed");
    }

    fn handle_tournament_snapshot_list(
        &mut self,
        snapshots: Vec<TournamentSnapshot>,
    ) {
        for t in snapshots {
            println!(
                "[lobby] {} {:24} {:?}  {}/{} entrants  buy-in {} {}",
                t.tournament_id,
                t.name,
                t.status,
                t.registered,
                t.capacity,
                t.buy_in,
                t.currency
            );
        }
    }

    fn handle_tournament_updates(&mut self, updates: Vec<TournamentUpdate>) {
        for u in updates {
            println!(
                "[lobby] {} {:?}, {} registered",
                u.tournament_id, u.status, u.registered
            );
        }
    }
}

struct PrintTable {
    connector: ConnectorHandle,
}

impl TableSession for PrintTable {
    fn on_open_table(&mut self, table_id: TableId, capacity: u32) {
        println!("[table] opened {table_id} ({capacity} seats)");
        self.connector.watch_table(table_id);
    }

    fn handle_packet(&mut self, packet: TablePacket) {
        println!("[table] packet ({} bytes)", packet.0.len());
    }
}

struct PrintTables;

impl TableSessionFactory for PrintTables {
    fn create(&mut self, connector: ConnectorHandle) -> Box<dyn TableSession> {
        Box::new(PrintTable { connector })
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "127.0.0.1".into());
    let port = args
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or(9191);
    let username = args.next().unwrap_or_else(|| "guest".into());
    let password = args.next().unwrap_or_default();

    eprintln!("dialing ws://{host}:{port}/socket as {username}");

    let (ready_tx, mut ready) = mpsc::unbounded_channel();
    let (client, handle) =
        ClientBuilder::new(Endpoint::new(host, port, "socket")).build(
            WebSocketTransport,
            JsonCodec,
            StdoutLobby,
            StdoutView { ready: ready_tx },
            PrintTables,
        );

    tokio::spawn(client.run());

    // Log in every time the session is ready for it, reconnects included.
    while ready.recv().await.is_some() {
        handle.login(username.clone(), password.clone(), 0);
    }
}
