//! Collaborator traits for the presentation layer.
//!
//! The session layer never renders anything. Lobby traffic and surface
//! switches cross these two seams, and everything behind them (list
//! rendering, templating, filters, sorting) is someone else's code.

use feltlink_protocol::{
    TableId, TableSnapshot, TableUpdate, TournamentSnapshot,
    TournamentUpdate,
};
use feltlink_session::PlayerIdentity;

/// Consumes decoded lobby and tournament update batches.
///
/// Batches arrive exactly as decoded from the wire; the sink owns any
/// filtering, merging or rendering. Calls happen on the client's event
/// loop, one at a time.
pub trait LobbySink: Send + 'static {
    /// Full listing for the subscribed table feed.
    fn handle_table_snapshot_list(&mut self, snapshots: Vec<TableSnapshot>);

    /// Delta updates for tables already listed.
    fn handle_table_update_list(&mut self, updates: Vec<TableUpdate>);

    /// A table was closed and should be dropped from the listing.
    fn handle_table_removed(&mut self, table_id: TableId);

    /// Full listing for the subscribed tournament feed.
    fn handle_tournament_snapshot_list(
        &mut self,
        snapshots: Vec<TournamentSnapshot>,
    );

    /// Delta updates for tournaments already listed.
    fn handle_tournament_updates(&mut self, updates: Vec<TournamentUpdate>);
}

/// Surface-switching and status hooks driven by the state machine.
pub trait ClientView: Send + 'static {
    /// Show a connection status line ("Initializing", "Connected", ...).
    fn show_connect_status(&mut self, status: &str);

    /// The connection is up; offer the login form.
    fn show_login(&mut self);

    /// Login accepted; leave the login surface for the lobby.
    fn show_lobby(&mut self, player: &PlayerIdentity);

    /// A table is being opened; switch from the lobby to the table
    /// surface.
    fn show_table(&mut self);

    /// A new feed subscription is about to be issued; clear the lobby
    /// structures so stale rows from the previous feed don't linger.
    fn reset_lobby(&mut self);
}
