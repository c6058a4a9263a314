//! The per-table communication seam.
//!
//! While a table is open, every table-class packet is forwarded here
//! without interpretation; the game logic behind the trait owns the
//! packet encoding. At most one table session is active at a time:
//! opening another table replaces the current one, and the replaced
//! session is dropped, so implementations put any teardown in `Drop`.

use feltlink_protocol::{TableId, TablePacket};

use crate::connector::ConnectorHandle;

/// The communication context for one open table.
pub trait TableSession: Send + 'static {
    /// Called once, immediately after the session is created.
    fn on_open_table(&mut self, table_id: TableId, capacity: u32);

    /// One table-class packet from the wire, verbatim.
    fn handle_packet(&mut self, packet: TablePacket);
}

/// Creates a [`TableSession`] each time a table is opened.
///
/// The handle is bound to the connector current at open time, so the
/// session can send game actions; after a reconnect, newly opened
/// tables bind to the new connector.
pub trait TableSessionFactory: Send + 'static {
    fn create(&mut self, connector: ConnectorHandle) -> Box<dyn TableSession>;
}
