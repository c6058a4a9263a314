//! Session state for the Feltlink client.
//!
//! This crate is the decision-making half of the connection layer:
//!
//! 1. **State** — the [`Session`] record: connection state, retry
//!    counter, logged-in player identity.
//! 2. **Transitions** — [`Session::on_connect`], [`Session::on_status`]
//!    and [`Session::on_login`] implement the connection state machine
//!    and the unbounded fixed-interval retry policy.
//! 3. **Effects** — transitions return [`SessionAction`] lists for the
//!    owner to execute; nothing here performs I/O.
//!
//! Keeping the machine pure means the state after any event sequence is
//! a function of that sequence alone, which is exactly what the unit
//! tests in `machine.rs` check.
//!
//! # How it fits in the stack
//!
//! ```text
//! Client (above)    ← runs the event loop, executes SessionActions
//!     ↕
//! Session (this crate)  ← decides state transitions and retry policy
//!     ↕
//! Protocol (below)  ← provides PlayerId, LoginStatus
//! ```

mod machine;
mod session;
mod status;

pub use machine::SessionAction;
pub use session::{PlayerIdentity, Session, SessionConfig};
pub use status::ConnectionStatus;
