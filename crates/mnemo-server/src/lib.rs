//! # Mnemo server
//!
//! The multiplayer memory-sequence session service: players join a
//! shared room, a round generates a random card sequence, players
//! submit what they recall, and the server scores them.
//!
//! This crate is the composition root. It ties the layers together:
//!
//! ```text
//! transport (WebSocket frames)
//!     → handler (Envelope<Request> → one locked component call → Envelope<Response>)
//!         → mnemo-lobby (room membership) / mnemo-game (round state)
//! ```
//!
//! The state components are plain sync types; this crate owns the one
//! mutex per component that makes every operation an atomic state
//! transition under concurrent clients.

mod error;
mod handler;
mod server;
mod transport;

pub use error::ServerError;
pub use server::{Server, ServerBuilder};
pub use transport::{ConnectionId, TransportError, WsConnection, WsListener};
