//! Wire protocol for Mnemo.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Types** ([`Envelope`], [`Request`], [`Response`], [`Card`], etc.)
//!   — the message structures that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those messages are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while encoding
//!   or decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between the transport (raw frames) and the
//! state components (room, game). It knows nothing about sockets or
//! locks — only message shapes.
//!
//! ```text
//! Transport (bytes) → Protocol (Envelope) → Room / Game (state)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    Card, Envelope, ErrorCode, Player, PlayerId, Request, Response, ScoreEntry,
};
