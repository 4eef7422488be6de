//! Error types for the protocol layer.
//!
//! Each crate in Mnemo defines its own error enum, so a `ProtocolError`
//! always means a serialization problem — never a room, game, or
//! networking one.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    /// Common causes: malformed JSON, missing fields, wrong data types.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message decoded cleanly but violates a protocol rule.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
