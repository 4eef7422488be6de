//! Error types for the room layer.

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room is full — no more player slots available.
    #[error("room is full ({max_players} players)")]
    Full {
        /// The configured capacity that was hit.
        max_players: usize,
    },
}
