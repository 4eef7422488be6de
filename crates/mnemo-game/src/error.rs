//! Error types for the game layer.

use mnemo_protocol::PlayerId;

/// Errors that can occur during game operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// An answer was submitted before any round was started.
    #[error("game has not started")]
    NotStarted,

    /// The submitting player is not part of the current round's roster.
    #[error("player {0} is not in the current round")]
    UnknownPlayer(PlayerId),

    /// The round's state was queried before any round ever started.
    #[error("no game has been started yet")]
    NoSession,
}
