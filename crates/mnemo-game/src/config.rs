//! Game configuration.

/// Configuration for the game session.
///
/// Fixed at process start, like the room capacity.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// How many cards each round's sequence contains.
    pub sequence_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { sequence_len: 5 }
    }
}
