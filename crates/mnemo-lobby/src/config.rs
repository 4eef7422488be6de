//! Room configuration.

/// Configuration for the shared room.
///
/// Fixed at process start; no API changes it afterwards.
#[derive(Debug, Clone)]
pub struct RoomConfig {
    /// Maximum players allowed in the room. Must be greater than zero.
    pub max_players: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self { max_players: 4 }
    }
}
