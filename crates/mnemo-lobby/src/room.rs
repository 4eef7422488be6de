//! The shared room: membership tracking with capacity enforcement.
//!
//! # Concurrency note
//!
//! `Room` is NOT thread-safe by itself — it uses a plain `HashMap` and
//! `&mut self` methods. This is intentional: the server wraps it in a
//! mutex and every operation runs start-to-finish under that lock, so
//! the read-modify-respond step in [`Room::join`] is atomic with
//! respect to other joins. Keeping the locking one layer up avoids
//! hidden synchronization here.

use std::collections::HashMap;

use mnemo_protocol::{Player, PlayerId};

use crate::{RoomConfig, RoomError};

/// What a successful join returns to the new member.
#[derive(Debug, Clone)]
pub struct RoomRoster {
    /// Every current member except the joiner. Order is unspecified —
    /// this is built from map iteration and is not join order.
    pub others: Vec<Player>,

    /// The joiner's own record.
    pub me: Player,

    /// The room's configured capacity.
    pub max_players: usize,
}

/// A capacity-bounded set of players waiting to play.
///
/// Created once at process start and never destroyed; membership only
/// grows (players never leave in this service). Invariant: the member
/// count never exceeds `config.max_players`.
pub struct Room {
    /// Current members, keyed by player id.
    players: HashMap<PlayerId, Player>,

    config: RoomConfig,
}

impl Room {
    /// Creates an empty room with the given configuration.
    pub fn new(config: RoomConfig) -> Self {
        Self {
            players: HashMap::new(),
            config,
        }
    }

    /// Admits a player and returns the current roster.
    ///
    /// Joining with an id that is already a member overwrites that
    /// member's record — an idempotent no-op in effect, which never
    /// counts against capacity. Only a join that would grow the room
    /// past `max_players` fails.
    ///
    /// # Errors
    /// Returns [`RoomError::Full`] when the room is at capacity and
    /// `player_id` is not already a member.
    pub fn join(&mut self, player_id: PlayerId) -> Result<RoomRoster, RoomError> {
        if !self.players.contains_key(&player_id)
            && self.players.len() >= self.config.max_players
        {
            return Err(RoomError::Full {
                max_players: self.config.max_players,
            });
        }

        let me = Player {
            id: player_id.clone(),
        };
        self.players.insert(player_id.clone(), me.clone());

        let others: Vec<Player> = self
            .players
            .values()
            .filter(|p| p.id != player_id)
            .cloned()
            .collect();

        tracing::info!(
            %player_id,
            players = self.players.len(),
            max_players = self.config.max_players,
            "player joined room"
        );

        Ok(RoomRoster {
            others,
            me,
            max_players: self.config.max_players,
        })
    }

    /// Returns `true` if the given id is a member.
    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.players.contains_key(player_id)
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` if the room has no members.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Returns the configured capacity.
    pub fn max_players(&self) -> usize {
        self.config.max_players
    }
}

// =========================================================================
// Tests
// =========================================================================
