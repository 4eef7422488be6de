//! The game session: one active round of the memory-sequence game.
//!
//! A round is started for a roster of players, generates a random card
//! sequence, and then scores each recalled sequence a player submits.
//! Starting the next round replaces the previous one wholesale.
//!
//! ```text
//! start() ──→ [Round: roster + sequence] ──→ submit() / state() / scores()
//!    │                                              │
//!    └────────────── start() again ←────────────────┘
//! ```
//!
//! # Concurrency note
//!
//! `GameSession` is NOT thread-safe by itself — plain maps, `&mut self`
//! methods. The server wraps it in a mutex and holds that lock for the
//! full duration of each operation, so every method here is one atomic
//! state transition. Nothing in this module blocks or performs I/O, so
//! lock hold time is bounded by in-memory work only.

use std::collections::HashMap;

use rand::Rng;

use mnemo_protocol::{Card, PlayerId, ScoreEntry};

use crate::{GameConfig, GameError};

/// A participant in the current round.
///
/// Distinct from the room's membership record: the game keeps its own
/// roster snapshot, taken when the round starts, with an accumulating
/// score per player.
#[derive(Debug, Clone)]
pub struct GamePlayer {
    /// The participant's id.
    pub id: PlayerId,
    /// Cumulative score across this round's submissions.
    pub score: u64,
}

/// What a scored submission returns to the submitter.
#[derive(Debug, Clone)]
pub struct Submission {
    /// The submitter's id.
    pub player_id: PlayerId,
    /// Their new cumulative score.
    pub score: u64,
}

/// A read-only snapshot of the active round.
#[derive(Debug, Clone)]
pub struct GameStateView {
    /// Participant ids. Order is unspecified — map iteration, not the
    /// order passed to [`GameSession::start`].
    pub players: Vec<PlayerId>,
    /// The live sequence. Exposing this lets any caller read the answer
    /// mid-round; callers deploying this beyond trusted clients should
    /// treat it as a spectator/replay feed.
    pub sequence: Vec<Card>,
}

/// One active round's state. Replaced wholesale on every start.
struct Round {
    /// Roster snapshot with scores, keyed by player id.
    players: HashMap<PlayerId, GamePlayer>,
    /// The sequence players must recall. Immutable once generated.
    sequence: Vec<Card>,
    /// Set on start; submissions are rejected until it is.
    started: bool,
}

/// Manages the single active round: start, scoring, introspection.
pub struct GameSession {
    round: Option<Round>,
    config: GameConfig,
}

impl GameSession {
    /// Creates a session with no round started yet.
    pub fn new(config: GameConfig) -> Self {
        Self {
            round: None,
            config,
        }
    }

    /// Starts a fresh round for the given participants.
    ///
    /// Any previous round — roster, scores, sequence — is discarded
    /// unconditionally. Each participant starts at score zero; duplicate
    /// ids collapse into one roster entry. The sequence is drawn
    /// position-by-position, independently and uniformly, from the full
    /// card alphabet (repeats allowed).
    ///
    /// Returns the generated sequence; the caller is responsible for
    /// broadcasting it to the participants. Never fails.
    pub fn start(&mut self, player_ids: &[PlayerId]) -> Vec<Card> {
        let mut players = HashMap::with_capacity(player_ids.len());
        for id in player_ids {
            players.insert(
                id.clone(),
                GamePlayer {
                    id: id.clone(),
                    score: 0,
                },
            );
        }

        let sequence = generate_sequence(self.config.sequence_len);

        tracing::info!(
            players = players.len(),
            cards = sequence.len(),
            "round started"
        );

        self.round = Some(Round {
            players,
            sequence: sequence.clone(),
            started: true,
        });

        sequence
    }

    /// Scores a recalled sequence and adds the award to the player's
    /// cumulative score.
    ///
    /// The answer is correct iff it has exactly the sequence's length and
    /// every position matches in order (comparison stops at the first
    /// mismatch). A correct answer awards `10 * timestamp`, where
    /// `timestamp` is the caller-supplied clock value — so later
    /// submissions earn larger awards under this policy. An incorrect
    /// answer awards 0. Either way the award is added, never assigned.
    ///
    /// # Errors
    /// - [`GameError::NotStarted`] — no started round exists.
    /// - [`GameError::UnknownPlayer`] — the id is not in the roster.
    ///
    /// Both checks happen before any mutation.
    pub fn submit(
        &mut self,
        player_id: &PlayerId,
        answer: &[Card],
        timestamp: u64,
    ) -> Result<Submission, GameError> {
        let round = match self.round.as_mut() {
            Some(round) if round.started => round,
            _ => return Err(GameError::NotStarted),
        };

        let player = round
            .players
            .get_mut(player_id)
            .ok_or_else(|| GameError::UnknownPlayer(player_id.clone()))?;

        let correct = answer.len() == round.sequence.len()
            && answer.iter().zip(&round.sequence).all(|(a, b)| a == b);

        let awarded = award(correct, timestamp);
        player.score += awarded;

        tracing::debug!(
            %player_id,
            correct,
            awarded,
            total = player.score,
            "answer scored"
        );

        Ok(Submission {
            player_id: player.id.clone(),
            score: player.score,
        })
    }

    /// Returns a snapshot of the active round.
    ///
    /// # Errors
    /// Returns [`GameError::NoSession`] if no round has ever started.
    pub fn state(&self) -> Result<GameStateView, GameError> {
        let round = self.round.as_ref().ok_or(GameError::NoSession)?;

        Ok(GameStateView {
            players: round.players.keys().cloned().collect(),
            sequence: round.sequence.clone(),
        })
    }

    /// Returns every participant's cumulative score, in unspecified order.
    ///
    /// # Errors
    /// Returns [`GameError::NoSession`] if no round has ever started.
    pub fn scores(&self) -> Result<Vec<ScoreEntry>, GameError> {
        let round = self.round.as_ref().ok_or(GameError::NoSession)?;

        Ok(round
            .players
            .values()
            .map(|p| ScoreEntry {
                player_id: p.id.clone(),
                score: p.score,
            })
            .collect())
    }
}

/// Draws a sequence of `len` cards, each independently and uniformly
/// from the full alphabet. Repeats are allowed — this is a plain
/// uniform draw, not a shuffle.
fn generate_sequence(len: usize) -> Vec<Card> {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| Card::ALL[rng.random_range(0..Card::ALL.len())])
        .collect()
}

/// The award for one submission: `10 * timestamp` when correct, 0 when
/// not. The timestamp scaling means later (larger-clock) submissions
/// earn more for the same answer.
fn award(correct: bool, timestamp: u64) -> u64 {
    if correct { 10 * timestamp } else { 0 }
}

// =========================================================================
// Tests
// =========================================================================
