//! Core protocol types for Mnemo's wire format.
//!
//! Everything a client and the server exchange is defined here: player
//! identity, the card alphabet, the five request operations, their
//! responses, and the envelope that carries them. The transport layer
//! moves [`Envelope`]s; it never looks inside the payload.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player, opaque to the server.
///
/// Ids are client-chosen strings; the server only compares them for
/// equality and uses them as map keys. `#[serde(transparent)]` keeps
/// the wire form a plain JSON string rather than a wrapped object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Builds an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A player's public record as it appears in room rosters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// The player's unique id.
    pub id: PlayerId,
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// One symbolic card from the fixed 17-symbol alphabet.
///
/// A round's sequence is built from these; players recall and resubmit
/// them in order. Serialized as the bare variant name (`"Sun"`, `"Moon"`,
/// ...) so client UIs can map symbols directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    Sun,
    Moon,
    Star,
    Heart,
    Diamond,
    Clover,
    Spade,
    Bell,
    Key,
    Crown,
    Anchor,
    Leaf,
    Flame,
    Droplet,
    Snowflake,
    Bolt,
    Wave,
}

impl Card {
    /// Every card in the alphabet, in declaration order.
    ///
    /// Sequence generation draws uniformly from this table; its length is
    /// the size of the card domain.
    pub const ALL: [Card; 17] = [
        Card::Sun,
        Card::Moon,
        Card::Star,
        Card::Heart,
        Card::Diamond,
        Card::Clover,
        Card::Spade,
        Card::Bell,
        Card::Key,
        Card::Crown,
        Card::Anchor,
        Card::Leaf,
        Card::Flame,
        Card::Droplet,
        Card::Snowflake,
        Card::Bolt,
        Card::Wave,
    ];
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A client request: one variant per remote operation.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON, e.g.
/// `{ "type": "JoinRoom", "player_id": "ana" }`, which keeps the wire
/// format flat and easy to construct from JavaScript clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Enter the shared room. Fails with `ResourceExhausted` when the
    /// room is at capacity; re-joining with a present id is a no-op.
    JoinRoom { player_id: PlayerId },

    /// Start a fresh round for the listed participants. Discards any
    /// previous round unconditionally; never fails.
    StartGame { player_ids: Vec<PlayerId> },

    /// Submit a recalled sequence. `timestamp` is the caller's clock
    /// value; it scales the award for a correct answer.
    SubmitAnswer {
        player_id: PlayerId,
        answer: Vec<Card>,
        timestamp: u64,
    },

    /// Fetch the active round's roster and sequence.
    GetGameState,

    /// Fetch every participant's cumulative score.
    ShowScores,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// One participant's cumulative score, as returned by `ShowScores`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// The participant's id.
    pub player_id: PlayerId,
    /// Their cumulative score across the round's submissions.
    pub score: u64,
}

/// The closed set of failure classifications.
///
/// Component errors are typed enums internal to their crates; they are
/// translated into one of these codes only at the transport boundary,
/// so the core never speaks any RPC framework's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The room is already at its configured capacity.
    ResourceExhausted,
    /// The operation requires a started round and none exists.
    FailedPrecondition,
    /// The referenced player or session does not exist.
    NotFound,
    /// The request frame could not be decoded. Produced by the transport
    /// layer only, never by the core components.
    BadRequest,
}

/// A server response: one success variant per operation, plus `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// Reply to `JoinRoom`. `other_players` lists every member except
    /// the joiner, in unspecified order.
    RoomJoined {
        other_players: Vec<Player>,
        me: Player,
        max_players: usize,
    },

    /// Reply to `StartGame`: the freshly generated sequence. The caller
    /// is responsible for broadcasting it to the other participants.
    GameStarted { sequence: Vec<Card> },

    /// Reply to `SubmitAnswer`: the submitter's new cumulative score.
    AnswerScored { player_id: PlayerId, score: u64 },

    /// Reply to `GetGameState`. `players` is in unspecified order, and
    /// `sequence` is the live answer — any caller can read it mid-round.
    GameState {
        players: Vec<PlayerId>,
        sequence: Vec<Card>,
    },

    /// Reply to `ShowScores`, in unspecified order.
    Scores { scores: Vec<ScoreEntry> },

    /// Any operation's failure, classified by [`ErrorCode`].
    Error { code: ErrorCode, message: String },
}

// ---------------------------------------------------------------------------
// Envelope — the top-level wire format
// ---------------------------------------------------------------------------

/// The top-level wrapper for every frame on the wire.
///
/// `seq` is a client-chosen correlation number: the server echoes the
/// request's `seq` into its response, so a client may pipeline several
/// requests on one connection and match replies to calls. Responses to
/// undecodable frames carry `seq = 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Correlation number, echoed from request to response.
    pub seq: u64,

    /// The actual message content.
    pub payload: T,
}

// =========================================================================
// Tests
// =========================================================================
