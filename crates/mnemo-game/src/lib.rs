//! Game session management for Mnemo.
//!
//! Owns the active round of the memory-sequence game: the roster
//! snapshot, the generated card sequence, and every participant's
//! cumulative score. Rounds are replaced, never merged — starting a new
//! one discards the old one entirely.
//!
//! # Key types
//!
//! - [`GameSession`] — start rounds, score submissions, serve snapshots
//! - [`GamePlayer`] — one participant with an accumulating score
//! - [`GameConfig`] — sequence length
//! - [`GameError`] — precondition failures

mod config;
mod error;
mod session;

pub use config::GameConfig;
pub use error::GameError;
pub use session::{GamePlayer, GameSession, GameStateView, Submission};
