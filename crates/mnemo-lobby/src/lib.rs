//! Room membership for Mnemo.
//!
//! One fixed-capacity room, created at process start, that players join
//! before a round begins. Joining returns the current roster so a new
//! member immediately knows who else is waiting.
//!
//! # Key types
//!
//! - [`Room`] — membership map with capacity enforcement
//! - [`RoomRoster`] — what a successful join returns
//! - [`RoomConfig`] — capacity setting
//! - [`RoomError`] — join failures

mod config;
mod error;
mod room;

pub use config::RoomConfig;
pub use error::RoomError;
pub use room::{Room, RoomRoster};
