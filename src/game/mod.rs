//! Game state: rounds, the day's session and its persistence
//!
//! - `round`: attempts and win/loss transitions for one level
//! - `session`: all five levels for one calendar day
//! - `store`: JSON file persistence keyed by date

mod round;
mod session;
mod store;

pub use round::{Attempt, LevelState, Status};
pub use session::Session;
pub use store::{Store, StoreError};

use thiserror::Error;

/// Guesses allowed per level per day
pub const MAX_ATTEMPTS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("this level is already finished ({0})")]
    Finished(Status),
}
